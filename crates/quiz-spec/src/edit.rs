//! Pure edit operations over questionnaire snapshots.
//!
//! Every operation borrows the current snapshot and returns the next one. An
//! operation addressed at an id that is no longer present returns a copy equal
//! to its input.

use serde::{Deserialize, Serialize};

use crate::ids::{ChoiceId, QuestionId};
use crate::invariants;
use crate::spec::question::{Choice, Question};
use crate::spec::questionnaire::Questionnaire;

/// Fresh initial snapshot; identifiers are never reused from earlier sessions.
pub fn reset() -> Questionnaire {
    Questionnaire::initial()
}

pub fn set_name(snapshot: &Questionnaire, name: impl Into<String>) -> Questionnaire {
    let mut next = snapshot.clone();
    next.name = name.into();
    next
}

/// Appends a blank question with two choices, the first one correct.
pub fn add_question(snapshot: &Questionnaire) -> Questionnaire {
    let mut next = snapshot.clone();
    next.questions.push(Question::blank());
    guarded(snapshot, next)
}

/// Appends a deep copy of the question under new question and choice ids.
pub fn duplicate_question(snapshot: &Questionnaire, question_id: QuestionId) -> Questionnaire {
    let Some(source) = snapshot.question(question_id) else {
        return snapshot.clone();
    };
    let copy = source.duplicate();
    let mut next = snapshot.clone();
    next.questions.push(copy);
    guarded(snapshot, next)
}

pub fn delete_question(snapshot: &Questionnaire, question_id: QuestionId) -> Questionnaire {
    let mut next = snapshot.clone();
    next.questions.retain(|question| question.id != question_id);
    next
}

pub fn set_question_name(
    snapshot: &Questionnaire,
    question_id: QuestionId,
    text: impl Into<String>,
) -> Questionnaire {
    edit_question(snapshot, question_id, |question| {
        question.name = text.into();
    })
}

/// Appends an empty, not-correct choice to the question.
pub fn add_choice(snapshot: &Questionnaire, question_id: QuestionId) -> Questionnaire {
    let next = edit_question(snapshot, question_id, |question| {
        question.choices.push(Choice::new(false));
    });
    guarded(snapshot, next)
}

/// Removes a choice. Deleting the correct choice promotes the new first choice;
/// the last remaining choice of a question cannot be deleted.
pub fn delete_choice(
    snapshot: &Questionnaire,
    question_id: QuestionId,
    choice_id: ChoiceId,
) -> Questionnaire {
    let Some(question) = snapshot.question(question_id) else {
        return snapshot.clone();
    };
    let Some(position) = question.choice_position(choice_id) else {
        return snapshot.clone();
    };
    if question.choices.len() == 1 {
        return snapshot.clone();
    }

    let next = edit_question(snapshot, question_id, |question| {
        let removed = question.choices.remove(position);
        if removed.is_correct
            && let Some(first) = question.choices.first_mut()
        {
            first.is_correct = true;
        }
    });
    guarded(snapshot, next)
}

/// Radio semantics: the target becomes the only correct choice of its question.
pub fn set_choice_correct(
    snapshot: &Questionnaire,
    question_id: QuestionId,
    choice_id: ChoiceId,
) -> Questionnaire {
    if !has_choice(snapshot, question_id, choice_id) {
        return snapshot.clone();
    }
    let next = edit_question(snapshot, question_id, |question| {
        for choice in &mut question.choices {
            choice.is_correct = choice.id == choice_id;
        }
    });
    guarded(snapshot, next)
}

pub fn set_choice_description(
    snapshot: &Questionnaire,
    question_id: QuestionId,
    choice_id: ChoiceId,
    text: impl Into<String>,
) -> Questionnaire {
    if !has_choice(snapshot, question_id, choice_id) {
        return snapshot.clone();
    }
    edit_question(snapshot, question_id, |question| {
        if let Some(choice) = question
            .choices
            .iter_mut()
            .find(|choice| choice.id == choice_id)
        {
            choice.description = text.into();
        }
    })
}

fn has_choice(snapshot: &Questionnaire, question_id: QuestionId, choice_id: ChoiceId) -> bool {
    snapshot
        .question(question_id)
        .is_some_and(|question| question.choice(choice_id).is_some())
}

fn edit_question(
    snapshot: &Questionnaire,
    question_id: QuestionId,
    edit: impl FnOnce(&mut Question),
) -> Questionnaire {
    let mut next = snapshot.clone();
    if let Some(question) = next.question_mut(question_id) {
        edit(question);
    }
    next
}

fn guarded(before: &Questionnaire, after: Questionnaire) -> Questionnaire {
    debug_assert!(
        invariants::check(before).is_err() || invariants::check(&after).is_ok(),
        "edit produced an invalid questionnaire: {:?}",
        invariants::check(&after)
    );
    after
}

/// A single edit expressed as data, so it can be queued, logged and replayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditOp {
    SetName {
        name: String,
    },
    AddQuestion,
    DuplicateQuestion {
        question_id: QuestionId,
    },
    DeleteQuestion {
        question_id: QuestionId,
    },
    SetQuestionName {
        question_id: QuestionId,
        text: String,
    },
    AddChoice {
        question_id: QuestionId,
    },
    DeleteChoice {
        question_id: QuestionId,
        choice_id: ChoiceId,
    },
    SetChoiceCorrect {
        question_id: QuestionId,
        choice_id: ChoiceId,
    },
    SetChoiceDescription {
        question_id: QuestionId,
        choice_id: ChoiceId,
        text: String,
    },
}

impl EditOp {
    pub fn apply(&self, snapshot: &Questionnaire) -> Questionnaire {
        match self {
            EditOp::SetName { name } => set_name(snapshot, name.clone()),
            EditOp::AddQuestion => add_question(snapshot),
            EditOp::DuplicateQuestion { question_id } => duplicate_question(snapshot, *question_id),
            EditOp::DeleteQuestion { question_id } => delete_question(snapshot, *question_id),
            EditOp::SetQuestionName { question_id, text } => {
                set_question_name(snapshot, *question_id, text.clone())
            }
            EditOp::AddChoice { question_id } => add_choice(snapshot, *question_id),
            EditOp::DeleteChoice {
                question_id,
                choice_id,
            } => delete_choice(snapshot, *question_id, *choice_id),
            EditOp::SetChoiceCorrect {
                question_id,
                choice_id,
            } => set_choice_correct(snapshot, *question_id, *choice_id),
            EditOp::SetChoiceDescription {
                question_id,
                choice_id,
                text,
            } => set_choice_description(snapshot, *question_id, *choice_id, text.clone()),
        }
    }

    /// Short label used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            EditOp::SetName { .. } => "set_name",
            EditOp::AddQuestion => "add_question",
            EditOp::DuplicateQuestion { .. } => "duplicate_question",
            EditOp::DeleteQuestion { .. } => "delete_question",
            EditOp::SetQuestionName { .. } => "set_question_name",
            EditOp::AddChoice { .. } => "add_choice",
            EditOp::DeleteChoice { .. } => "delete_choice",
            EditOp::SetChoiceCorrect { .. } => "set_choice_correct",
            EditOp::SetChoiceDescription { .. } => "set_choice_description",
        }
    }
}
