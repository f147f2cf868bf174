//! Edit scripts for the replay harness.
//!
//! Steps address questions and choices by their rendered position, the way a
//! person clicking through the editor would. Each step is resolved against the
//! live snapshot right before it runs, so positions always refer to the
//! current layout.

use quiz_spec::{ChoiceId, EditOp, QuestionId, Questionnaire};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditScript {
    #[serde(default)]
    pub steps: Vec<ScriptStep>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptStep {
    SetName {
        name: String,
    },
    AddQuestion,
    DuplicateQuestion {
        question: usize,
    },
    DeleteQuestion {
        question: usize,
    },
    SetQuestionName {
        question: usize,
        text: String,
    },
    AddChoice {
        question: usize,
    },
    DeleteChoice {
        question: usize,
        choice: usize,
    },
    SetChoiceCorrect {
        question: usize,
        choice: usize,
    },
    SetChoiceDescription {
        question: usize,
        choice: usize,
        text: String,
    },
    /// Discard everything and start over from a fresh questionnaire.
    Cancel,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolvedStep {
    Edit(EditOp),
    Cancel,
}

impl ScriptStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptStep::SetName { .. } => "set_name",
            ScriptStep::AddQuestion => "add_question",
            ScriptStep::DuplicateQuestion { .. } => "duplicate_question",
            ScriptStep::DeleteQuestion { .. } => "delete_question",
            ScriptStep::SetQuestionName { .. } => "set_question_name",
            ScriptStep::AddChoice { .. } => "add_choice",
            ScriptStep::DeleteChoice { .. } => "delete_choice",
            ScriptStep::SetChoiceCorrect { .. } => "set_choice_correct",
            ScriptStep::SetChoiceDescription { .. } => "set_choice_description",
            ScriptStep::Cancel => "cancel",
        }
    }

    /// Maps positions to ids in `snapshot`; `None` when a position is out of range.
    pub fn resolve(&self, snapshot: &Questionnaire) -> Option<ResolvedStep> {
        let op = match self {
            ScriptStep::Cancel => return Some(ResolvedStep::Cancel),
            ScriptStep::SetName { name } => EditOp::SetName { name: name.clone() },
            ScriptStep::AddQuestion => EditOp::AddQuestion,
            ScriptStep::DuplicateQuestion { question } => EditOp::DuplicateQuestion {
                question_id: question_at(snapshot, *question)?,
            },
            ScriptStep::DeleteQuestion { question } => EditOp::DeleteQuestion {
                question_id: question_at(snapshot, *question)?,
            },
            ScriptStep::SetQuestionName { question, text } => EditOp::SetQuestionName {
                question_id: question_at(snapshot, *question)?,
                text: text.clone(),
            },
            ScriptStep::AddChoice { question } => EditOp::AddChoice {
                question_id: question_at(snapshot, *question)?,
            },
            ScriptStep::DeleteChoice { question, choice } => {
                let (question_id, choice_id) = choice_at(snapshot, *question, *choice)?;
                EditOp::DeleteChoice {
                    question_id,
                    choice_id,
                }
            }
            ScriptStep::SetChoiceCorrect { question, choice } => {
                let (question_id, choice_id) = choice_at(snapshot, *question, *choice)?;
                EditOp::SetChoiceCorrect {
                    question_id,
                    choice_id,
                }
            }
            ScriptStep::SetChoiceDescription {
                question,
                choice,
                text,
            } => {
                let (question_id, choice_id) = choice_at(snapshot, *question, *choice)?;
                EditOp::SetChoiceDescription {
                    question_id,
                    choice_id,
                    text: text.clone(),
                }
            }
        };
        Some(ResolvedStep::Edit(op))
    }
}

fn question_at(snapshot: &Questionnaire, position: usize) -> Option<QuestionId> {
    snapshot.questions.get(position).map(|question| question.id)
}

fn choice_at(
    snapshot: &Questionnaire,
    question: usize,
    choice: usize,
) -> Option<(QuestionId, ChoiceId)> {
    let question = snapshot.questions.get(question)?;
    let choice = question.choices.get(choice)?;
    Some((question.id, choice.id))
}
