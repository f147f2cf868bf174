//! Display policy: how raw validation errors surface next to the live snapshot.
//!
//! Errors are matched to fields by id, so a report computed for an older
//! snapshot never annotates a row that moved or vanished.

use crate::ids::{ChoiceId, QuestionId};
use crate::spec::questionnaire::Questionnaire;
use crate::validate::{FieldError, FieldPath, ValidationReport, is_blank};

pub const CORRECT_ANSWER_NOTE: &str = "This answer is correct";

/// What a renderer shows beneath a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldNote {
    /// Blocking required-field error.
    Error(String),
    /// Informational marker on the correct choice; never blocks submission.
    CorrectAnswer,
}

impl FieldNote {
    pub fn text(&self) -> &str {
        match self {
            FieldNote::Error(message) => message,
            FieldNote::CorrectAnswer => CORRECT_ANSWER_NOTE,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, FieldNote::Error(_))
    }
}

/// Resolves one reported error against the live snapshot.
///
/// Returns `None` when the field is gone or has been filled in since.
pub fn resolve(live: &Questionnaire, error: &FieldError) -> Option<FieldNote> {
    match error.path {
        FieldPath::Name => is_blank(&live.name).then(|| FieldNote::Error(error.message.clone())),
        FieldPath::QuestionName { .. } => {
            let question = live.question(error.question_id?)?;
            is_blank(&question.name).then(|| FieldNote::Error(error.message.clone()))
        }
        FieldPath::ChoiceDescription { .. } => {
            let question = live.question(error.question_id?)?;
            let choice = question.choice(error.choice_id?)?;
            if choice.is_correct {
                Some(FieldNote::CorrectAnswer)
            } else if is_blank(&choice.description) {
                Some(FieldNote::Error(error.message.clone()))
            } else {
                None
            }
        }
    }
}

/// Errors that still block submission once suppression rules are applied.
pub fn blocking_errors<'a>(live: &Questionnaire, report: &'a ValidationReport) -> Vec<&'a FieldError> {
    report
        .errors
        .iter()
        .filter(|error| resolve(live, error).is_some_and(|note| note.is_error()))
        .collect()
}

pub fn can_submit(live: &Questionnaire, report: &ValidationReport) -> bool {
    blocking_errors(live, report).is_empty()
}

pub fn name_note(live: &Questionnaire, report: &ValidationReport) -> Option<FieldNote> {
    report
        .errors
        .iter()
        .filter(|error| error.path == FieldPath::Name)
        .find_map(|error| resolve(live, error))
}

pub fn question_name_note(
    live: &Questionnaire,
    report: &ValidationReport,
    question_id: QuestionId,
) -> Option<FieldNote> {
    report
        .errors
        .iter()
        .filter(|error| {
            matches!(error.path, FieldPath::QuestionName { .. })
                && error.question_id == Some(question_id)
        })
        .find_map(|error| resolve(live, error))
}

/// The correct choice always carries its note, whether or not it was reported.
pub fn choice_description_note(
    live: &Questionnaire,
    report: &ValidationReport,
    question_id: QuestionId,
    choice_id: ChoiceId,
) -> Option<FieldNote> {
    let choice = live.question(question_id)?.choice(choice_id)?;
    if choice.is_correct {
        return Some(FieldNote::CorrectAnswer);
    }
    report
        .errors
        .iter()
        .filter(|error| error.question_id == Some(question_id) && error.choice_id == Some(choice_id))
        .find_map(|error| resolve(live, error))
}
