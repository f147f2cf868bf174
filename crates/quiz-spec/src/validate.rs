use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::{ChoiceId, QuestionId};
use crate::spec::questionnaire::Questionnaire;

pub const REQUIRED_MESSAGE: &str = "Please fill in this option";
pub const REQUIRED_CODE: &str = "required";

/// Positional address of a free-text field, as rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "field", rename_all = "snake_case")]
pub enum FieldPath {
    Name,
    QuestionName { question: usize },
    ChoiceDescription { question: usize, choice: usize },
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Name => f.write_str("name"),
            FieldPath::QuestionName { question } => write!(f, "questions[{question}].name"),
            FieldPath::ChoiceDescription { question, choice } => {
                write!(f, "questions[{question}].choices[{choice}].description")
            }
        }
    }
}

/// Raw per-field error produced by the gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub path: FieldPath,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_id: Option<QuestionId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choice_id: Option<ChoiceId>,
    pub message: String,
    pub code: String,
}

/// Result returned from [`validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl ValidationReport {
    pub fn error_at(&self, path: FieldPath) -> Option<&FieldError> {
        self.errors.iter().find(|error| error.path == path)
    }
}

/// Checks that every free-text field is non-empty after trimming.
///
/// Correct choices are reported like any other; hiding those errors is left to
/// [`crate::policy`].
pub fn validate(snapshot: &Questionnaire) -> ValidationReport {
    let mut errors = Vec::new();

    if is_blank(&snapshot.name) {
        errors.push(required(FieldPath::Name, None, None));
    }

    for (question_idx, question) in snapshot.questions.iter().enumerate() {
        if is_blank(&question.name) {
            errors.push(required(
                FieldPath::QuestionName {
                    question: question_idx,
                },
                Some(question.id),
                None,
            ));
        }
        for (choice_idx, choice) in question.choices.iter().enumerate() {
            if is_blank(&choice.description) {
                errors.push(required(
                    FieldPath::ChoiceDescription {
                        question: question_idx,
                        choice: choice_idx,
                    },
                    Some(question.id),
                    Some(choice.id),
                ));
            }
        }
    }

    ValidationReport {
        valid: errors.is_empty(),
        errors,
    }
}

pub(crate) fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

fn required(
    path: FieldPath,
    question_id: Option<QuestionId>,
    choice_id: Option<ChoiceId>,
) -> FieldError {
    FieldError {
        path,
        question_id,
        choice_id,
        message: REQUIRED_MESSAGE.into(),
        code: REQUIRED_CODE.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_paths_render_like_form_keys() {
        assert_eq!(FieldPath::Name.to_string(), "name");
        assert_eq!(
            FieldPath::QuestionName { question: 2 }.to_string(),
            "questions[2].name"
        );
        assert_eq!(
            FieldPath::ChoiceDescription {
                question: 0,
                choice: 1
            }
            .to_string(),
            "questions[0].choices[1].description"
        );
    }

    #[test]
    fn whitespace_counts_as_blank() {
        assert!(is_blank("   \t"));
        assert!(!is_blank(" x "));
    }
}
