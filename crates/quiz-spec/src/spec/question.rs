use serde::{Deserialize, Serialize};

use crate::ids::{ChoiceId, QuestionId};

/// One answer row of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    pub id: ChoiceId,
    pub is_correct: bool,
    #[serde(default)]
    pub description: String,
}

impl Choice {
    /// Creates an empty choice with a fresh identifier.
    pub fn new(is_correct: bool) -> Self {
        Self {
            id: ChoiceId::generate(),
            is_correct,
            description: String::new(),
        }
    }

    /// Copies correctness and description under a new identifier.
    pub fn duplicate(&self) -> Self {
        Self {
            id: ChoiceId::generate(),
            is_correct: self.is_correct,
            description: self.description.clone(),
        }
    }
}

/// A single question with its ordered answer choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: QuestionId,
    #[serde(default)]
    pub name: String,
    pub choices: Vec<Choice>,
}

impl Question {
    /// Empty question with two choices, the first one marked correct.
    pub fn blank() -> Self {
        Self {
            id: QuestionId::generate(),
            name: String::new(),
            choices: vec![Choice::new(true), Choice::new(false)],
        }
    }

    /// Deep copy where the question and every choice receive new identifiers.
    pub fn duplicate(&self) -> Self {
        Self {
            id: QuestionId::generate(),
            name: self.name.clone(),
            choices: self.choices.iter().map(Choice::duplicate).collect(),
        }
    }

    pub fn choice(&self, id: ChoiceId) -> Option<&Choice> {
        self.choices.iter().find(|choice| choice.id == id)
    }

    pub fn choice_position(&self, id: ChoiceId) -> Option<usize> {
        self.choices.iter().position(|choice| choice.id == id)
    }

    /// The choice currently marked correct, if any.
    pub fn correct_choice(&self) -> Option<&Choice> {
        self.choices.iter().find(|choice| choice.is_correct)
    }
}
