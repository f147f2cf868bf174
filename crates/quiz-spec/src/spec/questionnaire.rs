use serde::{Deserialize, Serialize};

use crate::ids::QuestionId;
use crate::spec::question::Question;

/// Root aggregate edited during one authoring session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Questionnaire {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl Questionnaire {
    /// Starting value of every session: no name and one blank question.
    pub fn initial() -> Self {
        Self {
            name: String::new(),
            questions: vec![Question::blank()],
        }
    }

    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|question| question.id == id)
    }

    pub fn question_position(&self, id: QuestionId) -> Option<usize> {
        self.questions.iter().position(|question| question.id == id)
    }

    pub(crate) fn question_mut(&mut self, id: QuestionId) -> Option<&mut Question> {
        self.questions.iter_mut().find(|question| question.id == id)
    }
}

impl Default for Questionnaire {
    fn default() -> Self {
        Self::initial()
    }
}
