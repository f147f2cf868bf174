use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_cbor::{to_vec, value::to_value};

use crate::spec::question::{Choice, Question};
use crate::spec::questionnaire::Questionnaire;

/// Choice as handed to submit consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceDocument {
    pub is_correct: bool,
    pub description: String,
}

/// Question as handed to submit consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct QuestionDocument {
    pub name: String,
    pub choices: Vec<ChoiceDocument>,
}

/// Finished questionnaire without session-only identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct QuestionnaireDocument {
    pub name: String,
    pub questions: Vec<QuestionDocument>,
}

impl QuestionnaireDocument {
    /// Serializes the document as canonical CBOR bytes.
    pub fn to_cbor(&self) -> Result<Vec<u8>, serde_cbor::Error> {
        let canonical = to_value(self)?;
        to_vec(&canonical)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl From<&Choice> for ChoiceDocument {
    fn from(choice: &Choice) -> Self {
        Self {
            is_correct: choice.is_correct,
            description: choice.description.clone(),
        }
    }
}

impl From<&Question> for QuestionDocument {
    fn from(question: &Question) -> Self {
        Self {
            name: question.name.clone(),
            choices: question.choices.iter().map(ChoiceDocument::from).collect(),
        }
    }
}

impl From<&Questionnaire> for QuestionnaireDocument {
    fn from(snapshot: &Questionnaire) -> Self {
        Self {
            name: snapshot.name.clone(),
            questions: snapshot
                .questions
                .iter()
                .map(QuestionDocument::from)
                .collect(),
        }
    }
}

/// JSON Schema of [`QuestionnaireDocument`].
pub fn document_schema() -> serde_json::Value {
    serde_json::to_value(schemars::schema_for!(QuestionnaireDocument)).unwrap_or_default()
}
