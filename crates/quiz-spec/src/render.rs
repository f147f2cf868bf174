use serde_json::{Map, Value, json};

use crate::ids::{ChoiceId, QuestionId};
use crate::policy::{self, FieldNote};
use crate::spec::questionnaire::Questionnaire;
use crate::validate::ValidationReport;

pub const FORM_TITLE: &str = "Questionnaire Detail";

/// Status labels returned by the renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    /// At least one field still blocks submission.
    NeedInput,
    /// The questionnaire can be submitted.
    Ready,
}

impl RenderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderStatus::NeedInput => "need_input",
            RenderStatus::Ready => "ready",
        }
    }
}

/// Counters over the fields that can block submission.
#[derive(Debug, Clone)]
pub struct RenderProgress {
    pub filled: usize,
    pub total: usize,
}

/// A text field together with the note shown beneath it.
#[derive(Debug, Clone)]
pub struct RenderField {
    pub value: String,
    pub note: Option<FieldNote>,
}

#[derive(Debug, Clone)]
pub struct RenderChoice {
    pub id: ChoiceId,
    pub is_correct: bool,
    pub description: RenderField,
}

#[derive(Debug, Clone)]
pub struct RenderQuestion {
    pub id: QuestionId,
    pub label: String,
    pub name: RenderField,
    pub choices: Vec<RenderChoice>,
}

/// Collected payload used by both text and JSON renderers.
#[derive(Debug, Clone)]
pub struct RenderPayload {
    pub title: String,
    pub status: RenderStatus,
    pub progress: RenderProgress,
    pub name: RenderField,
    pub questions: Vec<RenderQuestion>,
    pub blocking: Vec<String>,
}

/// Build the renderer payload from the live snapshot and its latest report.
pub fn build_render_payload(live: &Questionnaire, report: &ValidationReport) -> RenderPayload {
    let questions = live
        .questions
        .iter()
        .enumerate()
        .map(|(idx, question)| RenderQuestion {
            id: question.id,
            label: format!("Question {}", idx + 1),
            name: RenderField {
                value: question.name.clone(),
                note: policy::question_name_note(live, report, question.id),
            },
            choices: question
                .choices
                .iter()
                .map(|choice| RenderChoice {
                    id: choice.id,
                    is_correct: choice.is_correct,
                    description: RenderField {
                        value: choice.description.clone(),
                        note: policy::choice_description_note(
                            live,
                            report,
                            question.id,
                            choice.id,
                        ),
                    },
                })
                .collect(),
        })
        .collect::<Vec<_>>();

    let blocking = policy::blocking_errors(live, report)
        .into_iter()
        .map(|error| error.path.to_string())
        .collect::<Vec<_>>();

    let total = 1 + live
        .questions
        .iter()
        .map(|question| {
            1 + question
                .choices
                .iter()
                .filter(|choice| !choice.is_correct)
                .count()
        })
        .sum::<usize>();

    let status = if blocking.is_empty() {
        RenderStatus::Ready
    } else {
        RenderStatus::NeedInput
    };

    RenderPayload {
        title: FORM_TITLE.to_string(),
        status,
        progress: RenderProgress {
            filled: total.saturating_sub(blocking.len()),
            total,
        },
        name: RenderField {
            value: live.name.clone(),
            note: policy::name_note(live, report),
        },
        questions,
        blocking,
    }
}

/// Render the payload as a structured JSON-friendly value.
pub fn render_json_ui(payload: &RenderPayload) -> Value {
    let questions = payload
        .questions
        .iter()
        .map(|question| {
            let choices = question
                .choices
                .iter()
                .map(|choice| {
                    let mut map = Map::new();
                    map.insert("id".into(), Value::String(choice.id.to_string()));
                    map.insert("is_correct".into(), Value::Bool(choice.is_correct));
                    map.insert("description".into(), field_value(&choice.description));
                    Value::Object(map)
                })
                .collect::<Vec<_>>();

            let mut map = Map::new();
            map.insert("id".into(), Value::String(question.id.to_string()));
            map.insert("label".into(), Value::String(question.label.clone()));
            map.insert("name".into(), field_value(&question.name));
            map.insert("choices".into(), Value::Array(choices));
            Value::Object(map)
        })
        .collect::<Vec<_>>();

    json!({
        "title": payload.title,
        "status": payload.status.as_str(),
        "progress": {
            "filled": payload.progress.filled,
            "total": payload.progress.total,
        },
        "name": field_value(&payload.name),
        "questions": questions,
        "blocking": payload.blocking,
    })
}

fn field_value(field: &RenderField) -> Value {
    let mut entry = Map::new();
    entry.insert("value".into(), Value::String(field.value.clone()));
    match &field.note {
        Some(FieldNote::Error(message)) => {
            entry.insert("error".into(), Value::String(message.clone()));
        }
        Some(note @ FieldNote::CorrectAnswer) => {
            entry.insert("note".into(), Value::String(note.text().to_string()));
        }
        None => {}
    }
    Value::Object(entry)
}

/// Render the payload as human-friendly text.
pub fn render_text(payload: &RenderPayload) -> String {
    let mut lines = Vec::new();
    lines.push(payload.title.clone());
    lines.push(format!(
        "Status: {} ({}/{})",
        payload.status.as_str(),
        payload.progress.filled,
        payload.progress.total
    ));
    lines.push(field_line("Name", &payload.name));

    for question in &payload.questions {
        lines.push(String::new());
        lines.push(field_line(&question.label, &question.name));
        for choice in &question.choices {
            let marker = if choice.is_correct { "(x)" } else { "( )" };
            lines.push(field_line(&format!("  {marker}"), &choice.description));
        }
    }

    if !payload.blocking.is_empty() {
        lines.push(String::new());
        lines.push("Blocking fields:".to_string());
        for path in &payload.blocking {
            lines.push(format!(" - {path}"));
        }
    }

    lines.join("\n")
}

fn field_line(label: &str, field: &RenderField) -> String {
    let value = if field.value.is_empty() {
        "<empty>"
    } else {
        field.value.as_str()
    };
    match &field.note {
        Some(note @ FieldNote::Error(_)) => format!("{label}: {value}  [!] {}", note.text()),
        Some(note @ FieldNote::CorrectAnswer) => format!("{label}: {value}  [{}]", note.text()),
        None => format!("{label}: {value}"),
    }
}
