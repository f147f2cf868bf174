use std::sync::Arc;

use quiz_spec::edit;
use quiz_spec::{
    EditOp, InvariantViolation, Questionnaire, QuestionnaireDocument, RenderPayload,
    ValidationReport, blocking_errors, build_render_payload, invariants, validate,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub use quiz_spec::{DefaultQuizFrontend, QuizFrontend};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorFrontend {
    #[default]
    Text,
    JsonUi,
}

#[derive(Clone, Debug, Default)]
pub struct EditorConfig {
    /// Session snapshot (with ids) to start from instead of the initial value.
    pub seed_snapshot_json: Option<String>,
    pub frontend: EditorFrontend,
}

#[derive(Clone, Debug)]
pub struct SubmitResult {
    pub document: QuestionnaireDocument,
    pub document_cbor_hex: String,
}

/// Whether an edit produced a new snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    Applied,
    Unchanged,
}

#[derive(Debug, Error)]
pub enum QuizLibError {
    #[error("json parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("seed snapshot is inconsistent: {0}")]
    Invariant(#[from] InvariantViolation),
    #[error("submission blocked by {} field(s): {}", .0.len(), .0.join(", "))]
    Blocked(Vec<String>),
    #[error("submit consumer failed: {0}")]
    Consumer(String),
    #[error("cbor encoding failed: {0}")]
    Cbor(String),
}

/// External consumer of a finished document (logging, network call, ...).
pub type SubmitHandler<'a> = dyn FnMut(&QuestionnaireDocument) -> Result<(), QuizLibError> + 'a;

/// Single-writer editing session.
///
/// Each applied edit swaps in a new `Arc` snapshot and re-runs validation;
/// readers holding an older snapshot keep a complete tree.
pub struct EditorSession {
    current: Arc<Questionnaire>,
    report: ValidationReport,
    revision: u64,
    frontend: EditorFrontend,
}

impl EditorSession {
    pub fn new(config: EditorConfig) -> Result<Self, QuizLibError> {
        let snapshot = match config.seed_snapshot_json {
            Some(raw) => {
                let parsed: Questionnaire = serde_json::from_str(&raw)?;
                invariants::check(&parsed)?;
                debug!(questions = parsed.questions.len(), "seeded editing session");
                parsed
            }
            None => edit::reset(),
        };
        Ok(Self::from_snapshot(snapshot, config.frontend))
    }

    fn from_snapshot(snapshot: Questionnaire, frontend: EditorFrontend) -> Self {
        let report = validate(&snapshot);
        Self {
            current: Arc::new(snapshot),
            report,
            revision: 0,
            frontend,
        }
    }

    pub fn snapshot(&self) -> Arc<Questionnaire> {
        Arc::clone(&self.current)
    }

    /// Validation report of the current snapshot.
    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    /// Number of edits that produced a new snapshot since the session started.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn apply(&mut self, op: &EditOp) -> EditOutcome {
        let next = op.apply(&self.current);
        if next == *self.current {
            debug!(op = op.as_str(), revision = self.revision, "edit left snapshot unchanged");
            return EditOutcome::Unchanged;
        }
        self.replace(next);
        debug!(op = op.as_str(), revision = self.revision, "edit applied");
        EditOutcome::Applied
    }

    /// Discards every edit and restores a fresh initial snapshot.
    pub fn cancel(&mut self) {
        self.replace(edit::reset());
        info!(revision = self.revision, "editing session reset");
    }

    fn replace(&mut self, next: Questionnaire) {
        self.report = validate(&next);
        self.current = Arc::new(next);
        self.revision += 1;
    }

    pub fn render_payload(&self) -> RenderPayload {
        build_render_payload(&self.current, &self.report)
    }

    /// Renders the current snapshot with the default renderers.
    pub fn render(&self) -> Result<String, QuizLibError> {
        self.render_with(&DefaultQuizFrontend)
    }

    /// Renders the current snapshot through `frontend` in the configured format.
    pub fn render_with(&self, frontend: &dyn QuizFrontend) -> Result<String, QuizLibError> {
        let payload = self.render_payload();
        match self.frontend {
            EditorFrontend::Text => Ok(frontend.render_text_ui(&payload)),
            EditorFrontend::JsonUi => Ok(serde_json::to_string_pretty(
                &frontend.render_json_ui(&payload),
            )?),
        }
    }

    /// Field paths that currently block submission.
    pub fn blocking_fields(&self) -> Vec<String> {
        blocking_errors(&self.current, &self.report)
            .into_iter()
            .map(|error| error.path.to_string())
            .collect()
    }

    pub fn can_submit(&self) -> bool {
        self.blocking_fields().is_empty()
    }

    /// Hands the finished document to `consumer`, or logs it when none is given.
    pub fn submit(
        &self,
        consumer: Option<&mut SubmitHandler<'_>>,
    ) -> Result<SubmitResult, QuizLibError> {
        let blocking = self.blocking_fields();
        if !blocking.is_empty() {
            debug!(blocking = blocking.len(), "submission refused");
            return Err(QuizLibError::Blocked(blocking));
        }

        let document = QuestionnaireDocument::from(self.current.as_ref());
        let cbor = document
            .to_cbor()
            .map_err(|err| QuizLibError::Cbor(err.to_string()))?;

        match consumer {
            Some(consumer) => consumer(&document)?,
            None => {
                let payload = serde_json::to_string(&document)?;
                info!(document = %payload, "questionnaire submitted");
            }
        }

        Ok(SubmitResult {
            document,
            document_cbor_hex: encode_hex(&cbor),
        })
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::from_snapshot(edit::reset(), EditorFrontend::default())
    }
}

fn encode_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", byte);
    }
    out
}
