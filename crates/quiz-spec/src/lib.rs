#![allow(missing_docs)]

pub mod edit;
pub mod export;
pub mod frontend;
pub mod ids;
pub mod invariants;
pub mod policy;
pub mod render;
pub mod spec;
pub mod validate;

pub use edit::EditOp;
pub use export::{ChoiceDocument, QuestionDocument, QuestionnaireDocument, document_schema};
pub use frontend::{DefaultQuizFrontend, QuizFrontend};
pub use ids::{ChoiceId, QuestionId};
pub use invariants::InvariantViolation;
pub use policy::{FieldNote, blocking_errors, can_submit};
pub use render::{
    RenderChoice, RenderField, RenderPayload, RenderProgress, RenderQuestion, RenderStatus,
    build_render_payload, render_json_ui, render_text,
};
pub use spec::{Choice, Question, Questionnaire};
pub use validate::{FieldError, FieldPath, ValidationReport, validate};
