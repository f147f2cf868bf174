pub mod question;
pub mod questionnaire;

pub use question::{Choice, Question};
pub use questionnaire::Questionnaire;
