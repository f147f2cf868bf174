use std::collections::BTreeSet;

use thiserror::Error;

use crate::ids::{ChoiceId, QuestionId};
use crate::spec::questionnaire::Questionnaire;

/// Structural defects that no sequence of edit operations may produce.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("question id {0} appears more than once")]
    DuplicateQuestionId(QuestionId),
    #[error("choice id {choice} appears more than once in question {question}")]
    DuplicateChoiceId {
        question: QuestionId,
        choice: ChoiceId,
    },
    #[error("question {0} has no choices")]
    NoChoices(QuestionId),
    #[error("question {0} has no correct choice")]
    NoCorrectChoice(QuestionId),
    #[error("question {question} has {count} correct choices")]
    MultipleCorrectChoices { question: QuestionId, count: usize },
}

/// Checks id uniqueness, the at-least-one-choice rule and the single-correct rule.
pub fn check(snapshot: &Questionnaire) -> Result<(), InvariantViolation> {
    let mut question_ids = BTreeSet::new();
    for question in &snapshot.questions {
        if !question_ids.insert(question.id) {
            return Err(InvariantViolation::DuplicateQuestionId(question.id));
        }
        if question.choices.is_empty() {
            return Err(InvariantViolation::NoChoices(question.id));
        }

        let mut choice_ids = BTreeSet::new();
        for choice in &question.choices {
            if !choice_ids.insert(choice.id) {
                return Err(InvariantViolation::DuplicateChoiceId {
                    question: question.id,
                    choice: choice.id,
                });
            }
        }

        match question.choices.iter().filter(|choice| choice.is_correct).count() {
            0 => return Err(InvariantViolation::NoCorrectChoice(question.id)),
            1 => {}
            count => {
                return Err(InvariantViolation::MultipleCorrectChoices {
                    question: question.id,
                    count,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::question::Question;

    #[test]
    fn initial_snapshot_is_valid() {
        assert_eq!(check(&Questionnaire::initial()), Ok(()));
    }

    #[test]
    fn reports_two_correct_choices() {
        let mut snapshot = Questionnaire::initial();
        snapshot.questions[0].choices[1].is_correct = true;
        assert!(matches!(
            check(&snapshot),
            Err(InvariantViolation::MultipleCorrectChoices { count: 2, .. })
        ));
    }

    #[test]
    fn reports_reused_choice_id() {
        let mut snapshot = Questionnaire::initial();
        let first = snapshot.questions[0].choices[0].id;
        snapshot.questions[0].choices[1].id = first;
        assert!(matches!(
            check(&snapshot),
            Err(InvariantViolation::DuplicateChoiceId { choice, .. }) if choice == first
        ));
    }

    #[test]
    fn reports_empty_question() {
        let mut question = Question::blank();
        question.choices.clear();
        let snapshot = Questionnaire {
            name: String::new(),
            questions: vec![question],
        };
        assert!(matches!(check(&snapshot), Err(InvariantViolation::NoChoices(_))));
    }
}
