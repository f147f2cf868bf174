use quiz_lib::{EditOutcome, EditorConfig, EditorFrontend, EditorSession, QuizLibError};
use quiz_spec::{EditOp, QuestionId, QuestionnaireDocument};
use serde_json::Value;

fn fill(session: &mut EditorSession) {
    let snapshot = session.snapshot();
    let question = &snapshot.questions[0];
    let ops = [
        EditOp::SetName {
            name: "Quiz 1".into(),
        },
        EditOp::SetQuestionName {
            question_id: question.id,
            text: "Capital of France?".into(),
        },
        EditOp::SetChoiceDescription {
            question_id: question.id,
            choice_id: question.choices[0].id,
            text: "Paris".into(),
        },
        EditOp::SetChoiceDescription {
            question_id: question.id,
            choice_id: question.choices[1].id,
            text: "Lyon".into(),
        },
    ];
    for op in &ops {
        assert_eq!(session.apply(op), EditOutcome::Applied);
    }
}

#[test]
fn new_session_starts_from_initial_snapshot() {
    let session = EditorSession::new(EditorConfig::default()).expect("session");
    assert_eq!(session.revision(), 0);
    assert_eq!(session.snapshot().questions.len(), 1);
    assert!(!session.report().valid);
    assert!(!session.can_submit());
}

#[test]
fn applied_edits_bump_revision_and_revalidate() {
    let mut session = EditorSession::default();
    let outcome = session.apply(&EditOp::SetName {
        name: "Quiz".into(),
    });
    assert_eq!(outcome, EditOutcome::Applied);
    assert_eq!(session.revision(), 1);
    assert!(
        session
            .report()
            .errors
            .iter()
            .all(|error| error.path.to_string() != "name")
    );
}

#[test]
fn edits_on_missing_targets_leave_session_untouched() {
    let mut session = EditorSession::default();
    let before = session.snapshot();
    let outcome = session.apply(&EditOp::DeleteQuestion {
        question_id: QuestionId::generate(),
    });
    assert_eq!(outcome, EditOutcome::Unchanged);
    assert_eq!(session.revision(), 0);
    assert!(std::sync::Arc::ptr_eq(&before, &session.snapshot()));
}

#[test]
fn readers_keep_their_snapshot_after_edits() {
    let mut session = EditorSession::default();
    let held = session.snapshot();
    session.apply(&EditOp::AddQuestion);
    assert_eq!(held.questions.len(), 1);
    assert_eq!(session.snapshot().questions.len(), 2);
}

#[test]
fn submit_is_blocked_until_fields_are_filled() {
    let session = EditorSession::default();
    let err = session.submit(None).expect_err("blocked");
    match err {
        QuizLibError::Blocked(fields) => {
            assert_eq!(
                fields,
                vec!["name", "questions[0].name", "questions[0].choices[1].description"]
            );
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn submit_hands_document_to_consumer() {
    let mut session = EditorSession::default();
    fill(&mut session);
    assert!(session.can_submit());

    let mut received: Vec<QuestionnaireDocument> = Vec::new();
    let mut consumer = |document: &QuestionnaireDocument| {
        received.push(document.clone());
        Ok::<(), QuizLibError>(())
    };
    let result = session.submit(Some(&mut consumer)).expect("submit");

    assert_eq!(received.len(), 1);
    assert_eq!(received[0], result.document);
    assert_eq!(result.document.name, "Quiz 1");
    assert_eq!(result.document.questions[0].choices[0].description, "Paris");
    assert!(result.document.questions[0].choices[0].is_correct);
    assert!(!result.document_cbor_hex.is_empty());
}

#[test]
fn submit_without_consumer_still_returns_document() {
    let mut session = EditorSession::default();
    fill(&mut session);
    let result = session.submit(None).expect("submit");
    assert_eq!(result.document.questions.len(), 1);
}

#[test]
fn consumer_failure_is_reported() {
    let mut session = EditorSession::default();
    fill(&mut session);
    let mut consumer = |_: &QuestionnaireDocument| -> Result<(), QuizLibError> {
        Err(QuizLibError::Consumer("endpoint unavailable".into()))
    };
    let err = session.submit(Some(&mut consumer)).expect_err("consumer fails");
    assert!(matches!(err, QuizLibError::Consumer(_)));
}

#[test]
fn cancel_restores_fresh_initial_snapshot() {
    let mut session = EditorSession::default();
    let original_id = session.snapshot().questions[0].id;
    fill(&mut session);
    session.apply(&EditOp::AddQuestion);

    session.cancel();
    let snapshot = session.snapshot();
    assert_eq!(snapshot.name, "");
    assert_eq!(snapshot.questions.len(), 1);
    assert_ne!(snapshot.questions[0].id, original_id);
    assert!(!session.can_submit());
}

#[test]
fn seeded_session_uses_given_snapshot() {
    let seed = include_str!("fixtures/seed_snapshot.json");
    let session = EditorSession::new(EditorConfig {
        seed_snapshot_json: Some(seed.to_string()),
        frontend: EditorFrontend::Text,
    })
    .expect("seeded session");
    assert_eq!(session.snapshot().name, "Seeded");
    assert!(session.can_submit());
}

#[test]
fn seed_with_two_correct_choices_is_rejected() {
    let seed = include_str!("fixtures/seed_snapshot.json").replace("false", "true");
    let err = EditorSession::new(EditorConfig {
        seed_snapshot_json: Some(seed),
        frontend: EditorFrontend::Text,
    })
    .err()
    .expect("invalid seed");
    assert!(matches!(err, QuizLibError::Invariant(_)));
}

#[test]
fn malformed_seed_is_a_json_error() {
    let err = EditorSession::new(EditorConfig {
        seed_snapshot_json: Some("{".into()),
        frontend: EditorFrontend::Text,
    })
    .err()
    .expect("malformed seed");
    assert!(matches!(err, QuizLibError::Json(_)));
}

#[test]
fn json_frontend_renders_parseable_ui() {
    let session = EditorSession::new(EditorConfig {
        seed_snapshot_json: None,
        frontend: EditorFrontend::JsonUi,
    })
    .expect("session");
    let rendered = session.render().expect("render");
    let ui: Value = serde_json::from_str(&rendered).expect("json ui");
    assert_eq!(ui["status"], "need_input");
    assert_eq!(ui["questions"][0]["label"], "Question 1");
}

#[test]
fn text_frontend_renders_listing() {
    let session = EditorSession::default();
    let rendered = session.render().expect("render");
    assert!(rendered.contains("Questionnaire Detail"));
    assert!(rendered.contains("Blocking fields:"));
}
