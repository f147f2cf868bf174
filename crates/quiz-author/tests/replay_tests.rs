use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn quiz_author() -> Command {
    let mut cmd = Command::cargo_bin("quiz-author").expect("binary built");
    cmd.env_remove("QUIZ_AUTHOR_LOG");
    cmd
}

#[test]
fn replay_prints_text_view() {
    quiz_author()
        .arg("replay")
        .arg(fixture("capital.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Questionnaire Detail"))
        .stdout(predicate::str::contains("Status: ready"))
        .stdout(predicate::str::contains("Question 1: Capital of France?"))
        .stdout(predicate::str::contains("(x): Paris"));
}

#[test]
fn unresolved_steps_are_logged_and_skipped() {
    quiz_author()
        .arg("replay")
        .arg(fixture("capital.json"))
        .assert()
        .success()
        .stderr(predicate::str::contains("does not exist; skipped"));
}

#[test]
fn replay_json_format_is_parseable() {
    let output = quiz_author()
        .args(["replay", "--format", "json"])
        .arg(fixture("incomplete.json"))
        .output()
        .expect("run replay");
    assert!(output.status.success());
    let ui: Value = serde_json::from_slice(&output.stdout).expect("json ui");
    assert_eq!(ui["status"], "need_input");
    assert_eq!(ui["name"]["value"], "Draft");
    assert_eq!(ui["questions"].as_array().map(Vec::len), Some(2));
    assert_eq!(ui["questions"][1]["label"], "Question 2");
}

#[test]
fn submit_writes_document_to_out() {
    let temp = TempDir::new().expect("tempdir");
    let out = temp.path().join("quiz.json");
    quiz_author()
        .arg("replay")
        .arg(fixture("capital.json"))
        .arg("--submit")
        .arg("--out")
        .arg(&out)
        .assert()
        .success();

    let raw = std::fs::read_to_string(&out).expect("document written");
    let document: Value = serde_json::from_str(&raw).expect("document json");
    assert_eq!(document["name"], "Quiz 1");
    let choices = document["questions"][0]["choices"]
        .as_array()
        .expect("choices");
    assert_eq!(choices.len(), 3);
    assert_eq!(choices[0]["description"], "Paris");
    assert_eq!(choices[0]["isCorrect"], true);
    assert!(document["questions"][0].get("id").is_none());
}

#[test]
fn submit_without_out_prints_document() {
    quiz_author()
        .arg("replay")
        .arg(fixture("capital.json"))
        .arg("--submit")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"description\": \"Marseille\""));
}

#[test]
fn blocked_submit_fails_with_field_list() {
    let temp = TempDir::new().expect("tempdir");
    let out = temp.path().join("quiz.json");
    quiz_author()
        .arg("replay")
        .arg(fixture("incomplete.json"))
        .arg("--submit")
        .arg("--out")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("submission blocked"))
        .stderr(predicate::str::contains("questions[1].name"));
    assert!(!out.exists());
}

#[test]
fn cancel_step_resets_session() {
    quiz_author()
        .arg("replay")
        .arg(fixture("cancel.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Name: <empty>"))
        .stdout(predicate::str::contains("Question 2").not());
}

#[test]
fn seeded_replay_submits_seed_content() {
    let temp = TempDir::new().expect("tempdir");
    let script = temp.path().join("empty.json");
    std::fs::write(&script, r#"{"steps": []}"#).expect("write script");
    quiz_author()
        .arg("replay")
        .arg(&script)
        .arg("--seed")
        .arg(fixture("seed_snapshot.json"))
        .arg("--submit")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"Seeded\""))
        .stdout(predicate::str::contains("Pacific"));
}

#[test]
fn missing_script_is_reported() {
    quiz_author()
        .args(["replay", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read edit script"));
}

#[test]
fn schema_describes_export_document() {
    let output = quiz_author()
        .arg("schema")
        .output()
        .expect("run schema");
    assert!(output.status.success());
    let schema: Value = serde_json::from_slice(&output.stdout).expect("schema json");
    assert_eq!(schema["title"], "QuestionnaireDocument");
    assert!(schema["properties"].get("questions").is_some());
}
