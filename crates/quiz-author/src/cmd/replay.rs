use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use quiz_lib::{EditOutcome, EditorConfig, EditorFrontend, EditorSession, QuizLibError};
use quiz_spec::QuestionnaireDocument;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::script::{EditScript, ResolvedStep};

#[derive(Args, Debug, Clone)]
pub struct ReplayArgs {
    /// Edit script to apply, steps addressing elements by position
    #[arg(value_name = "script.json")]
    pub script: PathBuf,
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
    /// Start from this session snapshot instead of a fresh questionnaire
    #[arg(long = "seed", value_name = "snapshot.json")]
    pub seed: Option<PathBuf>,
    /// Export the finished document after replay
    #[arg(long, default_value_t = false)]
    pub submit: bool,
    /// Write the exported document here instead of stdout
    #[arg(long = "out", value_name = "document.json", requires = "submit")]
    pub out: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl From<OutputFormat> for EditorFrontend {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => EditorFrontend::Text,
            OutputFormat::Json => EditorFrontend::JsonUi,
        }
    }
}

/// Counts of what happened while replaying a script.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub applied: usize,
    pub unchanged: usize,
    pub skipped: usize,
    pub cancelled: usize,
}

pub fn run(args: ReplayArgs) -> Result<()> {
    let script = load_script(&args.script)?;
    let seed_snapshot_json = args
        .seed
        .as_deref()
        .map(|path| {
            fs::read_to_string(path)
                .with_context(|| format!("failed to read seed snapshot {}", path.display()))
        })
        .transpose()?;

    let mut session = EditorSession::new(EditorConfig {
        seed_snapshot_json,
        frontend: args.format.into(),
    })
    .context("failed to start editing session")?;

    let summary = replay(&mut session, &script);
    info!(
        applied = summary.applied,
        unchanged = summary.unchanged,
        skipped = summary.skipped,
        cancelled = summary.cancelled,
        "script replayed"
    );

    println!("{}", session.render()?);

    if args.submit {
        submit(&session, args.out.as_deref())?;
    }
    Ok(())
}

pub fn load_script(path: &Path) -> Result<EditScript> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read edit script {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("edit script {} is not valid JSON", path.display()))
}

/// Applies every step in order; steps that address nothing are skipped.
pub fn replay(session: &mut EditorSession, script: &EditScript) -> ReplaySummary {
    let mut summary = ReplaySummary::default();
    for (index, step) in script.steps.iter().enumerate() {
        let snapshot = session.snapshot();
        match step.resolve(&snapshot) {
            Some(ResolvedStep::Edit(op)) => match session.apply(&op) {
                EditOutcome::Applied => summary.applied += 1,
                EditOutcome::Unchanged => {
                    debug!(step = index, op = step.as_str(), "step changed nothing");
                    summary.unchanged += 1;
                }
            },
            Some(ResolvedStep::Cancel) => {
                session.cancel();
                summary.cancelled += 1;
            }
            None => {
                warn!(
                    step = index,
                    op = step.as_str(),
                    "step addresses an element that does not exist; skipped"
                );
                summary.skipped += 1;
            }
        }
    }
    summary
}

fn submit(session: &EditorSession, out: Option<&Path>) -> Result<()> {
    let mut consumer = |document: &QuestionnaireDocument| -> Result<(), QuizLibError> {
        let json = document.to_json_pretty()?;
        match out {
            Some(path) => fs::write(path, format!("{json}\n")).map_err(|err| {
                QuizLibError::Consumer(format!("failed to write {}: {err}", path.display()))
            }),
            None => {
                println!("{json}");
                Ok(())
            }
        }
    };
    let result = session.submit(Some(&mut consumer))?;
    info!(
        questions = result.document.questions.len(),
        cbor_bytes = result.document_cbor_hex.len() / 2,
        "questionnaire exported"
    );
    Ok(())
}
