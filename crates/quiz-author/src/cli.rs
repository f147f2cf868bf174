use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::cmd::{self, replay::ReplayArgs};
use crate::logging;

#[derive(Parser, Debug)]
#[command(
    name = "quiz-author",
    about = "Replay questionnaire edit scripts and export finished documents",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Log debug events to stderr (overridden by QUIZ_AUTHOR_LOG)
    #[arg(long, short = 'v', global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply an edit script and print the resulting editor view
    Replay(ReplayArgs),
    /// Print the JSON Schema of the exported questionnaire document
    Schema,
}

pub fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    match cli.command {
        Commands::Replay(args) => cmd::replay::run(args),
        Commands::Schema => cmd::schema::run(),
    }
}
