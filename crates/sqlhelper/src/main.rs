//! sqlhelper CLI binary.

use clap::Parser;
use sqlhelper::{Cli, ConfigLoader, LoopOutcome, init_tracing, run};
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Missing .env is fine; the process environment may hold everything.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut loader = ConfigLoader::from_process_env().with_overrides(cli.overrides());
    if let Some(path) = &cli.config {
        loader = loader.with_file(path);
    }

    let result = match loader.load() {
        Ok(config) => run(config, cli.question.clone()).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(report) => {
            if *report.outcome() != LoopOutcome::Succeeded {
                tracing::info!(
                    outcome = %report.outcome(),
                    attempts = report.attempts(),
                    "No results shown"
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
