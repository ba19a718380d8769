//! sqlhelper - ask questions about a PostgreSQL database in plain language.
//!
//! A question is turned into SQL by an OpenAI-compatible model, given the
//! database schema as context. The statement runs on a cursor: the first
//! rows are shown, the rest on request. When the statement fails, the
//! error can be sent back to the model for a corrected statement, as many
//! times as the user agrees.
//!
//! # Architecture
//!
//! - `sqlhelper_error` - error types
//! - `sqlhelper_core` - prompts, settings and result pages
//! - `sqlhelper_interface` - traits at every external boundary
//! - `sqlhelper_models` - OpenAI chat completions driver
//! - `sqlhelper_database` - schema providers and PostgreSQL cursors
//! - `sqlhelper_assistant` - query generation and the repair loop
//! - `sqlhelper_console` - terminal prompts and result rendering
//!
//! This crate wires them together and provides the `sqlhelper` binary.

#![forbid(unsafe_code)]

pub mod cli;
mod config;
mod telemetry;

pub use cli::Cli;
pub use config::{ConfigLoader, ConfigOverrides};
pub use telemetry::{default_filter, init_tracing};

pub use sqlhelper_assistant::{LoopOutcome, LoopReport};
pub use sqlhelper_core::{AssistantConfig, OutputFormat, SchemaSourceKind};
pub use sqlhelper_error::{SqlHelperError, SqlHelperErrorKind, SqlHelperResult};

use sqlhelper_assistant::{PassThroughGuard, QueryGenerator, RepairLoop, SingleStatementGuard};
use sqlhelper_console::{
    BufferedSource, ConsoleInteraction, LineSource, RustylineSource, presenter_for,
};
use sqlhelper_database::{establish_connection, schema_source_for};
use sqlhelper_error::ConsoleResult;
use sqlhelper_interface::{Interaction, StatementGuard};
use sqlhelper_models::OpenAiClient;
use std::io::IsTerminal;
use tracing::{info, instrument};

/// Answer one question against the configured database.
///
/// The schema is loaded first, then the question is read (unless given),
/// then the database connection is opened. The connection is closed when
/// the loop ends, whatever the outcome.
///
/// # Errors
///
/// Returns schema, LLM, connection and terminal errors. Failing queries
/// are not errors: they end the run through the returned [`LoopReport`].
#[instrument(skip_all, fields(source = %config.schema.source, format = %config.display.format))]
pub async fn run(config: AssistantConfig, question: Option<String>) -> SqlHelperResult<LoopReport> {
    let provider = schema_source_for(&config.schema, &config.database);
    info!(source = %provider.describe(), "Loading schema");
    let schema = provider.load_schema()?;

    let driver = OpenAiClient::from_settings(&config.llm);
    let generator = QueryGenerator::from_settings(driver, schema, &config.llm);

    let mut interaction = ConsoleInteraction::new(line_source()?);
    if config.display.format == OutputFormat::Table {
        interaction = interaction.with_choice_prompts();
    }
    if let Some(question) = question {
        interaction = interaction.with_question(question);
    }
    let question = interaction.ask_question()?;

    let mut session = establish_connection(&config.database)?;
    let mut presenter = presenter_for(config.display.format);

    let guard: Box<dyn StatementGuard> = if config.database.read_only {
        Box::new(SingleStatementGuard)
    } else {
        Box::new(PassThroughGuard)
    };

    RepairLoop::new(&generator, guard.as_ref())
        .with_page_size(config.display.page_size)
        .with_policy(config.repair)
        .run(&question, &mut session, &mut interaction, presenter.as_mut())
        .await
}

/// Line editing on a terminal, plain buffered reads when input is piped.
fn line_source() -> ConsoleResult<Box<dyn LineSource>> {
    if std::io::stdin().is_terminal() {
        Ok(Box::new(RustylineSource::new()?))
    } else {
        Ok(Box::new(BufferedSource::new(
            std::io::stdin().lock(),
            std::io::stdout(),
        )))
    }
}
