//! Trait definitions for the collaborators of an assistant run.

use async_trait::async_trait;
use sqlhelper_core::{
    CheckedStatement, GenerateRequest, GenerateResponse, GeneratedSql, ResultPage, SchemaText,
};
use sqlhelper_error::{ConsoleResult, DatabaseResult, SqlHelperResult};

/// Core trait that all LLM backends must implement.
#[async_trait]
pub trait LlmDriver: Send + Sync {
    /// Generate model output for a chat request.
    async fn generate(&self, req: &GenerateRequest) -> SqlHelperResult<GenerateResponse>;

    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gpt-3.5-turbo").
    fn model_name(&self) -> &str;
}

/// Produces the schema text embedded in every prompt.
pub trait SchemaSource {
    /// Load the schema. Called once per run.
    fn load_schema(&self) -> SqlHelperResult<SchemaText>;

    /// Short description for logs (file path or dump target).
    fn describe(&self) -> String;
}

/// A database connection scope that hands out cursors.
///
/// Dropping the session releases the connection. Only `Send` is required:
/// a run never shares its connection between threads.
pub trait SqlSession: Send {
    /// Open a fresh cursor on this connection.
    ///
    /// The previous cursor must have been closed or dropped first; a cursor
    /// whose statement failed is never reused.
    fn open_cursor(&mut self) -> DatabaseResult<Box<dyn SqlCursor + '_>>;
}

/// A server-side cursor over one statement.
pub trait SqlCursor {
    /// Submit a statement.
    ///
    /// Errors whose kind is query-level are recoverable by the repair loop;
    /// any other error is fatal.
    fn execute(&mut self, statement: &CheckedStatement) -> DatabaseResult<()>;

    /// Fetch up to `count` further rows.
    fn fetch_many(&mut self, count: usize) -> DatabaseResult<ResultPage>;

    /// Fetch every remaining row.
    fn fetch_all(&mut self) -> DatabaseResult<ResultPage>;

    /// Release the cursor. Implementations must also release on drop when
    /// this is never called, and must never release twice.
    fn close(self: Box<Self>) -> DatabaseResult<()>;
}

/// Boundary between untrusted model output and the database.
///
/// Rejections should be query-level errors so the model gets a chance to
/// fix its answer.
pub trait StatementGuard: Send + Sync {
    /// Accept (possibly normalised) or reject a generated statement.
    fn check(&self, sql: &GeneratedSql) -> DatabaseResult<CheckedStatement>;
}

/// User decisions the loop depends on.
///
/// Injected so the loop runs the same against a terminal or a script.
pub trait Interaction {
    /// Ask for the natural-language question.
    fn ask_question(&mut self) -> ConsoleResult<String>;

    /// Ask whether to fetch and show the rows beyond the first page.
    fn confirm_show_all(&mut self) -> ConsoleResult<bool>;

    /// Show a query-level error and ask whether the assistant should fix it.
    fn confirm_repair(&mut self, error: &str) -> ConsoleResult<bool>;
}

/// Renders queries and rows.
pub trait Presenter {
    /// Show a candidate statement in its literal form before it runs.
    fn show_query(&mut self, sql: &GeneratedSql) -> ConsoleResult<()>;

    /// Show fetched rows.
    fn show_rows(&mut self, page: &ResultPage) -> ConsoleResult<()>;
}
