//! Top-level error wrapper types.

use crate::{ConfigError, ConsoleError, DatabaseError, LlmError, SchemaError};

/// Every error an assistant run can end with.
///
/// # Examples
///
/// ```
/// use sqlhelper_error::{SqlHelperError, SqlHelperErrorKind, ConfigError};
///
/// let err: SqlHelperError = ConfigError::new("bad value").into();
/// assert!(matches!(err.kind(), SqlHelperErrorKind::Config(_)));
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum SqlHelperErrorKind {
    /// Configuration error (missing or invalid settings)
    #[from(ConfigError)]
    Config(ConfigError),
    /// Schema acquisition error (file read or dump utility)
    #[from(SchemaError)]
    Schema(SchemaError),
    /// LLM completion service error
    #[from(LlmError)]
    Llm(LlmError),
    /// Database error
    #[from(DatabaseError)]
    Database(DatabaseError),
    /// Terminal interaction error
    #[from(ConsoleError)]
    Console(ConsoleError),
}

/// sqlhelper error with kind discrimination.
///
/// # Examples
///
/// ```
/// use sqlhelper_error::{SqlHelperResult, LlmError, LlmErrorKind};
///
/// fn complete() -> SqlHelperResult<String> {
///     Err(LlmError::new(LlmErrorKind::RateLimit))?
/// }
///
/// match complete() {
///     Ok(sql) => println!("{sql}"),
///     Err(e) => println!("Error: {e}"),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("sqlhelper Error: {}", _0)]
pub struct SqlHelperError(Box<SqlHelperErrorKind>);

impl SqlHelperError {
    /// Create a new error from a kind.
    pub fn new(kind: SqlHelperErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &SqlHelperErrorKind {
        &self.0
    }

    /// The database error inside, if any.
    pub fn as_database(&self) -> Option<&DatabaseError> {
        match self.kind() {
            SqlHelperErrorKind::Database(e) => Some(e),
            _ => None,
        }
    }
}

// Generic From implementation for any type that converts to SqlHelperErrorKind
impl<T> From<T> for SqlHelperError
where
    T: Into<SqlHelperErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for sqlhelper operations.
pub type SqlHelperResult<T> = std::result::Result<T, SqlHelperError>;
