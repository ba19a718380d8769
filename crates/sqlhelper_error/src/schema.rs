//! Schema acquisition error types.

/// Schema acquisition error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum SchemaErrorKind {
    /// The DDL file could not be read
    #[display("Failed to read schema file {}: {}", path, message)]
    Io {
        /// Path that was read
        path: String,
        /// Underlying I/O error message
        message: String,
    },
    /// The dump utility could not be started (missing binary, permissions)
    #[display("Failed to run {}: {}", program, message)]
    ExternalProcess {
        /// Program that was invoked
        program: String,
        /// Underlying spawn error message
        message: String,
    },
    /// The dump utility ran but exited unsuccessfully
    #[display("{} exited with {}: {}", program, status, stderr)]
    ProcessFailed {
        /// Program that was invoked
        program: String,
        /// Exit status description
        status: String,
        /// Captured standard error
        stderr: String,
    },
}

/// Schema error with source location tracking.
///
/// # Examples
///
/// ```
/// use sqlhelper_error::{SchemaError, SchemaErrorKind};
///
/// let err = SchemaError::new(SchemaErrorKind::ExternalProcess {
///     program: "pg_dump".into(),
///     message: "No such file or directory".into(),
/// });
/// assert!(format!("{}", err).contains("pg_dump"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Schema Error: {} at line {} in {}", kind, line, file)]
pub struct SchemaError {
    /// The kind of error that occurred
    pub kind: SchemaErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl SchemaError {
    /// Create a new SchemaError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SchemaErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
