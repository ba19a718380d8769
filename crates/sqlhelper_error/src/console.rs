//! Terminal interaction error types.

/// Console error kind variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ConsoleErrorKind {
    /// Failed to read a line of input
    #[display("Failed to read input: {}", _0)]
    Input(String),
    /// Failed to write output
    #[display("Failed to write output: {}", _0)]
    Output(String),
    /// The user interrupted or closed input while a question was required
    #[display("Input cancelled")]
    Cancelled,
}

/// Console error with source location tracking.
///
/// # Examples
///
/// ```
/// use sqlhelper_error::{ConsoleError, ConsoleErrorKind};
///
/// let err = ConsoleError::new(ConsoleErrorKind::Cancelled);
/// assert!(format!("{}", err).contains("cancelled"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Console Error: {} at line {} in {}", kind, line, file)]
pub struct ConsoleError {
    /// Error kind
    pub kind: ConsoleErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// File where error occurred
    pub file: &'static str,
}

impl ConsoleError {
    /// Create a new ConsoleError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ConsoleErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl From<std::io::Error> for ConsoleError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(ConsoleErrorKind::Output(err.to_string()))
    }
}

/// Result type for console operations.
pub type ConsoleResult<T> = Result<T, ConsoleError>;
