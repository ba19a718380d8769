//! LLM completion service errors.

/// LLM service error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum LlmErrorKind {
    /// Transport failure (DNS, TLS, connection reset)
    #[display("HTTP error: {}", _0)]
    Http(String),
    /// Non-success status returned by the API
    #[display("API error {}: {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },
    /// Rate limit or quota exceeded
    #[display("Rate limit exceeded")]
    RateLimit,
    /// Response body could not be decoded
    #[display("Failed to parse response: {}", _0)]
    Parse(String),
    /// Response held no text completion
    #[display("Response contained no completion text")]
    EmptyResponse,
    /// Request or response builder failure
    #[display("Builder error: {}", _0)]
    Builder(String),
}

/// LLM error with location tracking.
///
/// # Examples
///
/// ```
/// use sqlhelper_error::{LlmError, LlmErrorKind};
///
/// let err = LlmError::new(LlmErrorKind::Api { status: 401, message: "bad key".into() });
/// assert!(format!("{}", err).contains("401"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("LLM Error: {} at {}:{}", kind, file, line)]
pub struct LlmError {
    /// The specific error kind
    pub kind: LlmErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// Source file where error occurred
    pub file: &'static str,
}

impl LlmError {
    /// Create a new LLM error.
    #[track_caller]
    pub fn new(kind: LlmErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<LlmErrorKind> for LlmError {
    #[track_caller]
    fn from(kind: LlmErrorKind) -> Self {
        Self::new(kind)
    }
}

/// Result type for LLM operations.
pub type LlmResult<T> = Result<T, LlmError>;
