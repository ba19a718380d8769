//! Configuration error types.

/// Configuration error with source location.
///
/// Validation collects every missing setting before failing, so a single
/// error can name several keys at once.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// Error message
    pub message: String,
    /// Names of required settings that were absent (empty for other failures)
    pub missing: Vec<String>,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use sqlhelper_error::ConfigError;
    ///
    /// let err = ConfigError::new("Invalid page size");
    /// assert!(err.message.contains("page size"));
    /// assert!(err.missing.is_empty());
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            missing: Vec::new(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// Create an error reporting every missing required setting.
    ///
    /// # Examples
    ///
    /// ```
    /// use sqlhelper_error::ConfigError;
    ///
    /// let err = ConfigError::missing(vec!["OPENAI_API_KEY".into(), "DATABASE_NAME".into()]);
    /// assert_eq!(err.missing.len(), 2);
    /// assert!(err.message.contains("OPENAI_API_KEY, DATABASE_NAME"));
    /// ```
    #[track_caller]
    pub fn missing(keys: Vec<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: format!("Missing required settings: {}", keys.join(", ")),
            missing: keys,
            line: location.line(),
            file: location.file(),
        }
    }
}
