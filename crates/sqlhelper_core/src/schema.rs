//! Schema text loaded once per run.

/// The full DDL or filtered schema dump.
///
/// Immutable once loaded; every prompt embeds it verbatim.
///
/// # Examples
///
/// ```
/// use sqlhelper_core::SchemaText;
///
/// let schema = SchemaText::new("CREATE TABLE users (id int);");
/// assert_eq!(schema.as_str(), "CREATE TABLE users (id int);");
/// assert_eq!(schema.to_string(), "CREATE TABLE users (id int);");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub struct SchemaText(String);

impl SchemaText {
    /// Wrap loaded schema text.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Borrow the text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in bytes, for logging.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing was loaded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
