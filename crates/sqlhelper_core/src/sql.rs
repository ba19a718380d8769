//! SQL text as it moves from the model to the database.
//!
//! [`GeneratedSql`] is untrusted model output. It only reaches a cursor as a
//! [`CheckedStatement`], which a statement guard produces.

/// The model's latest answer, treated as a candidate SQL statement.
///
/// Kept exactly as received; it may contain prose or code fences when the
/// model does not follow its instructions.
///
/// # Examples
///
/// ```
/// use sqlhelper_core::GeneratedSql;
///
/// let sql = GeneratedSql::new("SELECT count(*) FROM users;");
/// assert_eq!(sql.as_str(), "SELECT count(*) FROM users;");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub struct GeneratedSql(String);

impl GeneratedSql {
    /// Wrap model output.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Borrow the literal text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A statement a guard has accepted for execution.
///
/// # Examples
///
/// ```
/// use sqlhelper_core::CheckedStatement;
///
/// let stmt = CheckedStatement::accepted("SELECT 1");
/// assert_eq!(stmt.as_str(), "SELECT 1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub struct CheckedStatement(String);

impl CheckedStatement {
    /// Record a statement as accepted by a guard.
    pub fn accepted(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Borrow the statement text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
