//! Database error types.

/// Database error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum DatabaseErrorKind {
    /// Connection could not be established or was lost
    #[display("Database connection error: {}", _0)]
    Connection(String),
    /// The statement itself is invalid (syntax, missing relation, access rule)
    #[display("{}", _0)]
    Query(String),
    /// The server refused the statement for a non-programming reason
    /// (constraint violation, serialization failure)
    #[display("Statement rejected: {}", _0)]
    Rejected(String),
    /// Transaction or cursor bookkeeping failed
    #[display("Transaction error: {}", _0)]
    Transaction(String),
    /// A result row could not be decoded
    #[display("Failed to decode row: {}", _0)]
    Decode(String),
}

impl DatabaseErrorKind {
    /// Whether this is a query-level (programming-class) error.
    ///
    /// These are the only database errors handed back to the model for repair.
    ///
    /// # Examples
    ///
    /// ```
    /// use sqlhelper_error::DatabaseErrorKind;
    ///
    /// assert!(DatabaseErrorKind::Query("syntax error".into()).is_query_level());
    /// assert!(!DatabaseErrorKind::Connection("reset".into()).is_query_level());
    /// ```
    pub fn is_query_level(&self) -> bool {
        matches!(self, DatabaseErrorKind::Query(_))
    }
}

/// Database error with source location tracking.
///
/// # Examples
///
/// ```
/// use sqlhelper_error::{DatabaseError, DatabaseErrorKind};
///
/// let err = DatabaseError::new(DatabaseErrorKind::Query("relation \"users\" does not exist".into()));
/// assert!(err.is_query_level());
/// assert_eq!(err.message(), "relation \"users\" does not exist");
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Database Error: {} at line {} in {}", kind, line, file)]
pub struct DatabaseError {
    /// The kind of error that occurred
    pub kind: DatabaseErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl DatabaseError {
    /// Create a new DatabaseError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: DatabaseErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for a query-level error.
    #[track_caller]
    pub fn query(message: impl Into<String>) -> Self {
        Self::new(DatabaseErrorKind::Query(message.into()))
    }

    /// Whether the repair loop may recover from this error.
    pub fn is_query_level(&self) -> bool {
        self.kind.is_query_level()
    }

    /// The server's message without location decoration.
    ///
    /// This is the text shown to the user and sent back to the model.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

/// Result type for database operations.
pub type DatabaseResult<T> = Result<T, DatabaseError>;

// Diesel error conversions (only available with database feature)
#[cfg(feature = "database")]
impl From<diesel::result::Error> for DatabaseError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        use diesel::result::DatabaseErrorKind as Pg;
        use diesel::result::Error;

        let kind = match err {
            Error::DatabaseError(Pg::Unknown | Pg::ReadOnlyTransaction, info) => {
                DatabaseErrorKind::Query(info.message().to_string())
            }
            Error::DatabaseError(Pg::ClosedConnection | Pg::UnableToSendCommand, info) => {
                DatabaseErrorKind::Connection(info.message().to_string())
            }
            Error::DatabaseError(_, info) => DatabaseErrorKind::Rejected(info.message().to_string()),
            Error::DeserializationError(e) => DatabaseErrorKind::Decode(e.to_string()),
            e @ (Error::AlreadyInTransaction
            | Error::NotInTransaction
            | Error::BrokenTransactionManager) => DatabaseErrorKind::Transaction(e.to_string()),
            other => DatabaseErrorKind::Connection(other.to_string()),
        };
        DatabaseError::new(kind)
    }
}

#[cfg(feature = "database")]
impl From<diesel::ConnectionError> for DatabaseError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        DatabaseError::new(DatabaseErrorKind::Connection(err.to_string()))
    }
}

#[cfg(all(test, feature = "database"))]
mod tests {
    use super::*;
    use diesel::result::{DatabaseErrorKind as Pg, Error};

    fn server_error(kind: Pg, message: &str) -> DatabaseError {
        DatabaseError::from(Error::DatabaseError(kind, Box::new(message.to_string())))
    }

    #[test]
    fn test_unclassified_server_errors_are_query_level() {
        let err = server_error(Pg::Unknown, "relation \"orders\" does not exist");
        assert_eq!(
            err.kind,
            DatabaseErrorKind::Query("relation \"orders\" does not exist".into())
        );

        // Data-class errors share diesel's Unknown bucket and are repairable too.
        assert!(server_error(Pg::Unknown, "division by zero").is_query_level());
        let read_only = "cannot execute INSERT in a read-only transaction";
        assert!(server_error(Pg::ReadOnlyTransaction, read_only).is_query_level());
    }

    #[test]
    fn test_constraint_and_connection_errors_are_fatal() {
        let err = server_error(Pg::UniqueViolation, "duplicate key value");
        assert_eq!(err.kind, DatabaseErrorKind::Rejected("duplicate key value".into()));

        let err = server_error(Pg::ClosedConnection, "server closed the connection");
        assert!(matches!(err.kind, DatabaseErrorKind::Connection(_)));
        assert!(!err.is_query_level());

        let err = DatabaseError::from(Error::NotInTransaction);
        assert!(matches!(err.kind, DatabaseErrorKind::Transaction(_)));
    }
}
