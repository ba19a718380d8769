//! Database connection scope.

use crate::PgCursor;
use diesel::pg::PgConnection;
use sqlhelper_error::DatabaseResult;
use sqlhelper_interface::{SqlCursor, SqlSession};
use tracing::{debug, instrument};

/// Owns the connection for the lifetime of a run.
///
/// The connection closes when the session is dropped, on every exit path.
pub struct PgSession {
    connection: PgConnection,
    read_only: bool,
    cursors_opened: u64,
}

impl PgSession {
    /// Wrap an established connection.
    pub fn new(connection: PgConnection, read_only: bool) -> Self {
        Self {
            connection,
            read_only,
            cursors_opened: 0,
        }
    }

    /// Number of cursors opened so far.
    pub fn cursors_opened(&self) -> u64 {
        self.cursors_opened
    }
}

impl SqlSession for PgSession {
    #[instrument(skip(self), fields(read_only = self.read_only))]
    fn open_cursor(&mut self) -> DatabaseResult<Box<dyn SqlCursor + '_>> {
        self.cursors_opened += 1;
        let name = format!("sqlhelper_cursor_{}", self.cursors_opened);
        let cursor = PgCursor::open(&mut self.connection, name, self.read_only)?;
        Ok(Box::new(cursor))
    }
}

impl Drop for PgSession {
    fn drop(&mut self) {
        debug!(cursors_opened = self.cursors_opened, "Closing database connection");
    }
}
