//! Database connection utilities.

use crate::PgSession;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use sqlhelper_core::DatabaseSettings;
use sqlhelper_error::{DatabaseError, DatabaseResult};
use tracing::{info, instrument};

/// Establish a connection to the configured PostgreSQL database.
///
/// # Errors
///
/// Returns a connection-level error (never query-level) when the server is
/// unreachable or rejects the credentials.
#[instrument(skip(settings), fields(host = %settings.host, database = %settings.name, user = %settings.user))]
pub fn establish_connection(settings: &DatabaseSettings) -> DatabaseResult<PgSession> {
    let connection =
        PgConnection::establish(&settings.connection_string()).map_err(DatabaseError::from)?;
    info!("Connected to database");
    Ok(PgSession::new(connection, settings.read_only))
}
