//! PostgreSQL access for sqlhelper.
//!
//! Provides the connection scope ([`PgSession`]), server-side cursors that
//! page through arbitrary statements ([`PgCursor`]), and the two schema
//! providers ([`DdlFileSchema`], [`PgDumpSchema`]).

#![warn(missing_docs)]

mod connection;
mod cursor;
mod schema_source;
mod session;

pub use connection::establish_connection;
pub use cursor::PgCursor;
pub use schema_source::{DdlFileSchema, PgDumpSchema, filter_schema_dump, schema_source_for};
pub use session::PgSession;
