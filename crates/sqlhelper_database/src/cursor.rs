//! Server-side cursors over generated statements.
//!
//! Each cursor lives in its own transaction:
//!
//! ```text
//! BEGIN [READ ONLY]
//! DECLARE <name> NO SCROLL CURSOR FOR
//!   SELECT <keys of json_each(row_to_json(r))>   AS column_names,
//!          <values of json_each(row_to_json(r))> AS cell_values
//!   FROM (<stmt>) AS r
//! FETCH FORWARD <n> FROM <name>      -- first page
//! FETCH ALL FROM <name>              -- remainder, on request
//! CLOSE <name>; COMMIT               -- or ROLLBACK after a failure
//! ```
//!
//! Wrapping the statement in `row_to_json` lets arbitrary result shapes come
//! back as JSON, so no per-query row type is needed. The object is split back
//! into parallel name and value arrays with `json_each`, which walks the
//! `json` text as written: repeated column names (`id` from both sides of a
//! join, `?column?`) each keep their own cell, in select-list order, and
//! numeric literals keep their exact digits.

use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use serde_json::Value as JsonValue;
use sqlhelper_core::{CheckedStatement, ResultPage};
use sqlhelper_error::{DatabaseError, DatabaseErrorKind, DatabaseResult};
use sqlhelper_interface::SqlCursor;
use tracing::{debug, instrument, warn};

const ROW_ALIAS: &str = "sqlhelper_row";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CursorState {
    /// Transaction open, nothing declared yet
    Open,
    /// Statement declared, rows can be fetched
    Declared,
    /// A statement or fetch failed; the transaction is aborted
    Failed,
    /// Released
    Closed,
}

#[derive(QueryableByName)]
struct LabelledRow {
    #[diesel(sql_type = diesel::sql_types::Json)]
    column_names: JsonValue,
    #[diesel(sql_type = diesel::sql_types::Json)]
    cell_values: JsonValue,
}

/// A PostgreSQL server-side cursor borrowed from a [`crate::PgSession`].
pub struct PgCursor<'c> {
    conn: &'c mut PgConnection,
    name: String,
    state: CursorState,
}

impl<'c> PgCursor<'c> {
    /// Begin the cursor's transaction.
    #[instrument(skip(conn))]
    pub(crate) fn open(
        conn: &'c mut PgConnection,
        name: String,
        read_only: bool,
    ) -> DatabaseResult<Self> {
        let begin = if read_only { "BEGIN READ ONLY" } else { "BEGIN" };
        conn.batch_execute(begin)
            .map_err(|e| DatabaseError::new(DatabaseErrorKind::Transaction(e.to_string())))?;
        debug!("Cursor transaction started");
        Ok(Self {
            conn,
            name,
            state: CursorState::Open,
        })
    }

    /// Name of the server-side cursor.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn fail(&mut self, err: diesel::result::Error) -> DatabaseError {
        self.state = CursorState::Failed;
        let err = DatabaseError::from(err);
        debug!(error = %err.kind, "Cursor failed");
        err
    }

    fn fetch(&mut self, sql: &str) -> DatabaseResult<ResultPage> {
        if self.state != CursorState::Declared {
            return Err(DatabaseError::new(DatabaseErrorKind::Transaction(format!(
                "cursor {} has no statement to fetch from",
                self.name
            ))));
        }
        match diesel::sql_query(sql).load::<LabelledRow>(&mut *self.conn) {
            Ok(rows) => {
                debug!(count = rows.len(), "Fetched rows");
                decode_rows(rows)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    // Runs at most once: the state moves to Closed before the server call.
    fn release(&mut self) -> DatabaseResult<()> {
        let sql = match self.state {
            CursorState::Declared => format!("CLOSE {}; COMMIT", self.name),
            CursorState::Open | CursorState::Failed => "ROLLBACK".to_string(),
            CursorState::Closed => return Ok(()),
        };
        self.state = CursorState::Closed;
        debug!(cursor = %self.name, sql = %sql, "Releasing cursor");
        self.conn
            .batch_execute(&sql)
            .map_err(|e| DatabaseError::new(DatabaseErrorKind::Transaction(e.to_string())))
    }
}

/// The statement wrapped so every row arrives as a column-name array and a
/// cell array of the same length.
///
/// Newlines keep a trailing line comment in the statement from swallowing
/// the closing parenthesis.
pub(crate) fn declare_sql(cursor: &str, statement: &str) -> String {
    let each = format!(
        "FROM json_each(row_to_json({ROW_ALIAS})) WITH ORDINALITY AS field(name, cell, ord)"
    );
    format!(
        "DECLARE {cursor} NO SCROLL CURSOR FOR SELECT \
         (SELECT coalesce(json_agg(field.name ORDER BY field.ord), '[]') {each}) AS column_names, \
         (SELECT coalesce(json_agg(field.cell ORDER BY field.ord), '[]') {each}) AS cell_values \
         FROM (\n{statement}\n) AS {ROW_ALIAS}"
    )
}

fn decode_error(message: impl Into<String>) -> DatabaseError {
    DatabaseError::new(DatabaseErrorKind::Decode(message.into()))
}

/// Assemble fetched rows into a page; the first row names the columns.
fn decode_rows(rows: Vec<LabelledRow>) -> DatabaseResult<ResultPage> {
    let mut columns: Option<Vec<String>> = None;
    let mut cells = Vec::with_capacity(rows.len());

    for row in rows {
        let JsonValue::Array(values) = row.cell_values else {
            return Err(decode_error("cell values are not an array"));
        };
        if columns.is_none() {
            columns = Some(decode_column_names(row.column_names)?);
        }
        cells.push(values);
    }

    Ok(ResultPage::new(columns.unwrap_or_default(), cells))
}

fn decode_column_names(names: JsonValue) -> DatabaseResult<Vec<String>> {
    let JsonValue::Array(names) = names else {
        return Err(decode_error("column names are not an array"));
    };
    names
        .into_iter()
        .map(|name| match name {
            JsonValue::String(name) => Ok(name),
            other => Err(decode_error(format!("column name {other} is not a string"))),
        })
        .collect()
}

impl SqlCursor for PgCursor<'_> {
    #[instrument(skip(self, statement), fields(cursor = %self.name))]
    fn execute(&mut self, statement: &CheckedStatement) -> DatabaseResult<()> {
        if self.state != CursorState::Open {
            return Err(DatabaseError::new(DatabaseErrorKind::Transaction(format!(
                "cursor {} cannot run a second statement",
                self.name
            ))));
        }
        let sql = declare_sql(&self.name, statement.as_str());
        match self.conn.batch_execute(&sql) {
            Ok(()) => {
                self.state = CursorState::Declared;
                debug!("Statement declared");
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    fn fetch_many(&mut self, count: usize) -> DatabaseResult<ResultPage> {
        let sql = format!("FETCH FORWARD {} FROM {}", count, self.name);
        self.fetch(&sql)
    }

    fn fetch_all(&mut self) -> DatabaseResult<ResultPage> {
        let sql = format!("FETCH ALL FROM {}", self.name);
        self.fetch(&sql)
    }

    fn close(mut self: Box<Self>) -> DatabaseResult<()> {
        self.release()
    }
}

impl Drop for PgCursor<'_> {
    fn drop(&mut self) {
        if self.state != CursorState::Closed {
            if let Err(e) = self.release() {
                warn!(cursor = %self.name, error = %e, "Failed to release cursor on drop");
            }
        }
    }
}
