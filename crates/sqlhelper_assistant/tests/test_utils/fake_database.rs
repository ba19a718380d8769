//! In-memory SQL session with scripted statement outcomes.

use serde_json::json;
use sqlhelper_core::{CheckedStatement, ResultPage, Row};
use sqlhelper_error::{DatabaseError, DatabaseErrorKind, DatabaseResult};
use sqlhelper_interface::{SqlCursor, SqlSession};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// What executing a statement does.
#[derive(Debug, Clone)]
pub enum FakeResult {
    /// Succeeds with this many `(id, name)` rows
    Rows(usize),
    /// Fails with a query-level error
    QueryError(String),
    /// Executes, then fails with a query-level error on the first fetch
    FetchError(String),
    /// Fails with a connection error
    ConnectionLost,
}

/// Counters shared between a session and its cursors.
#[derive(Debug, Default, Clone)]
pub struct CursorStats {
    /// Cursors handed out
    pub opened: usize,
    /// Cursors released through `close`
    pub closed: usize,
    /// Cursors released by drop without `close`
    pub dropped_open: usize,
    /// Statements submitted, in order
    pub executed: Vec<String>,
    /// Calls to `fetch_all`
    pub fetch_all_calls: usize,
}

/// Session whose statements behave as scripted.
///
/// Unscripted statements succeed with one row.
pub struct FakeSession {
    outcomes: HashMap<String, FakeResult>,
    stats: Arc<Mutex<CursorStats>>,
    refuse_cursors: bool,
}

impl FakeSession {
    /// A session with no scripted statements.
    pub fn new() -> Self {
        Self {
            outcomes: HashMap::new(),
            stats: Arc::new(Mutex::new(CursorStats::default())),
            refuse_cursors: false,
        }
    }

    /// Script the outcome of a statement.
    pub fn on(mut self, statement: &str, outcome: FakeResult) -> Self {
        self.outcomes.insert(statement.to_string(), outcome);
        self
    }

    /// Make every `open_cursor` call fail with a connection error.
    pub fn refusing_cursors(mut self) -> Self {
        self.refuse_cursors = true;
        self
    }

    /// Snapshot of the counters.
    pub fn stats(&self) -> CursorStats {
        self.stats.lock().unwrap().clone()
    }
}

impl SqlSession for FakeSession {
    fn open_cursor(&mut self) -> DatabaseResult<Box<dyn SqlCursor + '_>> {
        if self.refuse_cursors {
            return Err(DatabaseError::new(DatabaseErrorKind::Connection(
                "server closed the connection unexpectedly".into(),
            )));
        }
        self.stats.lock().unwrap().opened += 1;
        Ok(Box::new(FakeCursor {
            outcomes: &self.outcomes,
            stats: Arc::clone(&self.stats),
            rows: VecDeque::new(),
            pending_fetch_error: None,
            released: false,
        }))
    }
}

struct FakeCursor<'s> {
    outcomes: &'s HashMap<String, FakeResult>,
    stats: Arc<Mutex<CursorStats>>,
    rows: VecDeque<Row>,
    pending_fetch_error: Option<String>,
    released: bool,
}

impl FakeCursor<'_> {
    fn take_fetch_error(&mut self) -> DatabaseResult<()> {
        match self.pending_fetch_error.take() {
            Some(message) => Err(DatabaseError::query(message)),
            None => Ok(()),
        }
    }

    fn page(rows: Vec<Row>) -> ResultPage {
        ResultPage::new(vec!["id".to_string(), "name".to_string()], rows)
    }
}

impl SqlCursor for FakeCursor<'_> {
    fn execute(&mut self, statement: &CheckedStatement) -> DatabaseResult<()> {
        self.stats
            .lock()
            .unwrap()
            .executed
            .push(statement.as_str().to_string());

        match self.outcomes.get(statement.as_str()).cloned() {
            None => {
                self.rows.push_back(vec![json!(1), json!("row 1")]);
                Ok(())
            }
            Some(FakeResult::Rows(count)) => {
                self.rows = (1..=count)
                    .map(|i| vec![json!(i), json!(format!("row {i}"))])
                    .collect();
                Ok(())
            }
            Some(FakeResult::QueryError(message)) => Err(DatabaseError::query(message)),
            Some(FakeResult::FetchError(message)) => {
                self.pending_fetch_error = Some(message);
                Ok(())
            }
            Some(FakeResult::ConnectionLost) => Err(DatabaseError::new(
                DatabaseErrorKind::Connection("connection reset by peer".into()),
            )),
        }
    }

    fn fetch_many(&mut self, count: usize) -> DatabaseResult<ResultPage> {
        self.take_fetch_error()?;
        let take = count.min(self.rows.len());
        Ok(Self::page(self.rows.drain(..take).collect()))
    }

    fn fetch_all(&mut self) -> DatabaseResult<ResultPage> {
        self.stats.lock().unwrap().fetch_all_calls += 1;
        self.take_fetch_error()?;
        Ok(Self::page(self.rows.drain(..).collect()))
    }

    fn close(mut self: Box<Self>) -> DatabaseResult<()> {
        self.released = true;
        self.stats.lock().unwrap().closed += 1;
        Ok(())
    }
}

impl Drop for FakeCursor<'_> {
    fn drop(&mut self) {
        if !self.released {
            self.stats.lock().unwrap().dropped_open += 1;
        }
    }
}
