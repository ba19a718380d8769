//! Query and row rendering.

use crate::{highlight_sql, render_table, terminal_width};
use serde_json::Value as JsonValue;
use sqlhelper_core::{GeneratedSql, OutputFormat, ResultPage};
use sqlhelper_error::ConsoleResult;
use sqlhelper_interface::Presenter;
use std::io::{IsTerminal, Write};

/// Render one row as a tuple-like line.
///
/// Strings are single-quoted, nulls print as `NULL`, a lone cell keeps its
/// trailing comma.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use sqlhelper_console::format_row;
///
/// assert_eq!(format_row(&[json!(1), json!("alice"), json!(null)]), "(1, 'alice', NULL)");
/// assert_eq!(format_row(&[json!(42)]), "(42,)");
/// ```
pub fn format_row(row: &[JsonValue]) -> String {
    let cells: Vec<String> = row.iter().map(plain_cell).collect();
    match cells.as_slice() {
        [single] => format!("({single},)"),
        _ => format!("({})", cells.join(", ")),
    }
}

fn plain_cell(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => "NULL".to_string(),
        JsonValue::String(s) => format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'")),
        other => other.to_string(),
    }
}

/// Prints the query and one tuple-like line per row.
pub struct PlainPresenter<W> {
    writer: W,
}

impl<W: Write> PlainPresenter<W> {
    /// Render to `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Presenter for PlainPresenter<W> {
    fn show_query(&mut self, sql: &GeneratedSql) -> ConsoleResult<()> {
        writeln!(self.writer, "Executing query:\n{sql}")?;
        self.writer.flush()?;
        Ok(())
    }

    fn show_rows(&mut self, page: &ResultPage) -> ConsoleResult<()> {
        for row in page.rows() {
            writeln!(self.writer, "{}", format_row(row))?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Highlights the query and draws rows as a table.
pub struct TablePresenter<W> {
    writer: W,
    width: Option<usize>,
    color: bool,
}

impl<W: Write> TablePresenter<W> {
    /// Render to `writer`, sizing tables to the terminal.
    pub fn new(writer: W, color: bool) -> Self {
        Self {
            writer,
            width: None,
            color,
        }
    }

    /// Use a fixed table width instead of the terminal's.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Presenter for TablePresenter<W> {
    fn show_query(&mut self, sql: &GeneratedSql) -> ConsoleResult<()> {
        let text = if self.color {
            highlight_sql(sql.as_str())
        } else {
            sql.as_str().to_string()
        };
        writeln!(self.writer, "Executing query:\n{text}")?;
        self.writer.flush()?;
        Ok(())
    }

    fn show_rows(&mut self, page: &ResultPage) -> ConsoleResult<()> {
        let width = self.width.unwrap_or_else(terminal_width);
        write!(self.writer, "{}", render_table(page, width))?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Presenter for the configured format, writing to stdout.
///
/// Table highlighting is enabled only when stdout is a terminal.
pub fn presenter_for(format: OutputFormat) -> Box<dyn Presenter> {
    let stdout = std::io::stdout();
    match format {
        OutputFormat::Plain => Box::new(PlainPresenter::new(stdout)),
        OutputFormat::Table => {
            let color = stdout.is_terminal();
            Box::new(TablePresenter::new(stdout, color))
        }
    }
}
