//! Statement guards between model output and the database.

use sqlhelper_core::{CheckedStatement, GeneratedSql};
use sqlhelper_error::{DatabaseError, DatabaseResult};
use sqlhelper_interface::StatementGuard;
use std::ops::Range;
use tracing::debug;

/// Accepts any statement after normalising it for cursor embedding.
///
/// Surrounding whitespace, trailing semicolons and anything after the last
/// statement that is only comments are removed; nothing else is changed.
///
/// # Examples
///
/// ```
/// use sqlhelper_assistant::PassThroughGuard;
/// use sqlhelper_core::GeneratedSql;
/// use sqlhelper_interface::StatementGuard;
///
/// let checked = PassThroughGuard.check(&GeneratedSql::new("  SELECT 1;\n")).unwrap();
/// assert_eq!(checked.as_str(), "SELECT 1");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThroughGuard;

impl StatementGuard for PassThroughGuard {
    fn check(&self, sql: &GeneratedSql) -> DatabaseResult<CheckedStatement> {
        let statement = normalise(sql.as_str());
        if statement.is_empty() {
            return Err(DatabaseError::query("can't execute an empty query"));
        }
        Ok(CheckedStatement::accepted(statement))
    }
}

/// Rejects text holding more than one statement.
///
/// Semicolons inside string literals, quoted identifiers, dollar-quoted
/// bodies and comments do not count as separators. Rejections are
/// query-level, so the model is offered the chance to fix them.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleStatementGuard;

impl StatementGuard for SingleStatementGuard {
    fn check(&self, sql: &GeneratedSql) -> DatabaseResult<CheckedStatement> {
        let checked = PassThroughGuard.check(sql)?;
        let count = count_statements(checked.as_str());
        if count > 1 {
            debug!(count, "Rejected multi-statement text");
            return Err(DatabaseError::query(format!(
                "only one statement may be executed, found {count}"
            )));
        }
        Ok(checked)
    }
}

/// The text up to the end of its last statement, trimmed.
fn normalise(text: &str) -> &str {
    let end = segments(text)
        .iter()
        .rev()
        .find(|segment| segment.has_content)
        .map_or(0, |segment| segment.range.end);
    text[..end].trim()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    Code,
    SingleQuoted,
    DoubleQuoted,
    LineComment,
    BlockComment(usize),
}

/// Text between two top-level semicolons.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Segment {
    range: Range<usize>,
    /// Holds something besides whitespace and comments
    has_content: bool,
}

/// Number of non-empty statements separated by top-level semicolons.
fn count_statements(text: &str) -> usize {
    segments(text)
        .iter()
        .filter(|segment| segment.has_content)
        .count()
}

/// Split `text` at semicolons outside literals, quoted identifiers,
/// dollar-quoted bodies and comments.
fn segments(text: &str) -> Vec<Segment> {
    let bytes = text.as_bytes();
    let mut state = Scan::Code;
    let mut segments = Vec::new();
    let mut start = 0;
    let mut has_content = false;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        let next = bytes.get(i + 1).copied();
        match state {
            Scan::Code => match b {
                b'\'' => {
                    has_content = true;
                    state = Scan::SingleQuoted;
                }
                b'"' => {
                    has_content = true;
                    state = Scan::DoubleQuoted;
                }
                b'-' if next == Some(b'-') => {
                    state = Scan::LineComment;
                    i += 1;
                }
                b'/' if next == Some(b'*') => {
                    state = Scan::BlockComment(1);
                    i += 1;
                }
                b'$' => {
                    has_content = true;
                    if let Some(end) = dollar_quote_end(bytes, i) {
                        i = end;
                        continue;
                    }
                }
                b';' => {
                    segments.push(Segment {
                        range: start..i,
                        has_content,
                    });
                    start = i + 1;
                    has_content = false;
                }
                b if b.is_ascii_whitespace() => {}
                _ => has_content = true,
            },
            Scan::SingleQuoted => {
                if b == b'\'' {
                    if next == Some(b'\'') {
                        i += 1;
                    } else {
                        state = Scan::Code;
                    }
                }
            }
            Scan::DoubleQuoted => {
                if b == b'"' {
                    if next == Some(b'"') {
                        i += 1;
                    } else {
                        state = Scan::Code;
                    }
                }
            }
            Scan::LineComment => {
                if b == b'\n' {
                    state = Scan::Code;
                }
            }
            Scan::BlockComment(depth) => {
                if b == b'*' && next == Some(b'/') {
                    state = if depth == 1 {
                        Scan::Code
                    } else {
                        Scan::BlockComment(depth - 1)
                    };
                    i += 1;
                } else if b == b'/' && next == Some(b'*') {
                    state = Scan::BlockComment(depth + 1);
                    i += 1;
                }
            }
        }
        i += 1;
    }

    segments.push(Segment {
        range: start..bytes.len(),
        has_content,
    });
    segments
}

/// Index just past the closing tag of a dollar-quoted body opening at `start`.
///
/// Returns `None` when `start` does not open a dollar quote (for example a
/// positional parameter such as `$1`). An unterminated body runs to the end.
fn dollar_quote_end(bytes: &[u8], start: usize) -> Option<usize> {
    let tag_len = bytes[start + 1..]
        .iter()
        .position(|&b| b == b'$')?;
    let tag = &bytes[start..start + tag_len + 2];
    let tag_body = &tag[1..tag.len() - 1];
    let valid = tag_body
        .iter()
        .all(|&b| b.is_ascii_alphanumeric() || b == b'_' || !b.is_ascii())
        && !tag_body.first().is_some_and(|b| b.is_ascii_digit());
    if !valid {
        return None;
    }

    let body_start = start + tag.len();
    let end = bytes[body_start..]
        .windows(tag.len())
        .position(|window| window == tag)
        .map(|offset| body_start + offset + tag.len())
        .unwrap_or(bytes.len());
    Some(end)
}
