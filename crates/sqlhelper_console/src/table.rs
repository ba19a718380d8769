//! Box-drawn result tables.

use serde_json::Value as JsonValue;
use sqlhelper_core::ResultPage;

/// Maximum column width before truncation
const MAX_COLUMN_WIDTH: usize = 32;

/// Minimum column width when resizing to fit the terminal
const MIN_COLUMN_WIDTH: usize = 6;

/// Terminal width, defaulting to 80 if unavailable.
pub fn terminal_width() -> usize {
    match crossterm::terminal::size() {
        Ok((width, _)) if width > 0 => usize::from(width),
        _ => 80,
    }
}

fn display_width(value: &str) -> usize {
    value.chars().count()
}

/// Truncate a string to max width with ellipsis.
fn truncate_value(value: &str, max_width: usize) -> String {
    if display_width(value) <= max_width {
        value.to_string()
    } else if max_width <= 3 {
        value.chars().take(max_width).collect()
    } else {
        let take = max_width - 3;
        format!("{}...", value.chars().take(take).collect::<String>())
    }
}

/// Cell text for table display.
pub(crate) fn table_cell(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => "NULL".to_string(),
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Shrink widths until the table fits `terminal_width`.
fn fit_widths(widths: &mut [usize], terminal_width: usize) {
    let column_count = widths.len();
    if column_count == 0 {
        return;
    }
    let border_padding = column_count * 3 + 1;
    let available = terminal_width
        .saturating_sub(border_padding)
        .max(column_count);

    let mut total: usize = widths.iter().sum();
    if total <= available {
        return;
    }
    for width in widths.iter_mut() {
        *width = (*width).min(MAX_COLUMN_WIDTH);
    }
    total = widths.iter().sum();

    while total > available {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(_, width)| **width > MIN_COLUMN_WIDTH)
            .max_by_key(|(_, width)| **width)
            .or_else(|| {
                widths
                    .iter()
                    .enumerate()
                    .filter(|(_, width)| **width > 1)
                    .max_by_key(|(_, width)| **width)
            })
            .map(|(idx, _)| idx);
        match widest {
            Some(idx) => widths[idx] -= 1,
            None => break,
        }
        total -= 1;
    }
}

fn border(out: &mut String, widths: &[usize], left: char, middle: char, right: char) {
    out.push(left);
    for (idx, width) in widths.iter().enumerate() {
        out.push_str(&"─".repeat(width + 2));
        out.push(if idx == widths.len() - 1 { right } else { middle });
    }
    out.push('\n');
}

fn line(out: &mut String, cells: &[String], widths: &[usize]) {
    out.push('│');
    for (cell, width) in cells.iter().zip(widths) {
        let truncated = truncate_value(cell, *width);
        out.push(' ');
        out.push_str(&format!("{truncated:width$}", width = *width));
        out.push_str(" │");
    }
    out.push('\n');
}

/// Render a page as a column-header table no wider than `terminal_width`.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use sqlhelper_console::render_table;
/// use sqlhelper_core::ResultPage;
///
/// let page = ResultPage::from_json_rows(vec![json!({"id": 1, "name": "alice"})]);
/// let table = render_table(&page, 80);
/// assert!(table.starts_with('┌'));
/// assert!(table.contains("│ 1  │ alice │"));
/// assert!(table.ends_with("(1 row)\n"));
/// ```
pub fn render_table(page: &ResultPage, terminal_width: usize) -> String {
    let columns = page.columns();
    let rows: Vec<Vec<String>> = page
        .rows()
        .iter()
        .map(|row| row.iter().map(table_cell).collect())
        .collect();

    let mut output = String::new();
    if !columns.is_empty() {
        let mut widths: Vec<usize> = columns.iter().map(|c| display_width(c)).collect();
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(display_width(cell));
            }
        }
        fit_widths(&mut widths, terminal_width);

        border(&mut output, &widths, '┌', '┬', '┐');
        line(&mut output, columns, &widths);
        border(&mut output, &widths, '├', '┼', '┤');
        for row in &rows {
            line(&mut output, row, &widths);
        }
        border(&mut output, &widths, '└', '┴', '┘');
    }

    let label = if rows.len() == 1 { "row" } else { "rows" };
    output.push_str(&format!("({} {})\n", rows.len(), label));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truncate_value() {
        assert_eq!(truncate_value("short", 10), "short");
        assert_eq!(truncate_value("abcdefghij", 6), "abc...");
        assert_eq!(truncate_value("abcdef", 2), "ab");
    }

    #[test]
    fn test_table_layout() {
        let page = ResultPage::from_json_rows(vec![
            json!({"id": 1, "name": "alice"}),
            json!({"id": 22, "name": null}),
        ]);
        let expected = "\
┌────┬───────┐
│ id │ name  │
├────┼───────┤
│ 1  │ alice │
│ 22 │ NULL  │
└────┴───────┘
(2 rows)
";
        assert_eq!(render_table(&page, 80), expected);
    }

    #[test]
    fn test_wide_columns_shrink_to_terminal() {
        let long = "x".repeat(100);
        let page = ResultPage::from_json_rows(vec![json!({"a": long, "b": long})]);
        let table = render_table(&page, 40);
        for line in table.lines() {
            assert!(line.chars().count() <= 40, "too wide: {line}");
        }
        assert!(table.contains("..."));
    }

    #[test]
    fn test_empty_page_prints_only_count() {
        assert_eq!(render_table(&ResultPage::default(), 80), "(0 rows)\n");
    }

    #[test]
    fn test_terminal_width_has_fallback() {
        assert!(terminal_width() > 0);
    }
}
