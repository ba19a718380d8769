//! Result rows fetched from a cursor.

use serde_json::Value as JsonValue;

/// One result row: cells in column order.
pub type Row = Vec<JsonValue>;

/// Ordered columns and rows of one fetch.
///
/// Column names may repeat (a join selecting `id` from two tables); each
/// row holds one cell per column, in column order.
#[derive(Debug, Clone, Default, PartialEq, derive_getters::Getters)]
pub struct ResultPage {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl ResultPage {
    /// Assemble a page from known columns and rows.
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// Convert JSON row objects into a page.
    ///
    /// Column order follows the first object's key order. Objects cannot
    /// carry repeated names, so use [`ResultPage::new`] when names may
    /// repeat. Non-object values become a single unnamed column.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use sqlhelper_core::ResultPage;
    ///
    /// let page = ResultPage::from_json_rows(vec![
    ///     json!({"id": 1, "name": "alice"}),
    ///     json!({"id": 2, "name": null}),
    /// ]);
    /// assert_eq!(page.columns(), &vec!["id".to_string(), "name".to_string()]);
    /// assert_eq!(page.len(), 2);
    /// assert_eq!(page.rows()[1][1], json!(null));
    /// ```
    pub fn from_json_rows(values: Vec<JsonValue>) -> Self {
        let columns: Vec<String> = match values.first() {
            Some(JsonValue::Object(first)) => first.keys().cloned().collect(),
            Some(_) => vec!["?column?".to_string()],
            None => Vec::new(),
        };

        let rows = values
            .into_iter()
            .map(|value| match value {
                JsonValue::Object(mut object) => columns
                    .iter()
                    .map(|column| object.remove(column).unwrap_or(JsonValue::Null))
                    .collect(),
                other => vec![other],
            })
            .collect();

        Self { columns, rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no rows were fetched.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
