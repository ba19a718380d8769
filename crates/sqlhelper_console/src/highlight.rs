//! Keyword highlighting for echoed queries.

use crossterm::style::Stylize;

fn is_keyword(word: &str) -> bool {
    matches!(
        word.to_uppercase().as_str(),
        "SELECT" | "FROM" | "WHERE" | "INSERT" | "INTO" | "VALUES" | "UPDATE" | "SET"
            | "DELETE" | "CREATE" | "DROP" | "ALTER" | "TABLE" | "WITH" | "AND" | "OR"
            | "NOT" | "IN" | "LIKE" | "ILIKE" | "BETWEEN" | "IS" | "NULL" | "AS" | "ORDER"
            | "BY" | "GROUP" | "HAVING" | "LIMIT" | "OFFSET" | "JOIN" | "LEFT" | "RIGHT"
            | "INNER" | "OUTER" | "FULL" | "CROSS" | "ON" | "USING" | "DISTINCT" | "CASE"
            | "WHEN" | "THEN" | "ELSE" | "END" | "UNION" | "INTERSECT" | "EXCEPT" | "ALL"
            | "EXISTS" | "CAST" | "ASC" | "DESC" | "NULLS" | "FIRST" | "LAST" | "OVER"
            | "PARTITION" | "RETURNING" | "TRUE" | "FALSE"
    )
}

/// Style SQL keywords outside string literals and quoted identifiers.
///
/// Everything else is copied through unchanged, so stripping the styling
/// gives back the input.
pub fn highlight_sql(sql: &str) -> String {
    let mut out = String::with_capacity(sql.len() * 2);
    let mut word = String::new();
    let mut quote: Option<char> = None;

    for ch in sql.chars() {
        if let Some(q) = quote {
            out.push(ch);
            if ch == q {
                quote = None;
            }
            continue;
        }
        if ch.is_alphanumeric() || ch == '_' {
            word.push(ch);
            continue;
        }
        flush_word(&mut out, &mut word);
        if ch == '\'' || ch == '"' {
            quote = Some(ch);
        }
        out.push(ch);
    }
    flush_word(&mut out, &mut word);
    out
}

fn flush_word(out: &mut String, word: &mut String) {
    if word.is_empty() {
        return;
    }
    if is_keyword(word) {
        out.push_str(&word.as_str().cyan().bold().to_string());
    } else {
        out.push_str(word);
    }
    word.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_words_and_literals_are_untouched() {
        assert_eq!(highlight_sql("users.name = 'from'"), "users.name = 'from'");
    }

    #[test]
    fn test_keywords_are_styled() {
        let highlighted = highlight_sql("select id from users");
        assert!(highlighted.contains('\u{1b}'));
        assert!(highlighted.contains("select"));
        assert!(highlighted.ends_with(" users"));
    }

    #[test]
    fn test_keyword_inside_identifier_is_not_styled() {
        assert_eq!(highlight_sql("selection_count"), "selection_count");
    }
}
