//! Cursor behavior against a live server.
//!
//! Requires DATABASE_HOST, DATABASE_NAME, DATABASE_USER and DATABASE_PASSWORD.

use serde_json::json;
use sqlhelper_core::{CheckedStatement, DatabaseSettings};
use sqlhelper_database::{PgSession, establish_connection};
use sqlhelper_error::DatabaseErrorKind;
use sqlhelper_interface::SqlSession;

fn session(read_only: bool) -> anyhow::Result<PgSession> {
    dotenvy::dotenv().ok();
    let settings = DatabaseSettings {
        host: std::env::var("DATABASE_HOST").unwrap_or_else(|_| "localhost".to_string()),
        name: std::env::var("DATABASE_NAME")?,
        user: std::env::var("DATABASE_USER")?,
        password: std::env::var("DATABASE_PASSWORD")?,
        read_only,
    };
    Ok(establish_connection(&settings)?)
}

#[test]
#[cfg_attr(not(feature = "postgres-tests"), ignore)]
fn test_first_page_then_remainder() -> anyhow::Result<()> {
    let mut session = session(false)?;
    let mut cursor = session.open_cursor()?;
    cursor.execute(&CheckedStatement::accepted(
        "SELECT n AS id, 'row ' || n AS label FROM generate_series(1, 25) AS n",
    ))?;

    let first = cursor.fetch_many(10)?;
    assert_eq!(first.columns(), &vec!["id".to_string(), "label".to_string()]);
    assert_eq!(first.len(), 10);
    assert_eq!(first.rows()[0][0], json!(1));

    let rest = cursor.fetch_all()?;
    assert_eq!(rest.len(), 15);
    assert_eq!(rest.rows()[0][0], json!(11));

    cursor.close()?;
    Ok(())
}

#[test]
#[cfg_attr(not(feature = "postgres-tests"), ignore)]
fn test_bad_statement_is_query_level_and_session_recovers() -> anyhow::Result<()> {
    let mut session = session(false)?;

    {
        let mut cursor = session.open_cursor()?;
        let err = cursor
            .execute(&CheckedStatement::accepted(
                "SELECT * FROM sqlhelper_no_such_table",
            ))
            .unwrap_err();
        assert!(err.is_query_level(), "unexpected kind: {:?}", err.kind);
        assert!(err.message().contains("sqlhelper_no_such_table"));
        cursor.close()?;
    }

    let mut cursor = session.open_cursor()?;
    cursor.execute(&CheckedStatement::accepted("SELECT 1 AS one"))?;
    assert_eq!(cursor.fetch_many(10)?.len(), 1);
    cursor.close()?;
    assert_eq!(session.cursors_opened(), 2);
    Ok(())
}

#[test]
#[cfg_attr(not(feature = "postgres-tests"), ignore)]
fn test_dropped_cursor_releases_transaction() -> anyhow::Result<()> {
    let mut session = session(false)?;
    {
        let mut cursor = session.open_cursor()?;
        cursor.execute(&CheckedStatement::accepted("SELECT 1 AS one"))?;
    }
    // A leaked transaction would make the next BEGIN fail.
    let mut cursor = session.open_cursor()?;
    cursor.execute(&CheckedStatement::accepted("SELECT 2 AS two"))?;
    cursor.close()?;
    Ok(())
}

#[test]
#[cfg_attr(not(feature = "postgres-tests"), ignore)]
fn test_read_only_session_refuses_writes() -> anyhow::Result<()> {
    let mut session = session(true)?;
    let mut cursor = session.open_cursor()?;
    let err = cursor
        .execute(&CheckedStatement::accepted(
            "CREATE TEMP TABLE sqlhelper_scratch (id int)",
        ))
        .unwrap_err();
    assert!(matches!(
        err.kind,
        DatabaseErrorKind::Query(_) | DatabaseErrorKind::Rejected(_)
    ));
    cursor.close()?;
    Ok(())
}

#[test]
#[cfg_attr(not(feature = "postgres-tests"), ignore)]
fn test_join_keeps_repeated_columns_and_exact_numerics() -> anyhow::Result<()> {
    let mut session = session(false)?;
    let mut cursor = session.open_cursor()?;
    cursor.execute(&CheckedStatement::accepted(
        "SELECT * FROM (VALUES (1, 'alice')) AS u(id, name) \
         JOIN (VALUES (100, 1, 1234.50::numeric(12,2))) AS o(id, user_id, total) \
         ON o.user_id = u.id",
    ))?;

    let page = cursor.fetch_all()?;
    assert_eq!(page.columns(), &vec!["id", "name", "id", "user_id", "total"]);
    assert_eq!(page.rows()[0][0], json!(1));
    assert_eq!(page.rows()[0][1], json!("alice"));
    assert_eq!(page.rows()[0][2], json!(100));
    assert_eq!(page.rows()[0][4].to_string(), "1234.50");
    cursor.close()?;
    Ok(())
}

#[test]
#[cfg_attr(not(feature = "postgres-tests"), ignore)]
fn test_unnamed_columns_are_all_returned() -> anyhow::Result<()> {
    let mut session = session(false)?;
    let mut cursor = session.open_cursor()?;
    cursor.execute(&CheckedStatement::accepted("SELECT 1, 2"))?;

    let page = cursor.fetch_many(10)?;
    assert_eq!(page.columns(), &vec!["?column?", "?column?"]);
    assert_eq!(page.rows()[0], vec![json!(1), json!(2)]);
    cursor.close()?;
    Ok(())
}

#[test]
#[cfg_attr(not(feature = "postgres-tests"), ignore)]
fn test_statement_ending_in_line_comment() -> anyhow::Result<()> {
    let mut session = session(false)?;
    let mut cursor = session.open_cursor()?;
    cursor.execute(&CheckedStatement::accepted(
        "SELECT name FROM (VALUES ('alice'), ('bob')) AS users(name) -- all users",
    ))?;
    assert_eq!(cursor.fetch_many(10)?.len(), 2);
    cursor.close()?;
    Ok(())
}
