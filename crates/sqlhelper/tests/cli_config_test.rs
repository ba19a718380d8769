//! Command-line flags flowing into the loaded configuration.

use clap::Parser;
use sqlhelper::{Cli, ConfigLoader, OutputFormat, SchemaSourceKind, SqlHelperErrorKind};
use std::collections::HashMap;

fn env() -> HashMap<String, String> {
    [
        ("OPENAI_API_KEY", "sk-test"),
        ("OPENAI_MODEL", "gpt-4o-mini"),
        ("DATABASE_HOST", "db.example.com"),
        ("DATABASE_NAME", "shop"),
        ("DATABASE_USER", "app"),
        ("DATABASE_PASSWORD", "secret"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

#[test]
fn test_flags_override_config_file() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("sqlhelper.toml");
    std::fs::write(
        &path,
        "[schema]\nsource = \"file\"\nddl_path = \"/srv/schema.sql\"\n\n[display]\nformat = \"plain\"\npage_size = 50\n",
    )?;

    let cli = Cli::try_parse_from([
        "sqlhelper",
        "--config",
        path.to_str().unwrap_or_default(),
        "--format",
        "table",
        "--schema-source",
        "dump",
        "--read-only",
    ])?;

    let mut loader = ConfigLoader::new().with_env(env()).with_overrides(cli.overrides());
    if let Some(config) = &cli.config {
        loader = loader.with_file(config);
    }
    let config = loader.load()?;

    assert_eq!(config.schema.source, SchemaSourceKind::Dump);
    assert_eq!(
        config.schema.ddl_path.as_deref(),
        Some(std::path::Path::new("/srv/schema.sql"))
    );
    assert_eq!(config.display.format, OutputFormat::Table);
    assert_eq!(config.display.page_size, 50);
    assert_eq!(config.llm.model, "gpt-4o-mini");
    assert_eq!(config.database.host, "db.example.com");
    assert!(config.database.read_only);
    Ok(())
}

#[test]
fn test_file_source_without_ddl_path_is_reported() -> anyhow::Result<()> {
    let cli = Cli::try_parse_from(["sqlhelper", "--schema-source", "file"])?;
    let err = ConfigLoader::new()
        .without_user_files()
        .with_env(env())
        .with_overrides(cli.overrides())
        .load()
        .unwrap_err();

    match err.kind() {
        SqlHelperErrorKind::Config(config) => assert_eq!(config.missing, vec!["DDL_PATH"]),
        other => panic!("expected configuration error, got {other}"),
    }
    Ok(())
}

#[test]
fn test_verbose_raises_default_filter() {
    assert_eq!(sqlhelper::default_filter(false), "warn,sqlhelper=info");
    assert_eq!(sqlhelper::default_filter(true), "info,sqlhelper=debug");
}
