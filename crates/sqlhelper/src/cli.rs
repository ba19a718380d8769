//! Command-line interface definition.

use clap::Parser;
use sqlhelper_core::{OutputFormat, SchemaSourceKind};
use std::path::PathBuf;
use std::str::FromStr;

use crate::ConfigOverrides;

/// sqlhelper - ask questions about a PostgreSQL database in plain language
#[derive(Parser, Debug)]
#[command(name = "sqlhelper")]
#[command(about = "Ask questions about a PostgreSQL database in plain language", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file to use instead of the default search
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Where the schema comes from: "file" (DDL_PATH) or "dump" (pg_dump)
    #[arg(long, value_parser = SchemaSourceKind::from_str)]
    pub schema_source: Option<SchemaSourceKind>,

    /// Result rendering: "plain" or "table"
    #[arg(long, value_parser = OutputFormat::from_str)]
    pub format: Option<OutputFormat>,

    /// Question to answer instead of prompting for one
    #[arg(long)]
    pub question: Option<String>,

    /// Rows shown before asking whether to show the rest
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub page_size: Option<u64>,

    /// Stop after this many repairs (default: ask every time)
    #[arg(long)]
    pub max_repairs: Option<u32>,

    /// Run queries in read-only transactions and refuse multiple statements
    #[arg(long)]
    pub read_only: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Configuration values given as flags.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            schema_source: self.schema_source,
            format: self.format,
            page_size: self.page_size.map(|n| n as usize),
            max_repairs: self.max_repairs,
            read_only: self.read_only,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags() {
        let cli = Cli::try_parse_from(["sqlhelper"]).unwrap();
        assert_eq!(cli.overrides(), ConfigOverrides::default());
        assert!(cli.question.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "sqlhelper",
            "--config",
            "custom.toml",
            "--schema-source",
            "dump",
            "--format",
            "table",
            "--question",
            "how many orders shipped last week?",
            "--page-size",
            "20",
            "--max-repairs",
            "3",
            "--read-only",
            "-v",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert_eq!(cli.question.as_deref(), Some("how many orders shipped last week?"));
        assert!(cli.verbose);
        assert_eq!(
            cli.overrides(),
            ConfigOverrides {
                schema_source: Some(SchemaSourceKind::Dump),
                format: Some(OutputFormat::Table),
                page_size: Some(20),
                max_repairs: Some(3),
                read_only: true,
            }
        );
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(Cli::try_parse_from(["sqlhelper", "--format", "csv"]).is_err());
        assert!(Cli::try_parse_from(["sqlhelper", "--schema-source", "ddl"]).is_err());
        assert!(Cli::try_parse_from(["sqlhelper", "--page-size", "0"]).is_err());
    }
}
