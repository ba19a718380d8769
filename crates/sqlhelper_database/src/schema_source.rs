//! Schema providers: a DDL file or a live `pg_dump`.

use sqlhelper_core::{DatabaseSettings, SchemaSettings, SchemaSourceKind, SchemaText};
use sqlhelper_error::{ConfigError, SchemaError, SchemaErrorKind, SqlHelperResult};
use sqlhelper_interface::SchemaSource;
use std::path::PathBuf;
use std::process::Command;
use tracing::{debug, info, instrument};

/// Keep only the lines of a schema dump that carry definitions.
///
/// Drops lines that are blank after trimming and lines starting with `--`;
/// surviving lines keep their order and are joined with `\n`.
///
/// # Examples
///
/// ```
/// use sqlhelper_database::filter_schema_dump;
///
/// let dump = "--\n-- PostgreSQL database dump\n--\n\nCREATE TABLE users (\n    id integer\n);\n   \n";
/// assert_eq!(filter_schema_dump(dump), "CREATE TABLE users (\n    id integer\n);");
/// ```
pub fn filter_schema_dump(dump: &str) -> String {
    dump.lines()
        .filter(|line| !line.trim().is_empty() && !line.starts_with("--"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Reads the schema from a pre-supplied DDL file.
#[derive(Debug, Clone)]
pub struct DdlFileSchema {
    path: Option<PathBuf>,
}

impl DdlFileSchema {
    /// Create a provider for the given (possibly unset) path.
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

impl SchemaSource for DdlFileSchema {
    #[instrument(skip(self), fields(path = ?self.path))]
    fn load_schema(&self) -> SqlHelperResult<SchemaText> {
        let path = self
            .path
            .as_ref()
            .ok_or_else(|| ConfigError::missing(vec!["DDL_PATH".to_string()]))?;

        let text = std::fs::read_to_string(path).map_err(|e| {
            SchemaError::new(SchemaErrorKind::Io {
                path: path.display().to_string(),
                message: e.to_string(),
            })
        })?;

        info!(bytes = text.len(), "Loaded schema file");
        Ok(SchemaText::new(text))
    }

    fn describe(&self) -> String {
        match &self.path {
            Some(path) => format!("file {}", path.display()),
            None => "file <unset>".to_string(),
        }
    }
}

/// Dumps the live schema with `pg_dump --schema-only -x`.
#[derive(Debug, Clone)]
pub struct PgDumpSchema {
    program: String,
    database: DatabaseSettings,
}

impl PgDumpSchema {
    /// Create a provider dumping the configured database.
    pub fn new(program: impl Into<String>, database: DatabaseSettings) -> Self {
        Self {
            program: program.into(),
            database,
        }
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command
            .arg("--schema-only")
            .arg("-x")
            .arg("-h")
            .arg(&self.database.host)
            .arg("-U")
            .arg(&self.database.user)
            .arg(&self.database.name)
            .env("PGPASSWORD", &self.database.password);
        command
    }
}

impl SchemaSource for PgDumpSchema {
    #[instrument(skip(self), fields(program = %self.program, database = %self.database.name))]
    fn load_schema(&self) -> SqlHelperResult<SchemaText> {
        let output = self.command().output().map_err(|e| {
            SchemaError::new(SchemaErrorKind::ExternalProcess {
                program: self.program.clone(),
                message: e.to_string(),
            })
        })?;

        if !output.status.success() {
            return Err(SchemaError::new(SchemaErrorKind::ProcessFailed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
            .into());
        }

        let dump = String::from_utf8_lossy(&output.stdout);
        let schema = filter_schema_dump(&dump);
        debug!(raw_bytes = dump.len(), kept_bytes = schema.len(), "Filtered schema dump");
        Ok(SchemaText::new(schema))
    }

    fn describe(&self) -> String {
        format!("{} of {}@{}", self.program, self.database.name, self.database.host)
    }
}

/// Pick the provider the settings ask for.
pub fn schema_source_for(
    schema: &SchemaSettings,
    database: &DatabaseSettings,
) -> Box<dyn SchemaSource> {
    match schema.source {
        SchemaSourceKind::File => Box::new(DdlFileSchema::new(schema.ddl_path.clone())),
        SchemaSourceKind::Dump => Box::new(PgDumpSchema::new(
            schema.pg_dump_program.clone(),
            database.clone(),
        )),
    }
}
