//! Startup configuration.
//!
//! Sources, later overriding earlier:
//!
//! 1. bundled defaults (`sqlhelper.toml` shipped with the binary),
//! 2. `~/.config/sqlhelper/sqlhelper.toml`, then `./sqlhelper.toml`, or the
//!    file given with `--config`,
//! 3. environment variables (after `.env` is loaded),
//! 4. command-line flags.
//!
//! Every required setting is checked before anything else runs, and all
//! missing ones are reported together.

use config::{Config, File, FileFormat};
use serde::Deserialize;
use sqlhelper_core::{
    AssistantConfig, DEFAULT_PAGE_SIZE, DatabaseSettings, DisplaySettings, LlmSettings,
    OutputFormat, RepairPolicy, SchemaSettings, SchemaSourceKind,
};
use sqlhelper_error::{ConfigError, SqlHelperResult};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../sqlhelper.toml");

/// Environment variables and the settings they fill.
const ENV_KEYS: [(&str, &str); 8] = [
    ("OPENAI_API_KEY", "llm.api_key"),
    ("OPENAI_MODEL", "llm.model"),
    ("OPENAI_BASE_URL", "llm.base_url"),
    ("DDL_PATH", "schema.ddl_path"),
    ("DATABASE_HOST", "database.host"),
    ("DATABASE_NAME", "database.name"),
    ("DATABASE_USER", "database.user"),
    ("DATABASE_PASSWORD", "database.password"),
];

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawLlm {
    api_key: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawDatabase {
    host: Option<String>,
    name: Option<String>,
    user: Option<String>,
    password: Option<String>,
    read_only: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSchema {
    source: SchemaSourceKind,
    ddl_path: Option<PathBuf>,
    pg_dump_program: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawDisplay {
    format: OutputFormat,
    page_size: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    llm: RawLlm,
    database: RawDatabase,
    schema: RawSchema,
    display: RawDisplay,
    repair: RepairPolicy,
}

/// Values given on the command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    /// Schema provider
    pub schema_source: Option<SchemaSourceKind>,
    /// Output format
    pub format: Option<OutputFormat>,
    /// First page size
    pub page_size: Option<usize>,
    /// Repair limit
    pub max_repairs: Option<u32>,
    /// Force read-only execution
    pub read_only: bool,
}

/// Assembles an [`AssistantConfig`] from every source.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    file: Option<PathBuf>,
    search_user_files: bool,
    env: HashMap<String, String>,
    overrides: ConfigOverrides,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Loader with bundled defaults and user files only.
    pub fn new() -> Self {
        Self {
            file: None,
            search_user_files: true,
            env: HashMap::new(),
            overrides: ConfigOverrides::default(),
        }
    }

    /// Loader reading the process environment.
    pub fn from_process_env() -> Self {
        Self::new().with_env(std::env::vars().collect())
    }

    /// Read this file instead of searching for user files.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Skip `./sqlhelper.toml` and the home directory file.
    pub fn without_user_files(mut self) -> Self {
        self.search_user_files = false;
        self
    }

    /// Use these environment variables.
    pub fn with_env(mut self, env: HashMap<String, String>) -> Self {
        self.env = env;
        self
    }

    /// Apply command-line values last.
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Load and validate.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming every missing required setting,
    /// or describing an unreadable file or invalid value.
    #[instrument(skip(self), fields(file = ?self.file))]
    pub fn load(&self) -> SqlHelperResult<AssistantConfig> {
        let raw = self.read_sources()?;
        validate(raw)
    }

    fn read_sources(&self) -> SqlHelperResult<RawConfig> {
        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(path) = &self.file {
            builder = builder.add_source(File::from(path.as_path()).required(true));
        } else if self.search_user_files {
            if let Some(home) = dirs::home_dir() {
                let home_config = home.join(".config/sqlhelper/sqlhelper.toml");
                builder = builder.add_source(File::from(home_config).required(false));
            }
            builder =
                builder.add_source(File::from(PathBuf::from("sqlhelper.toml")).required(false));
        }

        for (var, key) in ENV_KEYS {
            let value = self.env.get(var).filter(|v| !v.trim().is_empty()).cloned();
            if value.is_some() {
                debug!(var, "Using environment value");
            }
            builder = builder.set_override_option(key, value).map_err(config_error)?;
        }

        let overrides = &self.overrides;
        builder = builder
            .set_override_option("schema.source", overrides.schema_source.map(|s| s.to_string()))
            .and_then(|b| {
                b.set_override_option("display.format", overrides.format.map(|f| f.to_string()))
            })
            .and_then(|b| {
                b.set_override_option("display.page_size", overrides.page_size.map(|n| n as u64))
            })
            .and_then(|b| {
                b.set_override_option("repair.max_attempts", overrides.max_repairs.map(u64::from))
            })
            .map_err(config_error)?;
        if overrides.read_only {
            builder = builder
                .set_override("database.read_only", true)
                .map_err(config_error)?;
        }

        let raw = builder
            .build()
            .map_err(config_error)?
            .try_deserialize::<RawConfig>()
            .map_err(|e| ConfigError::new(format!("Invalid configuration: {e}")))?;
        Ok(raw)
    }
}

fn config_error(err: config::ConfigError) -> ConfigError {
    ConfigError::new(format!("Failed to read configuration: {err}"))
}

fn validate(raw: RawConfig) -> SqlHelperResult<AssistantConfig> {
    let mut missing = Vec::new();
    let mut require = |value: Option<String>, var: &str| -> String {
        match value {
            Some(v) => v,
            None => {
                missing.push(var.to_string());
                String::new()
            }
        }
    };

    let api_key = require(raw.llm.api_key, "OPENAI_API_KEY");
    if raw.schema.source == SchemaSourceKind::File && raw.schema.ddl_path.is_none() {
        require(None, "DDL_PATH");
    }
    let name = require(raw.database.name, "DATABASE_NAME");
    let user = require(raw.database.user, "DATABASE_USER");
    let password = require(raw.database.password, "DATABASE_PASSWORD");

    if !missing.is_empty() {
        return Err(ConfigError::missing(missing).into());
    }

    let page_size = raw.display.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
    if page_size == 0 {
        return Err(ConfigError::new("display.page_size must be at least 1").into());
    }

    Ok(AssistantConfig {
        llm: LlmSettings {
            api_key,
            model: raw
                .llm
                .model
                .unwrap_or_else(|| sqlhelper_models::DEFAULT_OPENAI_MODEL.to_string()),
            base_url: raw
                .llm
                .base_url
                .unwrap_or_else(|| sqlhelper_models::OPENAI_API_BASE.to_string()),
            temperature: raw.llm.temperature,
            max_tokens: raw.llm.max_tokens,
        },
        database: DatabaseSettings {
            host: raw.database.host.unwrap_or_else(|| "localhost".to_string()),
            name,
            user,
            password,
            read_only: raw.database.read_only,
        },
        schema: SchemaSettings {
            source: raw.schema.source,
            ddl_path: raw.schema.ddl_path,
            pg_dump_program: raw
                .schema
                .pg_dump_program
                .unwrap_or_else(|| "pg_dump".to_string()),
        },
        display: DisplaySettings {
            format: raw.display.format,
            page_size,
        },
        repair: raw.repair,
    })
}
