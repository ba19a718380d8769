//! Settings assembled once at startup and handed to each component.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Rows shown before asking whether to fetch the rest.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Where the schema text comes from.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use sqlhelper_core::SchemaSourceKind;
///
/// assert_eq!(SchemaSourceKind::from_str("dump").unwrap(), SchemaSourceKind::Dump);
/// assert_eq!(SchemaSourceKind::default().to_string(), "file");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SchemaSourceKind {
    /// Read a pre-supplied DDL file
    #[default]
    File,
    /// Run the schema dump utility against the live database
    Dump,
}

/// How result rows are rendered.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    /// One tuple-like line per row
    #[default]
    Plain,
    /// Box-drawn table with a column header
    Table,
}

/// LLM completion service settings.
#[derive(Clone, PartialEq)]
pub struct LlmSettings {
    /// API key sent as a bearer token
    pub api_key: String,
    /// Model identifier
    pub model: String,
    /// API base URL, without the `/chat/completions` suffix
    pub base_url: String,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Completion token cap
    pub max_tokens: Option<u32>,
}

impl fmt::Debug for LlmSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmSettings")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

/// Database connection settings.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    /// Server host
    pub host: String,
    /// Database name
    pub name: String,
    /// Role to connect as
    pub user: String,
    /// Password for `user`
    pub password: String,
    /// Run every cursor inside a read-only transaction
    pub read_only: bool,
}

impl DatabaseSettings {
    /// libpq key/value connection string.
    ///
    /// # Examples
    ///
    /// ```
    /// use sqlhelper_core::DatabaseSettings;
    ///
    /// let settings = DatabaseSettings {
    ///     host: "localhost".into(),
    ///     name: "shop".into(),
    ///     user: "app".into(),
    ///     password: "it's secret".into(),
    ///     read_only: false,
    /// };
    /// assert_eq!(
    ///     settings.connection_string(),
    ///     r"host=localhost dbname=shop user=app password='it\'s secret'",
    /// );
    /// ```
    pub fn connection_string(&self) -> String {
        format!(
            "host={} dbname={} user={} password={}",
            quote_conninfo(&self.host),
            quote_conninfo(&self.name),
            quote_conninfo(&self.user),
            quote_conninfo(&self.password),
        )
    }
}

impl fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("host", &self.host)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("read_only", &self.read_only)
            .finish()
    }
}

// Empty values and values with whitespace, quotes or backslashes must be quoted.
fn quote_conninfo(value: &str) -> String {
    let needs_quotes = value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || c == '\'' || c == '\\');
    if !needs_quotes {
        return value.to_string();
    }
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{escaped}'")
}

/// Schema acquisition settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaSettings {
    /// Which provider to use
    pub source: SchemaSourceKind,
    /// DDL file for [`SchemaSourceKind::File`]
    pub ddl_path: Option<PathBuf>,
    /// Program run for [`SchemaSourceKind::Dump`]
    pub pg_dump_program: String,
}

/// Result display settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplaySettings {
    /// Plain lines or a table
    pub format: OutputFormat,
    /// Rows in the first page
    pub page_size: usize,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Bounds on the repair loop.
///
/// The default has no attempt limit and no backoff, so the loop runs for as
/// long as the user keeps accepting repairs.
///
/// # Examples
///
/// ```
/// use sqlhelper_core::RepairPolicy;
///
/// let policy = RepairPolicy::default();
/// assert!(policy.is_unbounded());
/// assert_eq!(policy.backoff_unit_ms, 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RepairPolicy {
    /// Maximum number of repair generations (None: unlimited)
    #[serde(default)]
    pub max_attempts: Option<u32>,
    /// Backoff unit in milliseconds; zero disables backoff
    #[serde(default)]
    pub backoff_unit_ms: u64,
    /// Upper bound for a single backoff delay in milliseconds
    #[serde(default)]
    pub backoff_max_ms: u64,
}

impl RepairPolicy {
    /// Whether repairs are limited only by the user.
    pub fn is_unbounded(&self) -> bool {
        self.max_attempts.is_none()
    }
}

/// Every setting of a run, validated at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct AssistantConfig {
    /// LLM service settings
    pub llm: LlmSettings,
    /// Database settings
    pub database: DatabaseSettings,
    /// Schema provider settings
    pub schema: SchemaSettings,
    /// Display settings
    pub display: DisplaySettings,
    /// Repair loop policy
    pub repair: RepairPolicy,
}
