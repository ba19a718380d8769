//! Error types for sqlhelper.
//!
//! This crate provides the error types shared by every sqlhelper crate.
//!
//! # Error Hierarchy
//!
//! Errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - constructors use `#[track_caller]` for automatic location capture
//!
//! Only [`DatabaseErrorKind::Query`] is recoverable: it is the error the
//! repair loop hands back to the model. Everything else is fatal.
//!
//! # Examples
//!
//! ```
//! use sqlhelper_error::{ConfigError, SqlHelperResult};
//!
//! fn load() -> SqlHelperResult<String> {
//!     Err(ConfigError::new("OPENAI_API_KEY is not set"))?
//! }
//!
//! assert!(load().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod console;
mod database;
mod error;
mod llm;
mod schema;

pub use config::ConfigError;
pub use console::{ConsoleError, ConsoleErrorKind, ConsoleResult};
pub use database::{DatabaseError, DatabaseErrorKind, DatabaseResult};
pub use error::{SqlHelperError, SqlHelperErrorKind, SqlHelperResult};
pub use llm::{LlmError, LlmErrorKind, LlmResult};
pub use schema::{SchemaError, SchemaErrorKind};
