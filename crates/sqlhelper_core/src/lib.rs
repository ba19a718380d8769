//! Core data types for sqlhelper.
//!
//! This crate provides the data shared by every stage of an assistant run:
//! chat messages and requests, the three-message prompt, schema text, the
//! generated SQL, result pages and the startup settings.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod message;
mod prompt;
mod request;
mod result_page;
mod role;
mod schema;
mod settings;
mod sql;

pub use message::{Message, MessageBuilder};
pub use prompt::{Prompt, QueryText, REPAIR_PREFIX, SYSTEM_INSTRUCTION};
pub use request::{GenerateRequest, GenerateRequestBuilder, GenerateResponse, Output};
pub use result_page::{ResultPage, Row};
pub use role::Role;
pub use schema::SchemaText;
pub use settings::{
    AssistantConfig, DEFAULT_PAGE_SIZE, DatabaseSettings, DisplaySettings, LlmSettings,
    OutputFormat, RepairPolicy, SchemaSettings, SchemaSourceKind,
};
pub use sql::{CheckedStatement, GeneratedSql};
