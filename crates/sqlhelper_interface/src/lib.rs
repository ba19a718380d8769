//! Trait definitions for sqlhelper.
//!
//! Each external collaborator of an assistant run sits behind one of these
//! traits: the LLM service, the schema provider, the database session and
//! its cursors, the statement guard, and the terminal.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{
    Interaction, LlmDriver, Presenter, SchemaSource, SqlCursor, SqlSession, StatementGuard,
};
