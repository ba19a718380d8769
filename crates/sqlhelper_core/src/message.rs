//! Message types for chat requests.

use crate::Role;
use serde::{Deserialize, Serialize};

/// A text message in a chat request.
///
/// # Examples
///
/// ```
/// use sqlhelper_core::{Message, MessageBuilder, Role};
///
/// let message = MessageBuilder::default()
///     .role(Role::User)
///     .content("How many users signed up today?")
///     .build()
///     .unwrap();
///
/// assert_eq!(message, Message::new(Role::User, "How many users signed up today?"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_builder::Builder)]
#[builder(setter(into))]
pub struct Message {
    /// The role of the message sender
    pub role: Role,
    /// The text of the message
    pub content: String,
}

impl Message {
    /// Create a message directly.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Creates a new builder for `Message`.
    pub fn builder() -> MessageBuilder {
        MessageBuilder::default()
    }
}
