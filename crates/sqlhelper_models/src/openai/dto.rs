//! OpenAI chat completions data transfer objects.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// OpenAI message role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenAiRole {
    /// System message
    System,
    /// User message
    User,
    /// Assistant message
    Assistant,
}

/// OpenAI message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct OpenAiMessage {
    /// Message role
    role: OpenAiRole,
    /// Message content
    content: String,
}

impl OpenAiMessage {
    /// Creates a new builder for `OpenAiMessage`.
    pub fn builder() -> OpenAiMessageBuilder {
        OpenAiMessageBuilder::default()
    }
}

/// OpenAI chat completion request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct OpenAiRequest {
    /// Model identifier
    model: String,
    /// Conversation messages
    messages: Vec<OpenAiMessage>,
    /// Sampling temperature
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    /// Maximum tokens to generate
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

impl OpenAiRequest {
    /// Creates a new builder for `OpenAiRequest`.
    pub fn builder() -> OpenAiRequestBuilder {
        OpenAiRequestBuilder::default()
    }
}

/// Message returned inside a choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct OpenAiResponseMessage {
    /// Role of the author (always assistant)
    role: OpenAiRole,
    /// Completion text; absent for tool-call-only answers
    #[serde(default)]
    content: Option<String>,
}

/// One completion choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct OpenAiChoice {
    /// Position of the choice
    index: u32,
    /// Generated message
    message: OpenAiResponseMessage,
    /// Why generation stopped
    #[serde(default)]
    finish_reason: Option<String>,
}

/// Token usage statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct OpenAiUsage {
    /// Prompt tokens consumed
    #[serde(default)]
    prompt_tokens: u32,
    /// Completion tokens generated
    #[serde(default)]
    completion_tokens: u32,
    /// Total tokens billed
    #[serde(default)]
    total_tokens: u32,
}

/// OpenAI chat completion response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct OpenAiResponse {
    /// Response identifier
    #[serde(default)]
    id: String,
    /// Model that served the request
    #[serde(default)]
    model: String,
    /// Completion choices
    choices: Vec<OpenAiChoice>,
    /// Token usage (if reported)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    usage: Option<OpenAiUsage>,
}

/// Error envelope returned with non-success statuses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct OpenAiErrorEnvelope {
    pub(crate) error: OpenAiErrorBody,
}

/// Error details inside the envelope.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct OpenAiErrorBody {
    pub(crate) message: String,
}
