//! Request and response types for LLM generation.

use crate::Message;
use serde::{Deserialize, Serialize};

/// Generic chat generation request.
///
/// # Examples
///
/// ```
/// use sqlhelper_core::{GenerateRequest, Message, Role};
///
/// let request = GenerateRequest::builder()
///     .messages(vec![Message::new(Role::User, "Hello!")])
///     .temperature(Some(0.7))
///     .build()
///     .unwrap();
///
/// assert_eq!(request.messages.len(), 1);
/// assert_eq!(request.max_tokens, None);
/// ```
#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, Default, derive_builder::Builder,
)]
#[builder(default)]
pub struct GenerateRequest {
    /// The conversation messages to send
    pub messages: Vec<Message>,
    /// Maximum number of tokens to generate
    pub max_tokens: Option<u32>,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Model identifier to use (driver default when absent)
    pub model: Option<String>,
}

impl GenerateRequest {
    /// Creates a new builder for `GenerateRequest`.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }
}

/// Output produced by a model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Output {
    /// Plain text output.
    Text(String),
}

/// The unified response object.
///
/// # Examples
///
/// ```
/// use sqlhelper_core::{GenerateResponse, Output};
///
/// let response = GenerateResponse {
///     outputs: vec![Output::Text("SELECT 1".to_string())],
/// };
///
/// assert_eq!(response.first_text(), Some("SELECT 1"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// The generated outputs from the model
    pub outputs: Vec<Output>,
}

impl GenerateResponse {
    /// Text of the first output, verbatim.
    pub fn first_text(&self) -> Option<&str> {
        self.outputs.first().map(|output| match output {
            Output::Text(text) => text.as_str(),
        })
    }
}
