//! OpenAI chat completions integration.

mod client;
mod dto;

pub use client::{DEFAULT_OPENAI_MODEL, OPENAI_API_BASE, OpenAiClient};
pub use dto::{
    OpenAiChoice, OpenAiMessage, OpenAiMessageBuilder, OpenAiRequest, OpenAiRequestBuilder,
    OpenAiResponse, OpenAiResponseMessage, OpenAiRole, OpenAiUsage,
};
