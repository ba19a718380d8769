//! LLM provider integrations for sqlhelper.
//!
//! Provides the OpenAI chat completions driver. Any OpenAI-compatible
//! endpoint can be targeted by changing the base URL.
//!
//! # Example
//!
//! ```no_run
//! use sqlhelper_models::OpenAiClient;
//! use sqlhelper_interface::LlmDriver;
//! use sqlhelper_core::{GenerateRequest, Message, Role};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OpenAiClient::new("sk-...", "gpt-3.5-turbo");
//! let request = GenerateRequest::builder()
//!     .messages(vec![Message::new(Role::User, "Write SELECT 1")])
//!     .build()?;
//! let response = client.generate(&request).await?;
//! println!("{:?}", response.first_text());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod openai;

pub use openai::{
    DEFAULT_OPENAI_MODEL, OPENAI_API_BASE, OpenAiChoice, OpenAiClient, OpenAiMessage,
    OpenAiMessageBuilder, OpenAiRequest, OpenAiRequestBuilder, OpenAiResponse,
    OpenAiResponseMessage, OpenAiRole, OpenAiUsage,
};
