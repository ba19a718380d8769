use super::dto::OpenAiErrorEnvelope;
use crate::{OpenAiMessage, OpenAiRequest, OpenAiResponse, OpenAiRole};
use reqwest::{Client, StatusCode};
use sqlhelper_core::{GenerateRequest, GenerateResponse, LlmSettings, Output, Role};
use sqlhelper_error::{LlmError, LlmErrorKind, LlmResult, SqlHelperError};
use sqlhelper_interface::LlmDriver;
use tracing::{debug, error, instrument};

/// Default API base URL.
pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// Model used when none is configured.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";

/// OpenAI chat completions client.
///
/// Works with any OpenAI-compatible endpoint through the base URL.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl OpenAiClient {
    /// Creates a new client against the public OpenAI API.
    ///
    /// # Arguments
    ///
    /// * `api_key` - OpenAI API key
    /// * `model` - Model identifier (e.g., "gpt-3.5-turbo")
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_base_url(api_key, model, OPENAI_API_BASE)
    }

    /// Creates a new client against a specific base URL.
    pub fn with_base_url(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl AsRef<str>,
    ) -> Self {
        let endpoint = format!(
            "{}/chat/completions",
            base_url.as_ref().trim_end_matches('/')
        );
        debug!(endpoint = %endpoint, "Creating new OpenAI client");
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            endpoint,
        }
    }

    /// Creates a client from validated startup settings.
    pub fn from_settings(settings: &LlmSettings) -> Self {
        Self::with_base_url(&settings.api_key, &settings.model, &settings.base_url)
    }

    /// Full URL requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends a request to the chat completions endpoint.
    #[instrument(skip(self, request), fields(model = %request.model()))]
    pub async fn generate_openai(&self, request: &OpenAiRequest) -> LlmResult<OpenAiResponse> {
        debug!("Sending request to OpenAI API");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send request to OpenAI API");
                LlmError::new(LlmErrorKind::Http(format!("Request failed: {}", e)))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "OpenAI API returned error");
            return Err(LlmError::new(Self::classify_status(status, &body)));
        }

        let openai_response: OpenAiResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse OpenAI response");
            LlmError::new(LlmErrorKind::Parse(format!(
                "Failed to parse response: {}",
                e
            )))
        })?;

        debug!(response_id = %openai_response.id(), "Received response from OpenAI");
        Ok(openai_response)
    }

    /// Maps a non-success status and body to an error kind.
    pub(crate) fn classify_status(status: StatusCode, body: &str) -> LlmErrorKind {
        if status == StatusCode::TOO_MANY_REQUESTS {
            return LlmErrorKind::RateLimit;
        }
        let message = serde_json::from_str::<OpenAiErrorEnvelope>(body)
            .map(|envelope| envelope.error.message)
            .unwrap_or_else(|_| body.to_string());
        LlmErrorKind::Api {
            status: status.as_u16(),
            message,
        }
    }

    /// Converts a generic request to an OpenAI request.
    #[instrument(skip(self, request), fields(messages = request.messages.len()))]
    pub(crate) fn convert_request(&self, request: &GenerateRequest) -> LlmResult<OpenAiRequest> {
        debug!("Converting GenerateRequest to OpenAiRequest");

        let messages = request
            .messages
            .iter()
            .map(|msg| {
                let role = match msg.role {
                    Role::System => OpenAiRole::System,
                    Role::User => OpenAiRole::User,
                    Role::Assistant => OpenAiRole::Assistant,
                };
                OpenAiMessage::builder()
                    .role(role)
                    .content(msg.content.clone())
                    .build()
                    .map_err(|e| LlmError::new(LlmErrorKind::Builder(e.to_string())))
            })
            .collect::<LlmResult<Vec<_>>>()?;

        let model = request.model.clone().unwrap_or_else(|| self.model.clone());

        OpenAiRequest::builder()
            .model(model)
            .messages(messages)
            .temperature(request.temperature)
            .max_tokens(request.max_tokens)
            .build()
            .map_err(|e| LlmError::new(LlmErrorKind::Builder(e.to_string())))
    }

    /// Converts an OpenAI response to a generic response.
    ///
    /// Only the first choice is kept; its content is passed through untouched.
    pub(crate) fn convert_response(response: &OpenAiResponse) -> LlmResult<GenerateResponse> {
        let text = response
            .choices()
            .first()
            .and_then(|choice| choice.message().content().clone())
            .ok_or_else(|| LlmError::new(LlmErrorKind::EmptyResponse))?;

        Ok(GenerateResponse {
            outputs: vec![Output::Text(text)],
        })
    }
}

#[async_trait::async_trait]
impl LlmDriver for OpenAiClient {
    #[instrument(skip(self, request), fields(provider = "openai", model = %self.model))]
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, SqlHelperError> {
        let openai_request = self.convert_request(request)?;
        let openai_response = self.generate_openai(&openai_request).await?;
        if let Some(usage) = openai_response.usage() {
            debug!(
                prompt_tokens = usage.prompt_tokens(),
                completion_tokens = usage.completion_tokens(),
                "Token usage"
            );
        }
        let response = Self::convert_response(&openai_response)?;
        Ok(response)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlhelper_core::Message;

    fn client() -> OpenAiClient {
        OpenAiClient::with_base_url("sk-test", "gpt-test", "http://localhost:9999/v1/")
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        assert_eq!(
            client().endpoint(),
            "http://localhost:9999/v1/chat/completions"
        );
    }

    #[test]
    fn test_convert_request_keeps_message_order_and_roles() {
        let request = GenerateRequest::builder()
            .messages(vec![
                Message::new(Role::System, "instructions"),
                Message::new(Role::User, "schema"),
                Message::new(Role::User, "question"),
            ])
            .temperature(Some(0.2))
            .build()
            .unwrap();

        let converted = client().convert_request(&request).unwrap();
        let body = serde_json::to_value(&converted).unwrap();

        assert_eq!(body["model"], "gpt-test");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "schema");
        assert_eq!(body["messages"][2]["role"], "user");
        assert_eq!(body["messages"][2]["content"], "question");
        assert!(body.get("max_tokens").is_none());
    }

    #[test]
    fn test_convert_request_prefers_request_model() {
        let request = GenerateRequest::builder()
            .messages(vec![Message::new(Role::User, "hi")])
            .model(Some("gpt-4o".to_string()))
            .build()
            .unwrap();

        let converted = client().convert_request(&request).unwrap();
        assert_eq!(converted.model(), "gpt-4o");
    }

    #[test]
    fn test_convert_response_returns_first_choice_verbatim() {
        let raw = r#"{
            "id": "chatcmpl-1",
            "model": "gpt-test",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "```sql\nSELECT 1;\n```"}, "finish_reason": "stop"},
                {"index": 1, "message": {"role": "assistant", "content": "SELECT 2;"}, "finish_reason": "stop"}
            ],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        }"#;
        let response: OpenAiResponse = serde_json::from_str(raw).unwrap();

        let converted = OpenAiClient::convert_response(&response).unwrap();
        assert_eq!(converted.first_text(), Some("```sql\nSELECT 1;\n```"));
    }

    #[test]
    fn test_convert_response_without_choices_is_empty_response() {
        let response: OpenAiResponse =
            serde_json::from_str(r#"{"id": "x", "model": "m", "choices": []}"#).unwrap();

        let err = OpenAiClient::convert_response(&response).unwrap_err();
        assert_eq!(err.kind, LlmErrorKind::EmptyResponse);
    }

    #[test]
    fn test_classify_status() {
        assert_eq!(
            OpenAiClient::classify_status(StatusCode::TOO_MANY_REQUESTS, ""),
            LlmErrorKind::RateLimit
        );
        assert_eq!(
            OpenAiClient::classify_status(
                StatusCode::UNAUTHORIZED,
                r#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}"#
            ),
            LlmErrorKind::Api {
                status: 401,
                message: "Incorrect API key provided".to_string()
            }
        );
        assert_eq!(
            OpenAiClient::classify_status(StatusCode::BAD_GATEWAY, "upstream down"),
            LlmErrorKind::Api {
                status: 502,
                message: "upstream down".to_string()
            }
        );
    }
}
