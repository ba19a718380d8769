//! Query generation.

use sqlhelper_core::{
    GenerateRequest, GeneratedSql, LlmSettings, Prompt, QueryText, SchemaText,
};
use sqlhelper_error::{LlmError, LlmErrorKind, SqlHelperResult};
use sqlhelper_interface::LlmDriver;
use tracing::{debug, instrument};

/// Asks the model for a SQL statement answering a question about a schema.
///
/// The schema is loaded once and reused for every generation, including
/// repairs.
pub struct QueryGenerator<D> {
    driver: D,
    schema: SchemaText,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl<D: LlmDriver> QueryGenerator<D> {
    /// Create a generator with the driver's default sampling.
    pub fn new(driver: D, schema: SchemaText) -> Self {
        Self {
            driver,
            schema,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Create a generator using the configured sampling parameters.
    pub fn from_settings(driver: D, schema: SchemaText, settings: &LlmSettings) -> Self {
        Self {
            driver,
            schema,
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
        }
    }

    /// Schema text embedded in every prompt.
    pub fn schema(&self) -> &SchemaText {
        &self.schema
    }

    /// The driver requests are sent through.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Build the request for a question or repair text.
    pub fn build_request(&self, query: &QueryText) -> SqlHelperResult<GenerateRequest> {
        let prompt = Prompt::new(&self.schema, query);
        let request = GenerateRequest::builder()
            .messages(prompt.into_messages())
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .build()
            .map_err(|e| LlmError::new(LlmErrorKind::Builder(e.to_string())))?;
        Ok(request)
    }

    /// Generate a candidate statement.
    ///
    /// The first text output is returned exactly as the model wrote it.
    ///
    /// # Errors
    ///
    /// Fails with an LLM error when the service call fails or the response
    /// carries no text. Nothing is retried.
    #[instrument(
        skip(self, query),
        fields(
            provider = self.driver.provider_name(),
            model = self.driver.model_name(),
            repair = matches!(query, QueryText::Repair(_)),
        )
    )]
    pub async fn generate(&self, query: &QueryText) -> SqlHelperResult<GeneratedSql> {
        let request = self.build_request(query)?;
        let response = self.driver.generate(&request).await?;
        let text = response
            .first_text()
            .ok_or_else(|| LlmError::new(LlmErrorKind::EmptyResponse))?;
        debug!(chars = text.len(), "Generated candidate statement");
        Ok(GeneratedSql::new(text))
    }
}
