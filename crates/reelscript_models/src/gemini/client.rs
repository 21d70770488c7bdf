//! Gemini REST client.

use super::conversion::{from_gemini_response, to_gemini_request};
use super::dto::GeminiResponse;
use crate::{LlmMetrics, classify_error};
use async_trait::async_trait;
use reelscript_core::{GenerateRequest, GenerateResponse, ModelConfig};
use reelscript_error::{GeminiError, GeminiErrorKind, ReelscriptResult};
use reelscript_interface::ReelscriptDriver;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Environment variable consulted when [`API_KEY_ENV`] is unset.
pub const FALLBACK_API_KEY_ENV: &str = "GOOGLE_GENAI_API_KEY";

const OPERATION: &str = "generate_content";

/// Client for the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model_name: String,
    temperature: Option<f32>,
    max_output_tokens: Option<u32>,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("model_name", &self.model_name)
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Create a client with the default model settings.
    ///
    /// Reads the API key from `GEMINI_API_KEY`, falling back to
    /// `GOOGLE_GENAI_API_KEY`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use reelscript_models::GeminiClient;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = GeminiClient::new()?;
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(name = "gemini_client_new")]
    pub fn new() -> ReelscriptResult<Self> {
        Self::from_config(&ModelConfig::default())
    }

    /// Create a client from model settings, reading the key from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiErrorKind::MissingApiKey`] when neither variable is set.
    #[instrument(name = "gemini_client_from_config", skip(config), fields(model = %config.name()))]
    pub fn from_config(config: &ModelConfig) -> ReelscriptResult<Self> {
        let api_key = [API_KEY_ENV, FALLBACK_API_KEY_ENV]
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|key| !key.trim().is_empty())
            .ok_or_else(|| GeminiError::new(GeminiErrorKind::MissingApiKey))?;

        Self::with_api_key(api_key, config)
    }

    /// Create a client with an explicit API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is blank or the HTTP client cannot be built.
    #[instrument(name = "gemini_client_with_api_key", skip_all, fields(model = %config.name()))]
    pub fn with_api_key(api_key: impl Into<String>, config: &ModelConfig) -> ReelscriptResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GeminiError::new(GeminiErrorKind::MissingApiKey).into());
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(*config.timeout_secs()))
            .build()
            .map_err(|e| GeminiError::new(GeminiErrorKind::ClientCreation(e.to_string())))?;

        debug!(base_url = %config.base_url(), "Created Gemini client");

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url().trim_end_matches('/').to_string(),
            model_name: config.name().clone(),
            temperature: Some(*config.temperature()),
            max_output_tokens: Some(*config.max_output_tokens()),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        let model = model.strip_prefix("models/").unwrap_or(model);
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    /// Pull the `error.message` field out of a Gemini error body.
    fn error_message(body: &str) -> String {
        serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| value["error"]["message"].as_str().map(str::to_string))
            .unwrap_or_else(|| body.trim().to_string())
    }

    /// Internal generate method that returns Gemini-specific errors.
    async fn generate_internal(
        &self,
        req: &GenerateRequest,
        model: &str,
    ) -> Result<GenerateResponse, GeminiError> {
        let body = to_gemini_request(req, self.temperature, self.max_output_tokens);
        let url = self.endpoint(model);
        debug!(url = %url, json_mode = req.response_schema.is_some(), "Sending Gemini request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GeminiError::new(GeminiErrorKind::ApiRequest(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GeminiError::new(GeminiErrorKind::HttpError {
                status_code: status.as_u16(),
                message: Self::error_message(&error_text),
            }));
        }

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::new(GeminiErrorKind::ResponseDecode(e.to_string())))?;

        if let Some(usage) = gemini_response.usage_metadata() {
            LlmMetrics::get().record_tokens(model, *usage.total_token_count());
        }

        from_gemini_response(&gemini_response)
    }
}

#[async_trait]
impl ReelscriptDriver for GeminiClient {
    #[instrument(skip(self, req), fields(provider = "gemini", model = tracing::field::Empty))]
    async fn generate(&self, req: &GenerateRequest) -> ReelscriptResult<GenerateResponse> {
        let model = req.model.as_deref().unwrap_or(self.model_name.as_str());
        tracing::Span::current().record("model", model);

        let start = Instant::now();
        let result = self.generate_internal(req, model).await;
        let metrics = LlmMetrics::get();

        match &result {
            Ok(_) => {
                metrics.record_request("gemini", model, OPERATION, start.elapsed().as_secs_f64());
            }
            Err(e) => {
                warn!(error = %e, "Gemini request failed");
                metrics.record_error("gemini", model, OPERATION, classify_error(e));
            }
        }

        result.map_err(Into::into)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GeminiClient {
        let config = ModelConfig::default().with_base_url("http://localhost:1234/v1beta/");
        GeminiClient::with_api_key("secret-key", &config).unwrap()
    }

    #[test]
    fn test_endpoint_strips_models_prefix() {
        let client = client();
        assert_eq!(
            client.endpoint("models/gemini-1.5-flash"),
            "http://localhost:1234/v1beta/models/gemini-1.5-flash:generateContent"
        );
        assert_eq!(
            client.endpoint("gemini-2.0-flash"),
            "http://localhost:1234/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn test_debug_hides_key() {
        let rendered = format!("{:?}", client());
        assert!(!rendered.contains("secret-key"));
        assert!(rendered.contains("gemini-2.0-flash"));
    }

    #[test]
    fn test_blank_key_is_rejected() {
        let err = GeminiClient::with_api_key("  ", &ModelConfig::default()).unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_error_message_extraction() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}}"#;
        assert_eq!(GeminiClient::error_message(body), "API key not valid.");
        assert_eq!(GeminiClient::error_message(" upstream down \n"), "upstream down");
    }
}
