//! Request and response types for model generation.

use crate::{Message, Output};
use serde::{Deserialize, Serialize};

/// Generation request handed to a driver.
///
/// # Examples
///
/// ```
/// use reelscript_core::{GenerateRequest, Message};
///
/// let request = GenerateRequest::builder()
///     .messages(vec![Message::user("Hello!")])
///     .temperature(Some(0.9))
///     .build()
///     .unwrap();
///
/// assert_eq!(request.messages.len(), 1);
/// assert!(request.response_schema.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, derive_builder::Builder)]
#[builder(default, setter(into))]
pub struct GenerateRequest {
    /// The prompt messages to send
    pub messages: Vec<Message>,
    /// Maximum number of tokens to generate
    pub max_tokens: Option<u32>,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Model identifier, overriding the driver default
    pub model: Option<String>,
    /// JSON schema the response must follow, for backends with a JSON mode
    pub response_schema: Option<serde_json::Value>,
}

impl GenerateRequest {
    /// Creates a new request builder.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }
}

/// The unified response object.
///
/// # Examples
///
/// ```
/// use reelscript_core::{GenerateResponse, Output};
///
/// let response = GenerateResponse {
///     outputs: vec![Output::Text("{\"refinedScript\":\"Hi\"}".to_string())],
/// };
///
/// assert_eq!(response.text(), "{\"refinedScript\":\"Hi\"}");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// The generated outputs from the model
    pub outputs: Vec<Output>,
}

impl GenerateResponse {
    /// Response holding a single text output.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            outputs: vec![Output::Text(text.into())],
        }
    }

    /// All outputs joined into one string.
    pub fn text(&self) -> String {
        self.outputs
            .iter()
            .map(Output::as_text)
            .collect::<Vec<_>>()
            .join("")
    }
}
