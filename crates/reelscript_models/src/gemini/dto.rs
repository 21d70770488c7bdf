//! Gemini `generateContent` data transfer objects.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// One text part of a content block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GeminiPart {
    /// Part text
    #[serde(default)]
    text: Option<String>,
}

impl GeminiPart {
    /// Text part.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

/// A content block: a role plus its parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GeminiContent {
    /// `user` or `model`; omitted for system instructions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    /// Content parts
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

impl GeminiContent {
    /// Content block with a role and one text part.
    pub fn new(role: Option<&str>, text: impl Into<String>) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![GeminiPart::new(text)],
        }
    }

    /// Concatenated text of every part.
    pub fn joined_text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect::<Vec<_>>()
            .join("")
    }
}

/// Sampling and output-format settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Response token cap
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    /// Response MIME type, `application/json` for JSON mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    /// Schema the JSON response must follow
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
}

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    /// Conversation turns
    contents: Vec<GeminiContent>,
    /// System instruction
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    /// Generation settings
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

impl GeminiRequest {
    /// Assemble a request body.
    pub fn new(
        contents: Vec<GeminiContent>,
        system_instruction: Option<GeminiContent>,
        generation_config: Option<GenerationConfig>,
    ) -> Self {
        Self {
            contents,
            system_instruction,
            generation_config,
        }
    }
}

/// One response candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct GeminiCandidate {
    /// Generated content
    #[serde(default)]
    content: Option<GeminiContent>,
    /// Why generation stopped, e.g. `STOP` or `SAFETY`
    #[serde(default)]
    finish_reason: Option<String>,
}

/// Feedback about the prompt itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    /// Set when the prompt was blocked
    #[serde(default)]
    block_reason: Option<String>,
}

/// Token accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    /// Prompt tokens
    #[serde(default)]
    prompt_token_count: u64,
    /// Generated tokens
    #[serde(default)]
    candidates_token_count: u64,
    /// Total tokens
    #[serde(default)]
    total_token_count: u64,
}

/// Response body of `generateContent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct GeminiResponse {
    /// Response candidates
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    /// Prompt feedback
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
    /// Token usage
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}
