//! Conversions between Reelscript and Gemini types.

use super::dto::{GeminiContent, GeminiRequest, GeminiResponse, GenerationConfig};
use reelscript_core::{GenerateRequest, GenerateResponse, Role};
use reelscript_error::{GeminiError, GeminiErrorKind};

const JSON_MIME_TYPE: &str = "application/json";

/// Finish reasons that mean the candidate was withheld.
const BLOCKING_FINISH_REASONS: &[&str] = &["SAFETY", "RECITATION", "BLOCKLIST", "PROHIBITED_CONTENT", "SPII"];

/// Converts a Reelscript request to a Gemini request body.
///
/// System messages become the system instruction; request settings fall
/// back to the client defaults. A response schema switches on JSON mode.
pub fn to_gemini_request(
    request: &GenerateRequest,
    default_temperature: Option<f32>,
    default_max_tokens: Option<u32>,
) -> GeminiRequest {
    let mut system = Vec::new();
    let mut contents = Vec::new();

    for message in &request.messages {
        match message.role {
            Role::System => system.push(message.content.as_str()),
            Role::User => contents.push(GeminiContent::new(Some("user"), message.content.clone())),
            Role::Assistant => {
                contents.push(GeminiContent::new(Some("model"), message.content.clone()))
            }
        }
    }

    let system_instruction =
        (!system.is_empty()).then(|| GeminiContent::new(None, system.join("\n\n")));

    let config = GenerationConfig {
        temperature: request.temperature.or(default_temperature),
        max_output_tokens: request.max_tokens.or(default_max_tokens),
        response_mime_type: request
            .response_schema
            .as_ref()
            .map(|_| JSON_MIME_TYPE.to_string()),
        response_schema: request.response_schema.clone(),
    };
    let generation_config = (config != GenerationConfig::default()).then_some(config);

    GeminiRequest::new(contents, system_instruction, generation_config)
}

/// Converts a Gemini response to a Reelscript response.
///
/// # Errors
///
/// Returns [`GeminiErrorKind::Blocked`] when the prompt or the candidate was
/// withheld, and [`GeminiErrorKind::EmptyResponse`] when no text came back.
pub fn from_gemini_response(response: &GeminiResponse) -> Result<GenerateResponse, GeminiError> {
    if let Some(reason) = response
        .prompt_feedback()
        .as_ref()
        .and_then(|feedback| feedback.block_reason().clone())
    {
        return Err(GeminiError::new(GeminiErrorKind::Blocked(reason)));
    }

    let candidate = response
        .candidates()
        .first()
        .ok_or_else(|| GeminiError::new(GeminiErrorKind::EmptyResponse))?;

    let text = candidate
        .content()
        .as_ref()
        .map(GeminiContent::joined_text)
        .unwrap_or_default();

    if text.trim().is_empty() {
        return match candidate.finish_reason().as_deref() {
            Some(reason) if BLOCKING_FINISH_REASONS.contains(&reason) => Err(GeminiError::new(
                GeminiErrorKind::Blocked(reason.to_string()),
            )),
            _ => Err(GeminiError::new(GeminiErrorKind::EmptyResponse)),
        };
    }

    Ok(GenerateResponse::from_text(text))
}
