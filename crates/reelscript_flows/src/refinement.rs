//! Script refinement: one script plus an instruction in, one script out.

use crate::{REFINEMENT_TEMPLATE, SYSTEM_PROMPT, extract_json, parse_json, render, sanitize_script};
use reelscript_core::{GenerateRequest, Message, RefinementRequest, RefinementResult};
use reelscript_error::{ContractError, ContractErrorKind, ReelscriptResult};
use reelscript_interface::ReelscriptDriver;
use serde_json::{Value, json};
use tracing::{debug, instrument};

const REFINED_FIELD: &str = "refinedScript";

/// Response schema for JSON-mode backends: `{refinedScript: string}`.
pub fn refinement_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            REFINED_FIELD: { "type": "STRING" }
        },
        "required": [REFINED_FIELD]
    })
}

/// Build the driver request for a refinement.
///
/// # Errors
///
/// Returns a template error if the refinement template cannot be rendered.
pub fn refinement_request(request: &RefinementRequest) -> ReelscriptResult<GenerateRequest> {
    let length = request.length().to_string();
    let seconds = request.length().seconds().to_string();
    let instruction = render(
        REFINEMENT_TEMPLATE,
        &[
            ("original_script", request.original_script().trim()),
            ("topic", request.topic().trim()),
            ("length", length.as_str()),
            ("seconds", seconds.as_str()),
            ("language", request.language().as_str()),
            ("original_tone", request.original_tone().as_str()),
            ("objective", request.objective().as_str()),
            ("refinement_goal", request.refinement_goal().trim()),
        ],
    )?;

    Ok(GenerateRequest {
        messages: vec![Message::system(SYSTEM_PROMPT), Message::user(instruction)],
        response_schema: Some(refinement_schema()),
        ..GenerateRequest::default()
    })
}

/// Check model text against the refinement contract and clean the script.
///
/// # Errors
///
/// Returns a [`ContractError`] when the text holds no JSON object, the
/// `refinedScript` field is missing or not a string, or the script is empty
/// once cleaned.
///
/// # Examples
///
/// ```
/// use reelscript_flows::parse_refinement;
///
/// let result = parse_refinement(r#"{"refinedScript": "**Short.** #tight"}"#).unwrap();
/// assert_eq!(result.refined_script(), "Short.");
///
/// assert!(parse_refinement(r#"{"refinedScript": "  "}"#).is_err());
/// ```
pub fn parse_refinement(text: &str) -> Result<RefinementResult, ContractError> {
    let value: Value = parse_json(&extract_json(text)?)?;

    let raw = value
        .get(REFINED_FIELD)
        .ok_or_else(|| ContractError::new(ContractErrorKind::MissingField(REFINED_FIELD)))?
        .as_str()
        .ok_or_else(|| ContractError::new(ContractErrorKind::InvalidField(REFINED_FIELD)))?;

    RefinementResult::new(sanitize_script(raw))
}

/// Refine one script toward the request's instruction.
///
/// # Errors
///
/// Returns a validation error for a blank request field, the driver's
/// error when the call fails, or a contract error when the response is
/// malformed.
#[instrument(
    skip(driver, request),
    fields(
        provider = driver.provider_name(),
        model = driver.model_name(),
        goal = %request.refinement_goal(),
    )
)]
pub async fn refine_script(
    driver: &dyn ReelscriptDriver,
    request: &RefinementRequest,
) -> ReelscriptResult<RefinementResult> {
    request.validate()?;

    let generate_request = refinement_request(request)?;
    let response = driver.generate(&generate_request).await?;
    let text = response.text();
    debug!(response_length = text.len(), "Received refinement response");

    Ok(parse_refinement(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelscript_core::{CreativeBrief, RefinementGoal};

    fn request(goal: RefinementGoal) -> RefinementRequest {
        let brief = CreativeBrief::builder()
            .topic("3-ingredient healthy breakfasts")
            .build()
            .unwrap();
        RefinementRequest::from_brief("Oats, banana, yogurt. Done.", &brief, &goal)
    }

    #[test]
    fn test_request_embeds_script_context_and_goal() {
        let built = refinement_request(&request(RefinementGoal::Shorten)).unwrap();
        let instruction = &built.messages[1].content;
        assert!(instruction.contains("Oats, banana, yogurt. Done."));
        assert!(instruction.contains("Tone: Motivational"));
        assert!(instruction.contains("Objective: Increase engagement"));
        assert!(instruction.contains("Instruction: Make the script more concise and shorter."));
        assert_eq!(
            built.response_schema.unwrap()["required"][0],
            "refinedScript"
        );
    }

    #[test]
    fn test_missing_field() {
        let err = parse_refinement(r#"{"script": "x"}"#).unwrap_err();
        assert_eq!(err.kind, ContractErrorKind::MissingField("refinedScript"));
    }

    #[test]
    fn test_plain_text_is_rejected() {
        let err = parse_refinement("Here is a shorter script.").unwrap_err();
        assert!(matches!(err.kind, ContractErrorKind::InvalidJson(_)));
    }

    #[test]
    fn test_empty_after_cleanup() {
        let err = parse_refinement(r#"{"refinedScript": "**#tag**"}"#).unwrap_err();
        assert_eq!(err.kind, ContractErrorKind::EmptyOutput);
    }
}
