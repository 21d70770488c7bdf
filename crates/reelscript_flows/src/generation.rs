//! Script generation: one brief in, exactly five scripts out.

use crate::{GENERATION_TEMPLATE, SYSTEM_PROMPT, extract_json, parse_json, render, sanitize_script};
use reelscript_core::{CreativeBrief, FieldOptions, GenerateRequest, Message, SCRIPT_COUNT, ScriptSet};
use reelscript_error::{ContractError, ContractErrorKind, ReelscriptResult};
use reelscript_interface::ReelscriptDriver;
use serde_json::{Value, json};
use std::collections::HashSet;
use tracing::{debug, instrument, warn};

const SCRIPTS_FIELD: &str = "scripts";

/// Response schema for JSON-mode backends: `{scripts: string[5]}`.
pub fn scripts_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            SCRIPTS_FIELD: {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "minItems": SCRIPT_COUNT,
                "maxItems": SCRIPT_COUNT
            }
        },
        "required": [SCRIPTS_FIELD]
    })
}

/// Build the driver request for a brief.
///
/// # Errors
///
/// Returns a template error if the generation template cannot be rendered.
pub fn generation_request(brief: &CreativeBrief) -> ReelscriptResult<GenerateRequest> {
    let length = brief.length().to_string();
    let seconds = brief.length().seconds().to_string();
    let instruction = render(
        GENERATION_TEMPLATE,
        &[
            ("topic", brief.topic().trim()),
            ("length", length.as_str()),
            ("seconds", seconds.as_str()),
            ("language", brief.language().as_str()),
            ("tone", brief.tone().as_str()),
            ("objective", brief.objective().as_str()),
        ],
    )?;

    Ok(GenerateRequest {
        messages: vec![Message::system(SYSTEM_PROMPT), Message::user(instruction)],
        response_schema: Some(scripts_schema()),
        ..GenerateRequest::default()
    })
}

/// Check model text against the generation contract and clean each script.
///
/// # Errors
///
/// Returns a [`ContractError`] when the text holds no JSON object, the
/// `scripts` field is missing or not an array of strings, the count is not
/// five, or a script is empty once cleaned.
///
/// # Examples
///
/// ```
/// use reelscript_flows::parse_script_set;
///
/// let text = r#"{"scripts": ["**One**", "Two #tag", "Three", "Four", "Five"]}"#;
/// let set = parse_script_set(text).unwrap();
/// assert_eq!(set.scripts()[0], "One");
/// assert_eq!(set.scripts()[1], "Two");
///
/// assert!(parse_script_set(r#"{"ideas": []}"#).is_err());
/// ```
pub fn parse_script_set(text: &str) -> Result<ScriptSet, ContractError> {
    let value: Value = parse_json(&extract_json(text)?)?;

    let raw = value
        .get(SCRIPTS_FIELD)
        .ok_or_else(|| ContractError::new(ContractErrorKind::MissingField(SCRIPTS_FIELD)))?
        .as_array()
        .ok_or_else(|| ContractError::new(ContractErrorKind::InvalidField(SCRIPTS_FIELD)))?;

    if raw.len() != SCRIPT_COUNT {
        return Err(ContractError::new(ContractErrorKind::WrongCount {
            expected: SCRIPT_COUNT,
            actual: raw.len(),
        }));
    }

    let mut scripts = Vec::with_capacity(SCRIPT_COUNT);
    for (index, item) in raw.iter().enumerate() {
        let text = item
            .as_str()
            .ok_or_else(|| ContractError::new(ContractErrorKind::InvalidField(SCRIPTS_FIELD)))?;
        let clean = sanitize_script(text);
        if clean.is_empty() {
            return Err(ContractError::new(ContractErrorKind::EmptyScript(index)));
        }
        scripts.push(clean);
    }

    let distinct: HashSet<&String> = scripts.iter().collect();
    if distinct.len() < scripts.len() {
        warn!(
            duplicates = scripts.len() - distinct.len(),
            "Model returned duplicate scripts"
        );
    }

    ScriptSet::new(scripts)
}

/// Generate five scripts for a brief.
///
/// The brief is validated before any network call.
///
/// # Errors
///
/// Returns a validation error for a bad brief, the driver's error when the
/// call fails, or a contract error when the response is malformed.
#[instrument(
    skip(driver, brief, options),
    fields(
        provider = driver.provider_name(),
        model = driver.model_name(),
        length = %brief.length(),
        language = %brief.language(),
    )
)]
pub async fn generate_scripts(
    driver: &dyn ReelscriptDriver,
    brief: &CreativeBrief,
    options: &FieldOptions,
) -> ReelscriptResult<ScriptSet> {
    brief.validate(options)?;

    let request = generation_request(brief)?;
    let response = driver.generate(&request).await?;
    let text = response.text();
    debug!(response_length = text.len(), "Received generation response");

    let set = parse_script_set(&text)?;
    debug!(count = set.scripts().len(), "Generated scripts");
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(scripts: &[&str]) -> String {
        json!({ "scripts": scripts }).to_string()
    }

    #[test]
    fn test_schema_pins_count() {
        let schema = scripts_schema();
        assert_eq!(schema["properties"]["scripts"]["minItems"], 5);
        assert_eq!(schema["properties"]["scripts"]["maxItems"], 5);
        assert_eq!(schema["required"][0], "scripts");
    }

    #[test]
    fn test_request_embeds_every_field() {
        let brief = CreativeBrief::builder()
            .topic("  3-ingredient healthy breakfasts ")
            .language("Hindi")
            .tone("Playful")
            .objective("Go viral")
            .build()
            .unwrap();
        let request = generation_request(&brief).unwrap();

        let instruction = &request.messages[1].content;
        assert!(instruction.contains("Topic: 3-ingredient healthy breakfasts\n"));
        assert!(instruction.contains("Length: 30s (about 30 seconds"));
        assert!(instruction.contains("Language: Hindi"));
        assert!(instruction.contains("Tone: Playful"));
        assert!(instruction.contains("Objective: Go viral"));
        assert!(instruction.contains("do not include hashtags"));
        assert!(request.response_schema.is_some());
    }

    #[test]
    fn test_wrong_count() {
        let err = parse_script_set(&payload(&["a", "b", "c"])).unwrap_err();
        assert_eq!(
            err.kind,
            ContractErrorKind::WrongCount {
                expected: 5,
                actual: 3
            }
        );
    }

    #[test]
    fn test_non_string_entry() {
        let text = r#"{"scripts": ["a", "b", 3, "d", "e"]}"#;
        let err = parse_script_set(text).unwrap_err();
        assert_eq!(err.kind, ContractErrorKind::InvalidField("scripts"));
    }

    #[test]
    fn test_script_empty_after_cleanup() {
        let err = parse_script_set(&payload(&["a", "b", "#only #tags", "d", "e"])).unwrap_err();
        assert_eq!(err.kind, ContractErrorKind::EmptyScript(2));
    }

    #[test]
    fn test_duplicates_are_kept() {
        let set = parse_script_set(&payload(&["same", "same", "c", "d", "e"])).unwrap();
        assert_eq!(set.scripts()[0], set.scripts()[1]);
    }

    #[test]
    fn test_fenced_response() {
        let text = format!("```json\n{}\n```", payload(&["a", "b", "c", "d", "e"]));
        assert_eq!(parse_script_set(&text).unwrap().scripts()[4], "e");
    }
}
