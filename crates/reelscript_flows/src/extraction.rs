//! Pulling JSON objects out of model text.
//!
//! JSON-mode backends return a bare object, but other models wrap it in a
//! markdown fence or surround it with prose.

use reelscript_error::{ContractError, ContractErrorKind};

/// Extract the first JSON object from a response.
///
/// Strategies, in order:
/// 1. Markdown code blocks: ```json ... ``` (or an unlabeled fence)
/// 2. Balanced braces: { ... }
///
/// # Errors
///
/// Returns [`ContractErrorKind::InvalidJson`] if no object is found.
///
/// # Examples
///
/// ```
/// use reelscript_flows::extract_json;
///
/// let response = "Here you go:\n```json\n{\"refinedScript\": \"Hi\"}\n```\n";
/// assert_eq!(extract_json(response).unwrap(), "{\"refinedScript\": \"Hi\"}");
///
/// let response = "Sure! {\"scripts\": [\"a {b}\"]} Enjoy.";
/// assert_eq!(extract_json(response).unwrap(), "{\"scripts\": [\"a {b}\"]}");
/// ```
pub fn extract_json(response: &str) -> Result<String, ContractError> {
    if let Some(json) = extract_from_code_block(response, "json") {
        return Ok(json);
    }

    if let Some(json) = extract_balanced(response, '{', '}') {
        return Ok(json);
    }

    tracing::error!(
        response_length = response.len(),
        "No JSON object found in model response"
    );

    Err(ContractError::new(ContractErrorKind::InvalidJson(format!(
        "no JSON object found in response (length: {})",
        response.len()
    ))))
}

/// Extract content from markdown code blocks.
///
/// Looks for patterns like:
/// - ```language\n...\n```
/// - ``` ... ``` (no language specified)
fn extract_from_code_block(response: &str, language: &str) -> Option<String> {
    let pattern = format!("```{}", language);

    if let Some(start) = response.find(&pattern) {
        let content_start = start + pattern.len();
        if let Some(end) = response[content_start..].find("```") {
            let content = &response[content_start..content_start + end];
            return Some(content.trim().to_string());
        }
        // Truncated response: take everything after the fence
        return Some(response[content_start..].trim().to_string());
    }

    if let Some(start) = response.find("```") {
        let content_start = start + 3;
        // Skip a language specifier
        let skip_to = response[content_start..]
            .find('\n')
            .map(|n| content_start + n + 1)
            .unwrap_or(content_start);

        if let Some(end) = response[skip_to..].find("```") {
            let content = &response[skip_to..skip_to + end];
            return Some(content.trim().to_string());
        }
        return Some(response[skip_to..].trim().to_string());
    }

    None
}

/// Extract content between balanced delimiters.
///
/// Finds the first occurrence of `open` and extracts content up to
/// the matching `close`, skipping delimiters inside string literals.
fn extract_balanced(response: &str, open: char, close: char) -> Option<String> {
    let start = response.find(open)?;
    let mut depth = 0;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in response[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(response[start..start + i + ch.len_utf8()].to_string());
                }
            }
            _ => {}
        }
    }

    None
}

/// Parse JSON into a specific type.
///
/// # Errors
///
/// Returns [`ContractErrorKind::InvalidJson`] if the text cannot be parsed
/// into `T`.
///
/// # Examples
///
/// ```
/// use reelscript_flows::parse_json;
///
/// let value: serde_json::Value = parse_json(r#"{"scripts": []}"#).unwrap();
/// assert!(value["scripts"].is_array());
/// ```
pub fn parse_json<T>(json_str: &str) -> Result<T, ContractError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(json_str).map_err(|e| {
        let preview = json_str.chars().take(100).collect::<String>();

        tracing::error!(
            error = %e,
            json_preview = %preview,
            "JSON parsing failed"
        );

        ContractError::new(ContractErrorKind::InvalidJson(e.to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_from_code_block() {
        let response = r#"
Here's the JSON you requested:

```json
{
  "scripts": ["one"]
}
```

Hope this helps!
"#;
        let json = extract_json(response).unwrap();
        assert!(json.starts_with('{'));
        assert!(json.contains("\"scripts\""));
    }

    #[test]
    fn test_extract_json_from_unlabeled_fence() {
        let response = "```\n{\"refinedScript\": \"x\"}\n```";
        assert_eq!(extract_json(response).unwrap(), "{\"refinedScript\": \"x\"}");
    }

    #[test]
    fn test_extract_json_balanced_braces() {
        let response = r#"Sure! Here it is: {"scripts": ["a", "b"], "meta": {"n": 2}} trailing"#;
        let json = extract_json(response).unwrap();
        assert_eq!(json, r#"{"scripts": ["a", "b"], "meta": {"n": 2}}"#);
    }

    #[test]
    fn test_braces_and_quotes_inside_strings() {
        let response = r#"{"refinedScript": "Say \"hi\" } then {wave}"}"#;
        assert_eq!(extract_json(response).unwrap(), response);
    }

    #[test]
    fn test_truncated_code_block() {
        let response = "```json\n{\"scripts\": [\"a\"";
        assert_eq!(extract_json(response).unwrap(), "{\"scripts\": [\"a\"");
    }

    #[test]
    fn test_no_json() {
        let err = extract_json("I cannot help with that.").unwrap_err();
        assert!(matches!(err.kind, ContractErrorKind::InvalidJson(_)));
    }

    #[test]
    fn test_parse_json_error() {
        let err = parse_json::<serde_json::Value>("{not json").unwrap_err();
        assert!(matches!(err.kind, ContractErrorKind::InvalidJson(_)));
    }
}
