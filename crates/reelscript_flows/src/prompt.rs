//! Instruction templates and placeholder rendering.

use regex::Regex;
use reelscript_error::TemplateError;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("Valid placeholder regex")
});

/// Standing instructions sent with every request.
pub const SYSTEM_PROMPT: &str = "You are an expert scriptwriter for short-form vertical video \
(Instagram Reels, YouTube Shorts, TikTok). You write scripts that can be read aloud within the \
requested duration. You write plain text only: never use markdown emphasis such as **bold**, and \
never add hashtags. You always answer with a single JSON object and nothing else.";

/// Instruction for generating five scripts from a brief.
pub const GENERATION_TEMPLATE: &str = r#"Write 5 distinct reel scripts for the brief below.

Brief:
- Topic: {{topic}}
- Length: {{length}} (about {{seconds}} seconds when read aloud)
- Language: {{language}}
- Tone: {{tone}}
- Objective: {{objective}}

Requirements for every script:
- It satisfies every field of the brief.
- It is complete and self-contained: an opening hook, the body, and a closing line that serves the objective.
- It is written entirely in {{language}}.
- It is plain text. Do not use markdown emphasis such as **bold** and do not include hashtags.

The 5 scripts must differ from each other in angle and structure.

Respond with a JSON object of the form {"scripts": ["...", "...", "...", "...", "..."]} containing exactly 5 strings."#;

/// Instruction for refining one script.
pub const REFINEMENT_TEMPLATE: &str = r#"Revise the reel script below.

Original script:
"""
{{original_script}}
"""

It was written for this brief:
- Topic: {{topic}}
- Length: {{length}} (about {{seconds}} seconds when read aloud)
- Language: {{language}}
- Tone: {{original_tone}}
- Objective: {{objective}}

Instruction: {{refinement_goal}}

Return one complete replacement script that follows the instruction and otherwise keeps the brief. Keep it suitable for the original length unless the instruction asks for a shorter or longer script. Write it in {{language}}, as plain text, without markdown emphasis such as **bold** and without hashtags.

Respond with a JSON object of the form {"refinedScript": "..."}."#;

/// Replace every `{{name}}` placeholder with its value.
///
/// # Errors
///
/// Returns a [`TemplateError`] naming the first placeholder without a value.
///
/// # Examples
///
/// ```
/// use reelscript_flows::render;
///
/// let text = render("Tone: {{ tone }}.", &[("tone", "Witty")]).unwrap();
/// assert_eq!(text, "Tone: Witty.");
///
/// assert!(render("{{missing}}", &[]).is_err());
/// ```
pub fn render(template: &str, values: &[(&str, &str)]) -> Result<String, TemplateError> {
    let mut rendered = String::with_capacity(template.len());
    let mut last = 0;

    for captures in PLACEHOLDER.captures_iter(template) {
        let (Some(whole), Some(name)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        let value = values
            .iter()
            .find(|(key, _)| *key == name.as_str())
            .map(|(_, value)| *value)
            .ok_or_else(|| {
                TemplateError::new(format!("No value for placeholder '{}'", name.as_str()))
            })?;

        rendered.push_str(&template[last..whole.start()]);
        rendered.push_str(value);
        last = whole.end();
    }

    rendered.push_str(&template[last..]);
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_are_not_rescanned() {
        let text = render("{{a}} {{b}}", &[("a", "{{b}}"), ("b", "x")]).unwrap();
        assert_eq!(text, "{{b}} x");
    }

    #[test]
    fn test_json_braces_are_left_alone() {
        let text = render(r#"{"scripts": ["{{topic}}"]}"#, &[("topic", "oats")]).unwrap();
        assert_eq!(text, r#"{"scripts": ["oats"]}"#);
    }

    #[test]
    fn test_missing_value_names_placeholder() {
        let err = render("Hello {{name}}", &[("other", "x")]).unwrap_err();
        assert!(err.message.contains("'name'"));
    }
}
