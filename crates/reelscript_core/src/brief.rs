//! The creative brief that drives one generation.

use crate::{DEFAULT_LANGUAGE, DEFAULT_OBJECTIVE, DEFAULT_TONE, FieldOptions, ReelLength};
use reelscript_error::{FieldIssue, ValidationError, ValidationField};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Minimum topic length in characters, after trimming.
pub const TOPIC_MIN_CHARS: usize = 10;

/// Maximum topic length in characters, after trimming.
pub const TOPIC_MAX_CHARS: usize = 250;

/// User-supplied parameters for one generation.
///
/// # Examples
///
/// ```
/// use reelscript_core::{CreativeBrief, FieldOptions, ReelLength};
///
/// let brief = CreativeBrief::builder()
///     .topic("3-ingredient healthy breakfasts")
///     .length(ReelLength::Thirty)
///     .build()
///     .unwrap();
///
/// assert_eq!(brief.language(), "English");
/// assert!(brief.validate(&FieldOptions::default()).is_ok());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[serde(rename_all = "camelCase")]
#[builder(default, setter(into))]
pub struct CreativeBrief {
    /// What the reel is about
    topic: String,
    /// Target reel duration
    length: ReelLength,
    /// Script language
    language: String,
    /// Script tone
    tone: String,
    /// What the reel should achieve
    objective: String,
}

impl Default for CreativeBrief {
    fn default() -> Self {
        Self {
            topic: String::new(),
            length: ReelLength::default(),
            language: DEFAULT_LANGUAGE.to_string(),
            tone: DEFAULT_TONE.to_string(),
            objective: DEFAULT_OBJECTIVE.to_string(),
        }
    }
}

impl CreativeBrief {
    /// Creates a new brief builder seeded with the form defaults.
    pub fn builder() -> CreativeBriefBuilder {
        CreativeBriefBuilder::default()
    }

    /// Check every field, reporting all problems at once.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] listing one issue per offending field.
    pub fn validate(&self, options: &FieldOptions) -> Result<(), ValidationError> {
        let mut issues = Vec::new();
        if let Some(issue) = check_topic(&self.topic) {
            issues.push(issue);
        }
        issues.extend(options.check(ValidationField::Language, &self.language));
        issues.extend(options.check(ValidationField::Tone, &self.tone));
        issues.extend(options.check(ValidationField::Objective, &self.objective));

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(issues))
        }
    }
}

/// Topic bounds check shared by briefs and refinement requests.
pub(crate) fn check_topic(topic: &str) -> Option<FieldIssue> {
    let chars = topic.trim().chars().count();
    if chars == 0 {
        Some(FieldIssue::Required(ValidationField::Topic))
    } else if chars < TOPIC_MIN_CHARS {
        Some(FieldIssue::TooShort {
            field: ValidationField::Topic,
            min: TOPIC_MIN_CHARS,
        })
    } else if chars > TOPIC_MAX_CHARS {
        Some(FieldIssue::TooLong {
            field: ValidationField::Topic,
            max: TOPIC_MAX_CHARS,
        })
    } else {
        None
    }
}

/// Loosely typed brief as submitted by a form or request body.
///
/// Every field is optional so that a missing or malformed value becomes a
/// per-field validation issue instead of a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BriefForm {
    /// Topic text
    pub topic: Option<String>,
    /// Length label such as `30s`
    pub length: Option<String>,
    /// Language name
    pub language: Option<String>,
    /// Tone name
    pub tone: Option<String>,
    /// Objective name
    pub objective: Option<String>,
}

impl BriefForm {
    /// Validate the form and build a trimmed [`CreativeBrief`].
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] listing every offending field.
    pub fn into_brief(self, options: &FieldOptions) -> Result<CreativeBrief, ValidationError> {
        let text = |value: Option<String>| value.unwrap_or_default().trim().to_string();

        let length = match self.length.as_deref().map(str::trim) {
            None | Some("") => Err(FieldIssue::Required(ValidationField::Length)),
            Some(label) => ReelLength::from_str(label).map_err(|_| FieldIssue::NotAllowed {
                field: ValidationField::Length,
                value: label.to_string(),
            }),
        };

        let brief = CreativeBrief {
            topic: text(self.topic),
            length: length.clone().unwrap_or_default(),
            language: text(self.language),
            tone: text(self.tone),
            objective: text(self.objective),
        };

        match (brief.validate(options), length) {
            (Ok(()), Ok(_)) => Ok(brief),
            (Ok(()), Err(issue)) => Err(ValidationError::new(vec![issue])),
            (Err(mut err), Err(issue)) => {
                err.issues.push(issue);
                err.issues.sort_by_key(FieldIssue::field);
                Err(err)
            }
            (Err(err), Ok(_)) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brief(topic: &str) -> CreativeBrief {
        CreativeBrief::builder().topic(topic).build().unwrap()
    }

    #[test]
    fn test_topic_bounds() {
        let options = FieldOptions::default();
        assert!(brief("123456789").validate(&options).is_err());
        assert!(brief("1234567890").validate(&options).is_ok());
        assert!(brief(&"x".repeat(250)).validate(&options).is_ok());
        assert!(brief(&"x".repeat(251)).validate(&options).is_err());
    }

    #[test]
    fn test_topic_is_measured_after_trimming() {
        let err = brief("   short    ")
            .validate(&FieldOptions::default())
            .unwrap_err();
        assert_eq!(
            err.issues,
            vec![FieldIssue::TooShort {
                field: ValidationField::Topic,
                min: TOPIC_MIN_CHARS
            }]
        );
    }

    #[test]
    fn test_all_issues_reported() {
        let bad = CreativeBrief::builder()
            .topic("")
            .language("Klingon")
            .tone("")
            .objective("Sell socks")
            .build()
            .unwrap();
        let err = bad.validate(&FieldOptions::default()).unwrap_err();
        let fields: Vec<_> = err.issues.iter().map(FieldIssue::field).collect();
        assert_eq!(
            fields,
            vec![
                ValidationField::Topic,
                ValidationField::Language,
                ValidationField::Tone,
                ValidationField::Objective
            ]
        );
    }

    #[test]
    fn test_untrimmed_option_is_rejected() {
        let padded = CreativeBrief::builder()
            .topic("3-ingredient healthy breakfasts")
            .tone(" Witty ")
            .build()
            .unwrap();
        let err = padded.validate(&FieldOptions::default()).unwrap_err();
        assert_eq!(
            err.issues,
            vec![FieldIssue::NotAllowed {
                field: ValidationField::Tone,
                value: " Witty ".to_string(),
            }]
        );
    }

    #[test]
    fn test_form_rejects_unknown_length() {
        let form = BriefForm {
            topic: Some("3-ingredient healthy breakfasts".into()),
            length: Some("45s".into()),
            language: Some("English".into()),
            tone: Some("Motivational".into()),
            objective: Some("Increase engagement".into()),
        };
        let err = form.into_brief(&FieldOptions::default()).unwrap_err();
        assert_eq!(err.issues.len(), 1);
        assert_eq!(err.issues[0].field(), ValidationField::Length);
    }

    #[test]
    fn test_form_trims_values() {
        let form = BriefForm {
            topic: Some("  3-ingredient healthy breakfasts ".into()),
            length: Some("15s".into()),
            language: Some(" Hindi".into()),
            tone: Some("Calm ".into()),
            objective: Some("Go viral".into()),
        };
        let brief = form.into_brief(&FieldOptions::default()).unwrap();
        assert_eq!(brief.topic(), "3-ingredient healthy breakfasts");
        assert_eq!(brief.language(), "Hindi");
        assert_eq!(*brief.length(), ReelLength::Fifteen);
    }
}
