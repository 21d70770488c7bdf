//! Curated form options and language ordering.

use reelscript_error::{FieldIssue, ValidationField};
use serde::{Deserialize, Serialize};

/// Language used when no locale preference matches.
pub const DEFAULT_LANGUAGE: &str = "English";

/// Tone preselected on a fresh brief.
pub const DEFAULT_TONE: &str = "Motivational";

/// Objective preselected on a fresh brief.
pub const DEFAULT_OBJECTIVE: &str = "Increase engagement";

/// Indian languages, listed right after the detected language.
pub const INDIAN_LANGUAGES: &[&str] = &[
    "Hindi",
    "Bengali",
    "Telugu",
    "Tamil",
    "Marathi",
    "Gujarati",
    "Urdu",
    "Kannada",
    "Odia",
    "Malayalam",
];

const LANGUAGES: &[&str] = &[
    "English",
    "Spanish",
    "French",
    "German",
    "Portuguese",
    "Italian",
    "Dutch",
    "Russian",
    "Japanese",
    "Chinese (Simplified)",
    "Korean",
    "Arabic",
    "Hindi",
    "Bengali",
    "Telugu",
    "Tamil",
    "Marathi",
    "Gujarati",
    "Urdu",
    "Kannada",
    "Odia",
    "Malayalam",
];

const TONES: &[&str] = &[
    "Humorous",
    "Witty",
    "Sarcastic",
    "Playful",
    "Motivational",
    "Inspirational",
    "Uplifting",
    "Empowering",
    "Educational",
    "Informative",
    "Authoritative",
    "Thought-provoking",
    "Dramatic",
    "Suspenseful",
    "Emotional",
    "Romantic",
    "Casual",
    "Friendly",
    "Conversational",
    "Authentic",
    "Formal",
    "Professional",
    "Polished",
    "Excited",
    "Energetic",
    "Passionate",
    "Calm",
    "Relaxing",
    "Soothing",
];

const OBJECTIVES: &[&str] = &[
    "Increase brand awareness",
    "Go viral",
    "Maximize reach",
    "Drive sales",
    "Promote a product/service",
    "Generate leads",
    "Educate audience",
    "Share tips/tutorials",
    "Explain a concept",
    "Build community",
    "Increase engagement",
    "Start a conversation",
    "Entertain viewers",
    "Tell a story",
    "Showcase creativity",
];

/// Map a locale tag such as `hi-IN` to a curated language name.
///
/// Only the primary subtag is considered.
///
/// # Examples
///
/// ```
/// use reelscript_core::language_for_locale;
///
/// assert_eq!(language_for_locale("hi-IN"), Some("Hindi"));
/// assert_eq!(language_for_locale("ZH_tw"), Some("Chinese (Simplified)"));
/// assert_eq!(language_for_locale("xx"), None);
/// ```
pub fn language_for_locale(tag: &str) -> Option<&'static str> {
    let primary = tag
        .trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    let language = match primary.as_str() {
        "en" => "English",
        "es" => "Spanish",
        "fr" => "French",
        "de" => "German",
        "pt" => "Portuguese",
        "it" => "Italian",
        "nl" => "Dutch",
        "ru" => "Russian",
        "ja" => "Japanese",
        "zh" => "Chinese (Simplified)",
        "ko" => "Korean",
        "ar" => "Arabic",
        "hi" => "Hindi",
        "bn" => "Bengali",
        "te" => "Telugu",
        "ta" => "Tamil",
        "mr" => "Marathi",
        "gu" => "Gujarati",
        "ur" => "Urdu",
        "kn" => "Kannada",
        "or" => "Odia",
        "ml" => "Malayalam",
        _ => return None,
    };
    Some(language)
}

/// Allowed values for the constrained brief fields.
///
/// Defaults to the curated lists; the `[options]` configuration section can
/// replace any of them.
///
/// # Examples
///
/// ```
/// use reelscript_core::FieldOptions;
///
/// let options = FieldOptions::default();
/// assert!(options.allows_tone("Witty"));
/// assert!(!options.allows_language("Klingon"));
///
/// let ordered = options.ordered_languages("Tamil");
/// assert_eq!(ordered[0], "Tamil");
/// assert_eq!(ordered[1], "Bengali");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct FieldOptions {
    /// Languages a script can be written in
    languages: Vec<String>,
    /// Tones a script can take
    tones: Vec<String>,
    /// Objectives a reel can pursue
    objectives: Vec<String>,
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn sorted(values: &[String]) -> Vec<String> {
    let mut values = values.to_vec();
    values.sort();
    values
}

impl Default for FieldOptions {
    fn default() -> Self {
        Self {
            languages: owned(LANGUAGES),
            tones: owned(TONES),
            objectives: owned(OBJECTIVES),
        }
    }
}

impl FieldOptions {
    /// Options with explicit lists.
    pub fn new(languages: Vec<String>, tones: Vec<String>, objectives: Vec<String>) -> Self {
        Self {
            languages,
            tones,
            objectives,
        }
    }

    /// Whether the language is in the allowed set.
    pub fn allows_language(&self, language: &str) -> bool {
        self.languages.iter().any(|l| l == language)
    }

    /// Whether the tone is in the allowed set.
    pub fn allows_tone(&self, tone: &str) -> bool {
        self.tones.iter().any(|t| t == tone)
    }

    /// Whether the objective is in the allowed set.
    pub fn allows_objective(&self, objective: &str) -> bool {
        self.objectives.iter().any(|o| o == objective)
    }

    /// Check one constrained field value, returning the issue if any.
    ///
    /// The value is matched exactly as given; surrounding whitespace makes it
    /// unknown.
    pub fn check(&self, field: ValidationField, value: &str) -> Option<FieldIssue> {
        if value.trim().is_empty() {
            return Some(FieldIssue::Required(field));
        }
        let allowed = match field {
            ValidationField::Language => self.allows_language(value),
            ValidationField::Tone | ValidationField::OriginalTone => self.allows_tone(value),
            ValidationField::Objective => self.allows_objective(value),
            _ => true,
        };
        (!allowed).then(|| FieldIssue::NotAllowed {
            field,
            value: value.to_string(),
        })
    }

    /// Languages in display order.
    ///
    /// The preferred language comes first (falling back to English when it
    /// is not allowed), followed by the remaining Indian languages sorted,
    /// followed by every other language sorted.
    pub fn ordered_languages(&self, preferred: &str) -> Vec<String> {
        let first = if self.allows_language(preferred) {
            preferred
        } else {
            DEFAULT_LANGUAGE
        };

        let (mut indian, mut rest): (Vec<String>, Vec<String>) = self
            .languages
            .iter()
            .filter(|language| language.as_str() != first)
            .cloned()
            .partition(|language| INDIAN_LANGUAGES.contains(&language.as_str()));
        indian.sort();
        rest.sort();

        let mut ordered = Vec::with_capacity(self.languages.len());
        if self.allows_language(first) {
            ordered.push(first.to_string());
        }
        ordered.extend(indian);
        ordered.extend(rest);
        ordered
    }

    /// Tones sorted for display.
    pub fn sorted_tones(&self) -> Vec<String> {
        sorted(&self.tones)
    }

    /// Objectives sorted for display.
    pub fn sorted_objectives(&self) -> Vec<String> {
        sorted(&self.objectives)
    }

    /// Pick the default language from an `Accept-Language` header value.
    ///
    /// Entries are tried in header order; quality weights are ignored. The
    /// first entry that maps to an allowed language wins, otherwise English.
    ///
    /// # Examples
    ///
    /// ```
    /// use reelscript_core::FieldOptions;
    ///
    /// let options = FieldOptions::default();
    /// assert_eq!(options.detect_language(Some("xx, ta-IN;q=0.8, en;q=0.5")), "Tamil");
    /// assert_eq!(options.detect_language(None), "English");
    /// ```
    pub fn detect_language(&self, accept_language: Option<&str>) -> String {
        accept_language
            .into_iter()
            .flat_map(|header| header.split(','))
            .filter_map(|entry| entry.split(';').next())
            .filter_map(language_for_locale)
            .find(|language| self.allows_language(language))
            .unwrap_or(DEFAULT_LANGUAGE)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curated_list_sizes() {
        let options = FieldOptions::default();
        assert_eq!(options.languages().len(), 22);
        assert_eq!(options.tones().len(), 29);
        assert_eq!(options.objectives().len(), 15);
    }

    #[test]
    fn test_defaults_are_allowed() {
        let options = FieldOptions::default();
        assert!(options.allows_language(DEFAULT_LANGUAGE));
        assert!(options.allows_tone(DEFAULT_TONE));
        assert!(options.allows_objective(DEFAULT_OBJECTIVE));
    }

    #[test]
    fn test_english_first_then_indian_then_rest() {
        let ordered = FieldOptions::default().ordered_languages("English");
        assert_eq!(ordered.len(), 22);
        assert_eq!(ordered[0], "English");
        let indian: Vec<&str> = ordered[1..11].iter().map(String::as_str).collect();
        assert_eq!(
            indian,
            vec![
                "Bengali",
                "Gujarati",
                "Hindi",
                "Kannada",
                "Malayalam",
                "Marathi",
                "Odia",
                "Tamil",
                "Telugu",
                "Urdu"
            ]
        );
        assert_eq!(ordered[11], "Arabic");
        assert_eq!(ordered[21], "Spanish");
    }

    #[test]
    fn test_unknown_preference_falls_back_to_english() {
        let ordered = FieldOptions::default().ordered_languages("Klingon");
        assert_eq!(ordered[0], "English");
        assert_eq!(ordered.len(), 22);
    }

    #[test]
    fn test_check_reports_missing_and_unknown() {
        let options = FieldOptions::default();
        assert_eq!(
            options.check(ValidationField::Tone, "  "),
            Some(FieldIssue::Required(ValidationField::Tone))
        );
        assert!(matches!(
            options.check(ValidationField::Objective, "Sell socks"),
            Some(FieldIssue::NotAllowed { .. })
        ));
        assert_eq!(options.check(ValidationField::Language, "Odia"), None);
    }

    #[test]
    fn test_check_matches_stored_value_exactly() {
        let options = FieldOptions::default();
        assert_eq!(
            options.check(ValidationField::Tone, " Witty "),
            Some(FieldIssue::NotAllowed {
                field: ValidationField::Tone,
                value: " Witty ".to_string(),
            })
        );
    }
}
