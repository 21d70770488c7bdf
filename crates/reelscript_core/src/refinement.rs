//! Refinement request and result types.

use crate::{CreativeBrief, FieldOptions, ReelLength};
use reelscript_error::{ContractError, ContractErrorKind, FieldIssue, ValidationError, ValidationField};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::str::FromStr;

/// What a refinement should change about a script.
///
/// Parsing accepts `shorten`, `lengthen`, `tone:<tone>` and `cta:<focus>`;
/// anything else is taken as a custom instruction.
///
/// # Examples
///
/// ```
/// use reelscript_core::RefinementGoal;
///
/// let goal: RefinementGoal = "shorten".parse().unwrap();
/// assert_eq!(goal.instruction(), "Make the script more concise and shorter.");
///
/// let goal: RefinementGoal = "tone:Playful".parse().unwrap();
/// assert_eq!(goal.instruction(), "Change the tone of the script to Playful.");
///
/// let goal: RefinementGoal = "Open with a question".parse().unwrap();
/// assert_eq!(goal, RefinementGoal::Custom("Open with a question".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RefinementGoal {
    /// Make the script shorter
    Shorten,
    /// Make the script longer
    Lengthen,
    /// Rewrite in another tone
    ChangeTone(String),
    /// Strengthen the call to action toward a focus
    StrengthenCallToAction(String),
    /// Free-form instruction
    Custom(String),
}

impl RefinementGoal {
    /// Natural-language instruction sent to the model.
    pub fn instruction(&self) -> String {
        match self {
            RefinementGoal::Shorten => "Make the script more concise and shorter.".to_string(),
            RefinementGoal::Lengthen => "Add more detail and make the script longer.".to_string(),
            RefinementGoal::ChangeTone(tone) => {
                format!("Change the tone of the script to {}.", tone.trim())
            }
            RefinementGoal::StrengthenCallToAction(focus) => {
                format!("Strengthen the call to action, focused on {}.", focus.trim())
            }
            RefinementGoal::Custom(text) => text.trim().to_string(),
        }
    }

    /// Check the goal's payload.
    ///
    /// A tone change must name an allowed tone; payload-carrying goals must
    /// not be blank.
    pub fn check(&self, options: &FieldOptions) -> Option<FieldIssue> {
        match self {
            RefinementGoal::Shorten | RefinementGoal::Lengthen => None,
            RefinementGoal::ChangeTone(tone) => options.check(ValidationField::Tone, tone.trim()),
            RefinementGoal::StrengthenCallToAction(text) | RefinementGoal::Custom(text) => text
                .trim()
                .is_empty()
                .then_some(FieldIssue::Required(ValidationField::RefinementGoal)),
        }
    }
}

impl FromStr for RefinementGoal {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let goal = match s.to_ascii_lowercase().as_str() {
            "shorten" | "shorter" => RefinementGoal::Shorten,
            "lengthen" | "longer" => RefinementGoal::Lengthen,
            lower if lower.starts_with("tone:") => {
                RefinementGoal::ChangeTone(s["tone:".len()..].trim().to_string())
            }
            lower if lower.starts_with("cta:") => {
                RefinementGoal::StrengthenCallToAction(s["cta:".len()..].trim().to_string())
            }
            _ => RefinementGoal::Custom(s.to_string()),
        };
        Ok(goal)
    }
}

/// One script plus its originating context and an instruction.
///
/// # Examples
///
/// ```
/// use reelscript_core::{CreativeBrief, RefinementGoal, RefinementRequest};
///
/// let brief = CreativeBrief::builder()
///     .topic("3-ingredient healthy breakfasts")
///     .build()
///     .unwrap();
/// let request = RefinementRequest::from_brief("Eggs. Oats. Go.", &brief, &RefinementGoal::Shorten);
///
/// assert_eq!(request.original_tone(), "Motivational");
/// assert!(request.validate().is_ok());
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters,
)]
#[serde(rename_all = "camelCase")]
pub struct RefinementRequest {
    /// Script text to refine
    original_script: String,
    /// Topic of the originating brief
    topic: String,
    /// Length of the originating brief
    length: ReelLength,
    /// Language of the originating brief
    language: String,
    /// Tone of the originating brief
    original_tone: String,
    /// Objective of the originating brief
    objective: String,
    /// Instruction text
    refinement_goal: String,
}

impl RefinementRequest {
    /// Build a request from a script, its brief and a goal.
    pub fn from_brief(
        script: impl Into<String>,
        brief: &CreativeBrief,
        goal: &RefinementGoal,
    ) -> Self {
        Self {
            original_script: script.into(),
            topic: brief.topic().clone(),
            length: *brief.length(),
            language: brief.language().clone(),
            original_tone: brief.tone().clone(),
            objective: brief.objective().clone(),
            refinement_goal: goal.instruction(),
        }
    }

    /// Require the script, every context field and the instruction.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming each blank field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            (ValidationField::OriginalScript, &self.original_script),
            (ValidationField::Topic, &self.topic),
            (ValidationField::Language, &self.language),
            (ValidationField::OriginalTone, &self.original_tone),
            (ValidationField::Objective, &self.objective),
            (ValidationField::RefinementGoal, &self.refinement_goal),
        ];
        let issues: Vec<FieldIssue> = fields
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| FieldIssue::Required(field))
            .collect();

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(issues))
        }
    }
}

/// Loosely typed refinement request as submitted in a request body.
///
/// Every field is optional so that a missing or malformed value becomes a
/// per-field validation issue instead of a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinementForm {
    /// Script text to refine
    pub original_script: Option<String>,
    /// Topic of the originating brief
    pub topic: Option<String>,
    /// Length label such as `30s`
    pub length: Option<String>,
    /// Language of the originating brief
    pub language: Option<String>,
    /// Tone of the originating brief
    pub original_tone: Option<String>,
    /// Objective of the originating brief
    pub objective: Option<String>,
    /// Instruction text
    pub refinement_goal: Option<String>,
}

impl RefinementForm {
    /// Validate the form and build a trimmed [`RefinementRequest`].
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] listing every missing, blank or
    /// malformed field.
    ///
    /// # Examples
    ///
    /// ```
    /// use reelscript_core::RefinementForm;
    /// use reelscript_error::ValidationField;
    ///
    /// let form = RefinementForm {
    ///     original_script: Some("Eggs. Spinach. Go.".into()),
    ///     topic: Some("3-ingredient healthy breakfasts".into()),
    ///     length: Some("30s".into()),
    ///     language: Some("English".into()),
    ///     original_tone: None,
    ///     objective: Some("Increase engagement".into()),
    ///     refinement_goal: Some("Make the script more concise and shorter.".into()),
    /// };
    /// let err = form.into_request().unwrap_err();
    /// assert_eq!(err.issues[0].field(), ValidationField::OriginalTone);
    /// ```
    pub fn into_request(self) -> Result<RefinementRequest, ValidationError> {
        let mut issues = Vec::new();
        let mut text = |field: ValidationField, value: Option<String>| {
            let value = value.unwrap_or_default().trim().to_string();
            if value.is_empty() {
                issues.push(FieldIssue::Required(field));
            }
            value
        };

        let original_script = text(ValidationField::OriginalScript, self.original_script);
        let topic = text(ValidationField::Topic, self.topic);
        let language = text(ValidationField::Language, self.language);
        let original_tone = text(ValidationField::OriginalTone, self.original_tone);
        let objective = text(ValidationField::Objective, self.objective);
        let refinement_goal = text(ValidationField::RefinementGoal, self.refinement_goal);

        let length = match self.length.as_deref().map(str::trim) {
            None | Some("") => {
                issues.push(FieldIssue::Required(ValidationField::Length));
                ReelLength::default()
            }
            Some(label) => ReelLength::from_str(label).unwrap_or_else(|_| {
                issues.push(FieldIssue::NotAllowed {
                    field: ValidationField::Length,
                    value: label.to_string(),
                });
                ReelLength::default()
            }),
        };

        if !issues.is_empty() {
            issues.sort_by_key(FieldIssue::field);
            return Err(ValidationError::new(issues));
        }
        Ok(RefinementRequest {
            original_script,
            topic,
            length,
            language,
            original_tone,
            objective,
            refinement_goal,
        })
    }
}

/// A single revised script.
///
/// # Examples
///
/// ```
/// use reelscript_core::RefinementResult;
///
/// assert!(RefinementResult::new("Shorter now.").is_ok());
/// assert!(RefinementResult::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinementResult {
    refined_script: String,
}

impl RefinementResult {
    /// Wrap a revised script, rejecting blank text.
    ///
    /// # Errors
    ///
    /// Returns [`ContractErrorKind::EmptyOutput`] when the text is blank.
    #[track_caller]
    pub fn new(text: impl Into<String>) -> Result<Self, ContractError> {
        let refined_script = text.into();
        if refined_script.trim().is_empty() {
            return Err(ContractError::new(ContractErrorKind::EmptyOutput));
        }
        Ok(Self { refined_script })
    }

    /// The revised script.
    pub fn refined_script(&self) -> &str {
        &self.refined_script
    }

    /// Consume the result, yielding the text.
    pub fn into_script(self) -> String {
        self.refined_script
    }
}
