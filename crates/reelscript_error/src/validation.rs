//! Input validation errors.
//!
//! Validation runs before any network call and reports every offending field
//! at once, so a form can show each message next to its field.

/// Input fields that validation can reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ValidationField {
    /// Brief topic
    #[display("topic")]
    Topic,
    /// Reel length
    #[display("length")]
    Length,
    /// Script language
    #[display("language")]
    Language,
    /// Script tone
    #[display("tone")]
    Tone,
    /// Tone of the script being refined
    #[display("original tone")]
    OriginalTone,
    /// Reel objective
    #[display("objective")]
    Objective,
    /// Script text submitted for refinement
    #[display("original script")]
    OriginalScript,
    /// Refinement instruction
    #[display("refinement goal")]
    RefinementGoal,
}

impl ValidationField {
    /// Wire name of the field, as used in request bodies.
    pub fn key(&self) -> &'static str {
        match self {
            ValidationField::Topic => "topic",
            ValidationField::Length => "length",
            ValidationField::Language => "language",
            ValidationField::Tone => "tone",
            ValidationField::OriginalTone => "originalTone",
            ValidationField::Objective => "objective",
            ValidationField::OriginalScript => "originalScript",
            ValidationField::RefinementGoal => "refinementGoal",
        }
    }
}

/// One rejected field and the reason.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum FieldIssue {
    /// Field is empty or whitespace
    #[display("{} is required", _0)]
    Required(ValidationField),
    /// Field is shorter than the minimum
    #[display("{} needs more detail (min {} chars)", field, min)]
    TooShort {
        /// Offending field
        field: ValidationField,
        /// Minimum length in characters
        min: usize,
    },
    /// Field is longer than the maximum
    #[display("{} is too long (max {} chars)", field, max)]
    TooLong {
        /// Offending field
        field: ValidationField,
        /// Maximum length in characters
        max: usize,
    },
    /// Value is not in the field's allowed set
    #[display("'{}' is not an allowed {}", value, field)]
    NotAllowed {
        /// Offending field
        field: ValidationField,
        /// Rejected value
        value: String,
    },
}

impl FieldIssue {
    /// The field this issue belongs to.
    pub fn field(&self) -> ValidationField {
        match self {
            FieldIssue::Required(field) => *field,
            FieldIssue::TooShort { field, .. }
            | FieldIssue::TooLong { field, .. }
            | FieldIssue::NotAllowed { field, .. } => *field,
        }
    }
}

/// Validation failure carrying every field issue found.
///
/// # Examples
///
/// ```
/// use reelscript_error::{FieldIssue, ValidationError, ValidationField};
///
/// let err = ValidationError::new(vec![
///     FieldIssue::TooShort { field: ValidationField::Topic, min: 10 },
///     FieldIssue::Required(ValidationField::Tone),
/// ]);
/// assert_eq!(err.issues.len(), 2);
/// assert!(err.to_string().contains("topic needs more detail"));
/// ```
#[derive(Debug, Clone, derive_more::Error)]
pub struct ValidationError {
    /// Every rejected field, in field order
    pub issues: Vec<FieldIssue>,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new ValidationError with automatic location tracking.
    #[track_caller]
    pub fn new(issues: Vec<FieldIssue>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            issues,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Issues reported for one field.
    pub fn for_field(&self, field: ValidationField) -> impl Iterator<Item = &FieldIssue> {
        self.issues.iter().filter(move |issue| issue.field() == field)
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Validation Error: ")?;
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", issue)?;
        }
        write!(f, " at line {} in {}", self.line, self.file)
    }
}
