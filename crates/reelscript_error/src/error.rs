//! Top-level error wrapper types.

use crate::{
    ConfigError, ContractError, GeminiError, HttpError, IoError, JsonError, SessionError,
    TemplateError, ValidationError,
};

/// Every error condition the Reelscript crates can raise.
///
/// # Examples
///
/// ```
/// use reelscript_error::{HttpError, ReelscriptError};
///
/// let err: ReelscriptError = HttpError::new("Connection failed").into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum ReelscriptErrorKind {
    /// HTTP transport error
    #[from(HttpError)]
    Http(HttpError),
    /// Terminal or file I/O error
    #[from(IoError)]
    Io(IoError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Prompt template error
    #[from(TemplateError)]
    Template(TemplateError),
    /// Rejected user input
    #[from(ValidationError)]
    Validation(ValidationError),
    /// Model response broke its output contract
    #[from(ContractError)]
    Contract(ContractError),
    /// Gemini backend error
    #[from(GeminiError)]
    Gemini(GeminiError),
    /// Session state machine refused a request
    #[from(SessionError)]
    Session(SessionError),
}

/// Reelscript error with kind discrimination.
///
/// # Examples
///
/// ```
/// use reelscript_error::{ConfigError, ReelscriptResult};
///
/// fn might_fail() -> ReelscriptResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Reelscript Error: {}", _0)]
pub struct ReelscriptError(Box<ReelscriptErrorKind>);

impl ReelscriptError {
    /// Create a new error from a kind.
    pub fn new(kind: ReelscriptErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ReelscriptErrorKind {
        &self.0
    }

    /// The validation failure, if this error is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self.kind() {
            ReelscriptErrorKind::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl<T> From<T> for ReelscriptError
where
    T: Into<ReelscriptErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Reelscript operations.
pub type ReelscriptResult<T> = std::result::Result<T, ReelscriptError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ContractErrorKind, FieldIssue, ValidationField};

    #[test]
    fn test_validation_is_discoverable() {
        let err: ReelscriptError =
            ValidationError::new(vec![FieldIssue::Required(ValidationField::Language)]).into();
        let validation = err.as_validation().expect("validation error");
        assert_eq!(validation.issues[0].field(), ValidationField::Language);
    }

    #[test]
    fn test_contract_is_not_validation() {
        let err: ReelscriptError = ContractError::new(ContractErrorKind::EmptyOutput).into();
        assert!(err.as_validation().is_none());
        assert!(err.to_string().contains("empty script"));
    }
}
