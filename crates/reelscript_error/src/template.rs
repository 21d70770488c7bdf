//! Prompt template error types.

/// Raised when a prompt template references a placeholder with no value.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Template Error: {} at line {} in {}", message, line, file)]
pub struct TemplateError {
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl TemplateError {
    /// Create a new TemplateError at the current location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
