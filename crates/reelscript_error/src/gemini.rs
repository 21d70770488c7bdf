//! Gemini-specific error types.

/// Gemini-specific error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GeminiErrorKind {
    /// API key not found in environment
    #[display("GEMINI_API_KEY environment variable not set")]
    MissingApiKey,
    /// Failed to create the HTTP client
    #[display("Failed to create Gemini client: {}", _0)]
    ClientCreation(String),
    /// API request failed before a response arrived
    #[display("Gemini API request failed: {}", _0)]
    ApiRequest(String),
    /// HTTP error with status code and message
    #[display("HTTP {} error: {}", status_code, message)]
    HttpError {
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },
    /// Response body could not be decoded
    #[display("Failed to decode Gemini response: {}", _0)]
    ResponseDecode(String),
    /// Response contained no candidate text
    #[display("Gemini returned no candidates")]
    EmptyResponse,
    /// Prompt or candidate was blocked by the safety system
    #[display("Gemini blocked the request: {}", _0)]
    Blocked(String),
}

/// Gemini error with source location tracking.
///
/// # Examples
///
/// ```
/// use reelscript_error::{GeminiError, GeminiErrorKind};
///
/// let err = GeminiError::new(GeminiErrorKind::MissingApiKey);
/// assert!(format!("{}", err).contains("GEMINI_API_KEY"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Gemini Error: {} at line {} in {}", kind, line, file)]
pub struct GeminiError {
    /// The kind of error that occurred
    pub kind: GeminiErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GeminiError {
    /// Create a new GeminiError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GeminiErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
