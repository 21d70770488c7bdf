//! Output contract violations.
//!
//! Raised when a model response does not have the shape an operation promises
//! its caller: a missing field, the wrong number of scripts, or text that is
//! empty once formatting artifacts are stripped.

/// Specific ways a model response can break its output contract.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ContractErrorKind {
    /// Required field absent from the response object
    #[display("Response is missing the '{}' field", _0)]
    MissingField(&'static str),
    /// Field present but of the wrong type
    #[display("Response field '{}' has the wrong type", _0)]
    InvalidField(&'static str),
    /// Script array has the wrong length
    #[display("Expected exactly {} scripts, received {}", expected, actual)]
    WrongCount {
        /// Number of scripts the contract requires
        expected: usize,
        /// Number of scripts actually returned
        actual: usize,
    },
    /// Script at this position is empty after cleanup
    #[display("Script {} is empty", _0)]
    EmptyScript(usize),
    /// Single-text output is empty after cleanup
    #[display("Model returned an empty script")]
    EmptyOutput,
    /// Response text contains no parseable JSON
    #[display("Response is not valid JSON: {}", _0)]
    InvalidJson(String),
}

/// Contract error with source location tracking.
///
/// # Examples
///
/// ```
/// use reelscript_error::{ContractError, ContractErrorKind};
///
/// let err = ContractError::new(ContractErrorKind::WrongCount { expected: 5, actual: 3 });
/// assert!(format!("{}", err).contains("exactly 5"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Contract Error: {} at line {} in {}", kind, line, file)]
pub struct ContractError {
    /// The specific contract violation
    pub kind: ContractErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ContractError {
    /// Create a new ContractError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ContractErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
