//! Session state machine errors.

/// Requests the session refuses to start.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum SessionErrorKind {
    /// No generated scripts are available
    #[display("No generated scripts to refine")]
    NoScripts,
    /// Script index outside the current set
    #[display("Script {} does not exist (have {})", index, len)]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of scripts in the session
        len: usize,
    },
    /// The script already has a refinement in flight
    #[display("Script {} is already being refined", _0)]
    RefinementInFlight(usize),
}

/// Session error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Session Error: {} at line {} in {}", kind, line, file)]
pub struct SessionError {
    /// The specific error condition
    pub kind: SessionErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl SessionError {
    /// Create a new SessionError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SessionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
