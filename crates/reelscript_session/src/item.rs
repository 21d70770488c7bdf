//! Per-script view state.

/// Lifecycle of one script's refinement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum RefinementState {
    /// Never refined
    #[display("idle")]
    Idle,
    /// Refinement in flight
    #[display("refining")]
    Submitting {
        /// Attempt number the resolution must present
        attempt: u64,
    },
    /// Last refinement applied
    #[display("refined")]
    Succeeded,
    /// Last refinement failed
    #[display("failed")]
    Failed {
        /// User-facing message
        message: String,
    },
}

/// One generated script with its optional refinement.
///
/// # Examples
///
/// ```
/// use reelscript_session::ScriptItem;
///
/// let item = ScriptItem::new("Original take.");
/// assert_eq!(item.display_text(), "Original take.");
/// assert!(!item.is_busy());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_getters::Getters)]
pub struct ScriptItem {
    /// Script as generated
    original: String,
    /// Latest refined text
    refined: Option<String>,
    /// Refinement lifecycle
    refinement: RefinementState,
}

impl ScriptItem {
    /// Fresh item for a generated script.
    pub fn new(original: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            refined: None,
            refinement: RefinementState::Idle,
        }
    }

    /// Text to show: the refined version when present, else the original.
    pub fn display_text(&self) -> &str {
        self.refined.as_deref().unwrap_or(self.original.as_str())
    }

    /// Whether a refinement is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(self.refinement, RefinementState::Submitting { .. })
    }

    /// Inline error from the last failed refinement.
    pub fn error(&self) -> Option<&str> {
        match &self.refinement {
            RefinementState::Failed { message } => Some(message.as_str()),
            _ => None,
        }
    }

    pub(crate) fn start_refinement(&mut self, attempt: u64) {
        self.refinement = RefinementState::Submitting { attempt };
    }

    pub(crate) fn awaits(&self, attempt: u64) -> bool {
        self.refinement == RefinementState::Submitting { attempt }
    }

    pub(crate) fn apply_refinement(&mut self, text: String) {
        self.refined = Some(text);
        self.refinement = RefinementState::Succeeded;
    }

    pub(crate) fn fail_refinement(&mut self, message: impl Into<String>) {
        self.refinement = RefinementState::Failed {
            message: message.into(),
        };
    }
}
