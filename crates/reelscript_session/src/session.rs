//! The generation/refinement state machine.

use crate::ScriptItem;
use reelscript_core::{CreativeBrief, RefinementGoal, RefinementRequest, RefinementResult, ScriptSet};
use reelscript_error::{ReelscriptResult, SessionError, SessionErrorKind};
use tracing::{debug, error, warn};

/// Shown when a generation fails, whatever the cause.
pub const GENERATION_FAILED_MESSAGE: &str = "Hmm, couldn't quite generate scripts with that. \
Could you try rephrasing your topic or adjusting the settings? Sometimes a different approach \
sparks the AI's creativity!";

/// Shown next to a script whose refinement failed.
pub const REFINEMENT_FAILED_MESSAGE: &str =
    "Couldn't refine this script. Try again or pick a different refinement.";

/// Lifecycle of the current generation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum GenerationState {
    /// Nothing requested yet
    #[default]
    Idle,
    /// Waiting on the model
    Submitting {
        /// Sequence of the in-flight generation
        sequence: u64,
    },
    /// Scripts available
    Succeeded {
        /// Sequence that produced the scripts
        sequence: u64,
    },
    /// Last generation failed
    Failed {
        /// Sequence that failed
        sequence: u64,
        /// User-facing message
        message: String,
    },
}

/// Handle for one generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GenerationTicket {
    sequence: u64,
}

impl GenerationTicket {
    /// Sequence number of the generation.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

/// Handle for one refinement request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RefinementTicket {
    generation: u64,
    index: usize,
    attempt: u64,
}

impl RefinementTicket {
    /// Script position being refined.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Generation the script belongs to.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What happened to a resolution presented with a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// The session was updated
    Applied,
    /// The ticket was outdated and the result was dropped
    Stale,
}

/// Session state: one generation cycle and its script items.
///
/// # Examples
///
/// ```
/// use reelscript_core::{CreativeBrief, ScriptSet};
/// use reelscript_session::{GenerationState, Resolution, Session};
///
/// let mut session = Session::new();
/// let brief = CreativeBrief::builder().topic("3-ingredient healthy breakfasts").build().unwrap();
///
/// let first = session.begin_generation(brief.clone());
/// let second = session.begin_generation(brief);
///
/// let scripts = ScriptSet::new((1..=5).map(|i| format!("Script {i}")).collect()).unwrap();
/// assert_eq!(session.complete_generation(first, Ok(scripts.clone())), Resolution::Stale);
/// assert_eq!(session.complete_generation(second, Ok(scripts)), Resolution::Applied);
/// assert!(matches!(session.state(), GenerationState::Succeeded { .. }));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    sequence: u64,
    attempts: u64,
    state: GenerationState,
    brief: Option<CreativeBrief>,
    items: Vec<ScriptItem>,
}

impl Session {
    /// Empty idle session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current generation state.
    pub fn state(&self) -> &GenerationState {
        &self.state
    }

    /// Script items of the current generation, in display order.
    pub fn items(&self) -> &[ScriptItem] {
        &self.items
    }

    /// Brief of the current generation.
    pub fn brief(&self) -> Option<&CreativeBrief> {
        self.brief.as_ref()
    }

    /// Sequence number of the latest generation.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Whether a generation is in flight.
    pub fn is_generating(&self) -> bool {
        matches!(self.state, GenerationState::Submitting { .. })
    }

    /// Start a generation, discarding the current items.
    ///
    /// Any generation or refinement still in flight becomes stale.
    pub fn begin_generation(&mut self, brief: CreativeBrief) -> GenerationTicket {
        self.sequence += 1;
        self.state = GenerationState::Submitting {
            sequence: self.sequence,
        };
        self.brief = Some(brief);
        self.items.clear();
        debug!(sequence = self.sequence, "Generation started");

        GenerationTicket {
            sequence: self.sequence,
        }
    }

    /// Resolve a generation.
    ///
    /// A failure is logged and replaced by [`GENERATION_FAILED_MESSAGE`].
    pub fn complete_generation(
        &mut self,
        ticket: GenerationTicket,
        outcome: ReelscriptResult<ScriptSet>,
    ) -> Resolution {
        if self.state != (GenerationState::Submitting { sequence: ticket.sequence }) {
            debug!(
                ticket = ticket.sequence,
                current = self.sequence,
                "Dropping stale generation result"
            );
            return Resolution::Stale;
        }

        match outcome {
            Ok(set) => {
                self.items = set.into_scripts().into_iter().map(ScriptItem::new).collect();
                self.state = GenerationState::Succeeded {
                    sequence: ticket.sequence,
                };
                debug!(sequence = ticket.sequence, "Generation succeeded");
            }
            Err(e) => {
                error!(sequence = ticket.sequence, error = %e, "Generation failed");
                self.items.clear();
                self.state = GenerationState::Failed {
                    sequence: ticket.sequence,
                    message: GENERATION_FAILED_MESSAGE.to_string(),
                };
            }
        }
        Resolution::Applied
    }

    /// Start refining the script at `index`.
    ///
    /// The request refines the script's current display text.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] when no scripts are available, the index is
    /// out of range, or that script is already being refined.
    pub fn begin_refinement(
        &mut self,
        index: usize,
        goal: &RefinementGoal,
    ) -> Result<(RefinementTicket, RefinementRequest), SessionError> {
        let (GenerationState::Succeeded { sequence }, Some(brief)) = (&self.state, &self.brief)
        else {
            return Err(SessionError::new(SessionErrorKind::NoScripts));
        };
        let generation = *sequence;

        let len = self.items.len();
        let item = self
            .items
            .get_mut(index)
            .ok_or_else(|| SessionError::new(SessionErrorKind::IndexOutOfRange { index, len }))?;
        if item.is_busy() {
            return Err(SessionError::new(SessionErrorKind::RefinementInFlight(index)));
        }

        let request = RefinementRequest::from_brief(item.display_text(), brief, goal);
        self.attempts += 1;
        item.start_refinement(self.attempts);
        debug!(index, attempt = self.attempts, "Refinement started");

        let ticket = RefinementTicket {
            generation,
            index,
            attempt: self.attempts,
        };
        Ok((ticket, request))
    }

    /// Resolve a refinement, touching only the ticket's item.
    ///
    /// A failure is logged and replaced by [`REFINEMENT_FAILED_MESSAGE`].
    pub fn complete_refinement(
        &mut self,
        ticket: RefinementTicket,
        outcome: ReelscriptResult<RefinementResult>,
    ) -> Resolution {
        let current = self.state == (GenerationState::Succeeded {
            sequence: ticket.generation,
        });
        let item = match self.items.get_mut(ticket.index) {
            Some(item) if current && item.awaits(ticket.attempt) => item,
            _ => {
                debug!(
                    index = ticket.index,
                    generation = ticket.generation,
                    "Dropping stale refinement result"
                );
                return Resolution::Stale;
            }
        };

        match outcome {
            Ok(result) => {
                item.apply_refinement(result.into_script());
                debug!(index = ticket.index, "Refinement applied");
            }
            Err(e) => {
                warn!(index = ticket.index, error = %e, "Refinement failed");
                item.fail_refinement(REFINEMENT_FAILED_MESSAGE);
            }
        }
        Resolution::Applied
    }
}
