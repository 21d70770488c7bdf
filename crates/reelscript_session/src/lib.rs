//! Session state for script generation and refinement.
//!
//! A [`Session`] tracks one generation cycle and, per script, one refinement
//! cycle. Every request hands out a ticket; a resolution presented with a
//! ticket that no longer matches the session is discarded as stale. The
//! [`Orchestrator`] drives the flows against a shared session.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod item;
mod orchestrator;
mod progress;
mod session;

pub use item::{RefinementState, ScriptItem};
pub use orchestrator::Orchestrator;
pub use progress::{PROGRESS_TICK, Progress, with_progress};
pub use session::{
    GENERATION_FAILED_MESSAGE, GenerationState, GenerationTicket, REFINEMENT_FAILED_MESSAGE,
    RefinementTicket, Resolution, Session,
};
