//! Drives the generation and refinement flows against a shared session.

use crate::{Resolution, Session};
use parking_lot::Mutex;
use reelscript_core::{CreativeBrief, FieldOptions, RefinementGoal};
use reelscript_error::{ReelscriptResult, ValidationError};
use reelscript_flows::{generate_scripts, refine_script};
use reelscript_interface::ReelscriptDriver;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Runs flows and applies their results to a [`Session`].
///
/// Clones share the same session, so a generation started from one clone
/// makes in-flight work started from another stale. The session lock is
/// never held across a model call.
#[derive(Clone)]
pub struct Orchestrator {
    driver: Arc<dyn ReelscriptDriver>,
    options: FieldOptions,
    session: Arc<Mutex<Session>>,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("provider", &self.driver.provider_name())
            .field("model", &self.driver.model_name())
            .field("session", &*self.session.lock())
            .finish()
    }
}

impl Orchestrator {
    /// Create an orchestrator with an empty session.
    pub fn new(driver: Arc<dyn ReelscriptDriver>, options: FieldOptions) -> Self {
        Self {
            driver,
            options,
            session: Arc::new(Mutex::new(Session::new())),
        }
    }

    /// Allowed field values.
    pub fn options(&self) -> &FieldOptions {
        &self.options
    }

    /// Copy of the current session.
    pub fn snapshot(&self) -> Session {
        self.session.lock().clone()
    }

    /// Generate scripts for `brief` and record the outcome.
    ///
    /// Model and contract failures land in the session as
    /// [`GenerationState::Failed`](crate::GenerationState::Failed) and are not
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns a validation error, leaving the session untouched, when the
    /// brief is invalid.
    #[instrument(skip(self, brief), fields(sequence = tracing::field::Empty))]
    pub async fn generate(&self, brief: CreativeBrief) -> ReelscriptResult<Resolution> {
        brief.validate(&self.options)?;

        let ticket = self.session.lock().begin_generation(brief.clone());
        tracing::Span::current().record("sequence", ticket.sequence());

        let outcome = generate_scripts(self.driver.as_ref(), &brief, &self.options).await;

        let resolution = self.session.lock().complete_generation(ticket, outcome);
        debug!(?resolution, "Generation resolved");
        Ok(resolution)
    }

    /// Refine the script at `index` toward `goal` and record the outcome.
    ///
    /// Model and contract failures are stored on that script only.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an unusable goal, or a session error
    /// when there are no scripts, the index is out of range, or that script
    /// is already being refined. The session is untouched in both cases.
    #[instrument(skip(self, goal), fields(goal = ?goal))]
    pub async fn refine(&self, index: usize, goal: RefinementGoal) -> ReelscriptResult<Resolution> {
        if let Some(issue) = goal.check(&self.options) {
            return Err(ValidationError::new(vec![issue]).into());
        }

        let (ticket, request) = self.session.lock().begin_refinement(index, &goal)?;

        let outcome = refine_script(self.driver.as_ref(), &request).await;

        let resolution = self.session.lock().complete_refinement(ticket, outcome);
        debug!(?resolution, "Refinement resolved");
        Ok(resolution)
    }
}
