//! The loop state machine
//!
//! Decides, on each lifecycle event, whether to end the loop, intercept
//! and inject a completion check, or pass through untouched. Owns the
//! iteration accounting and budget enforcement. Three states, with the
//! first encoded as absence of a record:
//!
//! ```text
//! NoLoop --init--> AwaitingPromise --promise--> Iterating --complete/budget/cancel--> NoLoop
//! ```
//!
//! Every operation is a load-mutate-save over the [`StateStore`]; the host
//! delivers events one at a time per workspace, so no locking is needed
//! beyond that sequence.

use log::info;

use crate::domain::{
    CompletionOutcome, IdleOutcome, LoopPhase, LoopState, MessageOutcome, signal,
    DEFAULT_MAX_ITERATIONS,
};
use crate::error::{RalphError, Result};
use crate::guidance;
use crate::store::StateStore;

/// Default summary when a completion report omits one
pub const DEFAULT_SUMMARY: &str = "Task completed successfully.";

/// The iteration controller for one workspace
pub struct LoopController {
    store: StateStore,
    default_max_iterations: u32,
}

impl LoopController {
    /// Create a controller over the given store
    pub fn new(store: StateStore) -> Self {
        Self {
            store,
            default_max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Override the budget used when init does not specify one
    pub fn with_default_max_iterations(mut self, max_iterations: u32) -> Self {
        self.default_max_iterations = max_iterations;
        self
    }

    /// The underlying store
    pub fn store(&self) -> &StateStore {
        &self.store
    }

    /// Load the record, treating an inactive one as no loop
    fn load_active(&self) -> Option<LoopState> {
        self.store.load().filter(|state| state.active)
    }

    /// Start a new loop: `NoLoop -> AwaitingPromise`
    ///
    /// The at-most-one-active-loop invariant is re-checked against the
    /// store on every call.
    pub fn init(&self, task: &str, max_iterations: Option<u32>) -> Result<LoopState> {
        if self.load_active().is_some() {
            return Err(RalphError::AlreadyActive);
        }

        let state = LoopState::new(task, max_iterations.unwrap_or(self.default_max_iterations));
        self.store.save(&state)?;

        info!(target: "ralph-loop", "Loop initialized: {}", task);
        Ok(state)
    }

    /// Record the completion promise: `AwaitingPromise|Iterating -> Iterating`
    ///
    /// Idempotent; re-invoking overwrites the promise text.
    pub fn set_promise(&self, promise: &str) -> Result<LoopState> {
        let mut state = self.load_active().ok_or(RalphError::NoActiveLoop)?;
        state.establish_promise(promise);
        self.store.save(&state)?;

        info!(target: "ralph-loop", "Completion promise established: {}", promise);
        Ok(state)
    }

    /// Handle an "agent went idle" notification
    ///
    /// Ordered decision: no loop passes through; an exhausted budget ends
    /// the loop silently; a loop still awaiting its promise passes
    /// through so the agent can articulate it unhindered; otherwise the
    /// idle moment is intercepted with a completion check.
    pub fn on_idle(&self) -> Result<IdleOutcome> {
        let Some(mut state) = self.load_active() else {
            return Ok(IdleOutcome::PassThrough);
        };

        if state.budget_exhausted() {
            info!(
                target: "ralph-loop",
                "Max iterations ({}) reached. Stopping loop.",
                state.max_iterations
            );
            self.store.delete()?;
            return Ok(IdleOutcome::LoopEnded {
                max_iterations: state.max_iterations,
            });
        }

        if state.phase() == LoopPhase::AwaitingPromise {
            return Ok(IdleOutcome::PassThrough);
        }

        info!(
            target: "ralph-loop",
            "Ralph loop iteration {} - checking completion",
            state.iteration
        );

        // Guidance carries the number of the check being injected; the
        // persisted counter then moves on to the next one.
        let guidance = guidance::render(&state);
        state.advance();
        self.store.save(&state)?;

        Ok(IdleOutcome::Intercept { guidance })
    }

    /// Handle an "agent produced a message" notification
    ///
    /// Scans the text segments for markers. Promise establishment is
    /// processed before the completion judgment, so a single message can
    /// both declare the promise and certify it.
    pub fn on_message<S: AsRef<str>>(&self, segments: &[S]) -> Result<MessageOutcome> {
        let Some(mut state) = self.load_active() else {
            return Ok(MessageOutcome::default());
        };

        let signals = signal::scan_segments(segments);
        let mut outcome = MessageOutcome::default();

        if !state.promise_established
            && let Some(promise) = signals.promise
        {
            info!(target: "ralph-loop", "Completion promise established: {}", promise);
            state.establish_promise(promise);
            self.store.save(&state)?;
            outcome.promise_recorded = true;
        }

        match signals.complete {
            Some(true) => {
                info!(
                    target: "ralph-loop",
                    "Task completed after {} iterations",
                    state.iteration
                );
                self.store.delete()?;
                outcome.completion = Some(true);
            }
            Some(false) => {
                info!(
                    target: "ralph-loop",
                    "Task incomplete - continuing iteration {}",
                    state.iteration
                );
                outcome.completion = Some(false);
            }
            None => {}
        }

        Ok(outcome)
    }

    /// Handle an explicit completion report from the tool surface
    pub fn report_completion(
        &self,
        complete: bool,
        summary: Option<&str>,
    ) -> Result<CompletionOutcome> {
        let state = self.load_active().ok_or(RalphError::NoActiveLoop)?;

        if complete {
            info!(
                target: "ralph-loop",
                "Task completed after {} iterations",
                state.iteration
            );
            self.store.delete()?;
            Ok(CompletionOutcome::Completed {
                iterations: state.iteration,
                summary: summary.unwrap_or(DEFAULT_SUMMARY).to_string(),
            })
        } else {
            info!(
                target: "ralph-loop",
                "Task incomplete - continuing iteration {}",
                state.iteration
            );
            Ok(CompletionOutcome::Incomplete {
                promise: state.completion_promise,
            })
        }
    }

    /// Read-only snapshot of the current state; never mutates
    pub fn status(&self) -> Option<LoopState> {
        self.store.load()
    }

    /// Cancel the loop, reporting the iteration at which it stopped
    ///
    /// Returns `None` when there was nothing to cancel. A stale inactive
    /// record counts as nothing to cancel but is still swept from disk.
    pub fn cancel(&self) -> Result<Option<u32>> {
        let Some(state) = self.store.load() else {
            return Ok(None);
        };

        self.store.delete()?;
        if !state.active {
            return Ok(None);
        }

        info!(
            target: "ralph-loop",
            "Loop cancelled at iteration {}",
            state.iteration
        );
        Ok(Some(state.iteration))
    }
}
