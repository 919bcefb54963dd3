//! Controller decision types
//!
//! What the controller decided for each lifecycle event or tool operation.
//! The host acts on these: inject guidance on interception, pass through
//! otherwise.

/// Decision for an idle notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdleOutcome {
    /// No loop, or the promise has not been articulated yet; let the
    /// normal prompt-the-human flow proceed
    PassThrough,

    /// Iteration budget exhausted; the state was deleted and the loop
    /// ends silently with no injection
    LoopEnded {
        /// The budget that was reached
        max_iterations: u32,
    },

    /// Inject this guidance as the agent's next input instead of
    /// prompting the human
    Intercept {
        /// Rendered completion-check prompt
        guidance: String,
    },
}

impl IdleOutcome {
    /// Guidance text to inject, if any
    pub fn guidance(&self) -> Option<&str> {
        match self {
            IdleOutcome::Intercept { guidance } => Some(guidance),
            _ => None,
        }
    }

    /// True when the event should flow through untouched
    pub fn is_pass_through(&self) -> bool {
        matches!(self, IdleOutcome::PassThrough)
    }
}

/// What a message notification changed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageOutcome {
    /// A promise-establishment marker was honored
    pub promise_recorded: bool,
    /// A completion marker was honored (`true` also deleted the state)
    pub completion: Option<bool>,
}

impl MessageOutcome {
    /// True when the message carried no actionable marker
    pub fn is_noop(&self) -> bool {
        !self.promise_recorded && self.completion.is_none()
    }
}

/// Result of an explicit completion report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// The loop ended; the state was deleted
    Completed {
        /// Iteration at which the loop completed
        iterations: u32,
        /// Agent-provided summary, or a default
        summary: String,
    },

    /// The loop keeps running; nudge the agent back to work
    Incomplete {
        /// The promise still to fulfill
        promise: Option<String>,
    },
}
