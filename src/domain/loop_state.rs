//! Loop state record and related types
//!
//! A LoopState is the single persisted record of one ralph loop: the
//! original task, the agent-articulated completion promise, and the
//! iteration accounting. At most one exists per workspace; absence of the
//! record means no loop is running.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default iteration budget when init does not specify one
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Persisted state of a single ralph loop
///
/// Serialized in camelCase, the wire format the host plugin ecosystem
/// already uses for this record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoopState {
    /// True iff the loop is currently running
    pub active: bool,

    /// Number of the next completion check (1-indexed)
    pub iteration: u32,

    /// Hard ceiling on completion checks (0 = unlimited)
    pub max_iterations: u32,

    /// When the loop was initialized
    pub started_at: DateTime<Utc>,

    /// The user's request, immutable once set
    pub original_task: String,

    /// Agent-declared statement that is true exactly when the task is done
    pub completion_promise: Option<String>,

    /// Whether a promise has been recorded
    pub promise_established: bool,

    /// When the last completion check was injected
    pub last_checked_at: Option<DateTime<Utc>>,
}

/// Observable phase of an active loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPhase {
    /// Active, waiting for the agent to articulate its promise
    AwaitingPromise,
    /// Active, intercepting idle events with completion checks
    Iterating,
}

impl LoopState {
    /// Create a fresh loop for a task
    pub fn new(task: impl Into<String>, max_iterations: u32) -> Self {
        Self {
            active: true,
            iteration: 1,
            max_iterations,
            started_at: Utc::now(),
            original_task: task.into(),
            completion_promise: None,
            promise_established: false,
            last_checked_at: None,
        }
    }

    /// Current phase of the loop
    ///
    /// The flag and the promise text can fall out of sync via direct tool
    /// calls; a loop counts as iterating when either is present.
    pub fn phase(&self) -> LoopPhase {
        if self.promise_established || self.completion_promise.is_some() {
            LoopPhase::Iterating
        } else {
            LoopPhase::AwaitingPromise
        }
    }

    /// True when the iteration budget is finite and used up
    pub fn budget_exhausted(&self) -> bool {
        self.max_iterations > 0 && self.iteration >= self.max_iterations
    }

    /// Record a completion promise and mark it established
    pub fn establish_promise(&mut self, promise: impl Into<String>) {
        self.completion_promise = Some(promise.into());
        self.promise_established = true;
    }

    /// Advance to the next completion check
    pub fn advance(&mut self) {
        self.iteration += 1;
        self.last_checked_at = Some(Utc::now());
    }

    /// Human-readable iteration vs budget, e.g. "3/10" or "3 (unlimited)"
    pub fn iteration_display(&self) -> String {
        if self.max_iterations > 0 {
            format!("{}/{}", self.iteration, self.max_iterations)
        } else {
            format!("{} (unlimited)", self.iteration)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_fields() {
        let state = LoopState::new("Fix the bug", 10);

        assert!(state.active);
        assert_eq!(state.iteration, 1);
        assert_eq!(state.max_iterations, 10);
        assert_eq!(state.original_task, "Fix the bug");
        assert!(state.completion_promise.is_none());
        assert!(!state.promise_established);
        assert!(state.last_checked_at.is_none());
    }

    #[test]
    fn test_phase_awaiting_promise() {
        let state = LoopState::new("Task", 10);
        assert_eq!(state.phase(), LoopPhase::AwaitingPromise);
    }

    #[test]
    fn test_phase_iterating_after_establish() {
        let mut state = LoopState::new("Task", 10);
        state.establish_promise("all tests pass");
        assert_eq!(state.phase(), LoopPhase::Iterating);
        assert_eq!(state.completion_promise.as_deref(), Some("all tests pass"));
        assert!(state.promise_established);
    }

    #[test]
    fn test_phase_iterating_with_text_but_no_flag() {
        // Promise text alone is authoritative even if the flag was never set
        let mut state = LoopState::new("Task", 10);
        state.completion_promise = Some("docs are updated".to_string());
        assert_eq!(state.phase(), LoopPhase::Iterating);
    }

    #[test]
    fn test_phase_iterating_with_flag_but_no_text() {
        let mut state = LoopState::new("Task", 10);
        state.promise_established = true;
        assert_eq!(state.phase(), LoopPhase::Iterating);
    }

    #[test]
    fn test_budget_exhausted() {
        let mut state = LoopState::new("Task", 3);
        assert!(!state.budget_exhausted());
        state.iteration = 3;
        assert!(state.budget_exhausted());
        state.iteration = 4;
        assert!(state.budget_exhausted());
    }

    #[test]
    fn test_budget_unlimited_never_exhausted() {
        let mut state = LoopState::new("Task", 0);
        state.iteration = 10_000;
        assert!(!state.budget_exhausted());
    }

    #[test]
    fn test_advance_bumps_iteration_and_stamps() {
        let mut state = LoopState::new("Task", 10);
        state.advance();
        assert_eq!(state.iteration, 2);
        assert!(state.last_checked_at.is_some());
    }

    #[test]
    fn test_iteration_display() {
        let mut state = LoopState::new("Task", 10);
        assert_eq!(state.iteration_display(), "1/10");
        state.iteration = 3;
        assert_eq!(state.iteration_display(), "3/10");
        state.max_iterations = 0;
        assert_eq!(state.iteration_display(), "3 (unlimited)");
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let state = LoopState::new("Task", 5);
        let json = serde_json::to_value(&state).unwrap();

        assert_eq!(json["active"], true);
        assert_eq!(json["maxIterations"], 5);
        assert_eq!(json["originalTask"], "Task");
        assert_eq!(json["promiseEstablished"], false);
        assert!(json["completionPromise"].is_null());
        assert!(json["lastCheckedAt"].is_null());
        assert!(json["startedAt"].is_string());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let mut state = LoopState::new("Build the parser", 7);
        state.establish_promise("parser handles all fixtures");
        state.advance();

        let json = serde_json::to_string(&state).unwrap();
        let restored: LoopState = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, state);
    }

    #[test]
    fn test_deserialize_original_wire_format() {
        let json = r#"{
            "active": true,
            "iteration": 4,
            "maxIterations": 0,
            "startedAt": "2026-01-15T10:30:00Z",
            "originalTask": "Fix failing test suite",
            "completionPromise": "all tests pass",
            "promiseEstablished": true,
            "lastCheckedAt": null
        }"#;

        let state: LoopState = serde_json::from_str(json).unwrap();
        assert_eq!(state.iteration, 4);
        assert_eq!(state.max_iterations, 0);
        assert_eq!(state.completion_promise.as_deref(), Some("all tests pass"));
        assert!(state.last_checked_at.is_none());
    }

    #[test]
    fn test_default_max_iterations_constant() {
        assert_eq!(DEFAULT_MAX_ITERATIONS, 100);
    }
}
