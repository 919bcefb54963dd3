//! Domain types for ralph-loop
//!
//! This module contains the core domain types:
//! - LoopState: the persisted record of a single loop
//! - Outcomes: what the controller decided on each event or operation
//! - Signals: markers extracted from agent output

pub mod loop_state;
pub mod outcome;
pub mod signal;

pub use loop_state::{DEFAULT_MAX_ITERATIONS, LoopPhase, LoopState};
pub use outcome::{CompletionOutcome, IdleOutcome, MessageOutcome};
pub use signal::ParsedSignals;
