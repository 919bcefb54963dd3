//! ralph-loop - a self-driving iteration controller for coding agents
//!
//! Keeps an agent working on a task across many turns without human
//! intervention. The agent declares a verifiable completion promise up
//! front; every time the session would go idle, the controller intercepts
//! and injects a completion-check prompt instead of handing control back
//! to the human. The loop ends when the agent certifies the promise is
//! true, when the iteration budget runs out, or on explicit cancel.

pub mod controller;
pub mod domain;
pub mod error;
pub mod guidance;
pub mod store;
pub mod tools;

pub use error::{RalphError, Result};
