//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - init/promise/complete/status/cancel: the tool surface
//! - idle/message: event intake from the host

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ralph-loop - keep a coding agent iterating until its promise holds
#[derive(Parser, Debug)]
#[command(name = "ralph-loop")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Workspace directory holding the loop state
    #[arg(short, long, global = true, default_value = ".")]
    pub workspace: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start a new loop for a task
    Init {
        /// Task description to work on
        task: String,

        /// Maximum iterations before stopping (0 = unlimited)
        #[arg(short, long)]
        max_iterations: Option<u32>,
    },

    /// Record the completion promise for the active loop
    Promise {
        /// Verifiable statement that is true exactly when the task is done
        promise: String,
    },

    /// Report whether the task is complete
    Complete {
        /// true if the completion promise is genuinely fulfilled
        #[arg(action = clap::ArgAction::Set)]
        complete: bool,

        /// Summary of what was done
        summary: Option<String>,
    },

    /// Show the current loop state
    Status,

    /// Cancel the active loop
    Cancel,

    /// Deliver an "agent went idle" notification
    Idle,

    /// Deliver an "agent produced a message" notification
    Message {
        /// Text segments of the message, joined in order
        text: Vec<String>,
    },
}
