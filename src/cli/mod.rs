//! CLI module for ralph-loop - command-line interface and subcommands.
//!
//! Exposes the five tool operations as subcommands plus event intake
//! (`idle`, `message`) so a host can drive the controller per notification.

pub mod commands;

pub use commands::Cli;
