use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;

mod cli;
mod config;

use cli::Cli;
use cli::commands::Commands;
use config::Config;

use ralph_loop::controller::LoopController;
use ralph_loop::domain::IdleOutcome;
use ralph_loop::store::StateStore;
use ralph_loop::tools::{
    ToolSurface, TOOL_CANCEL, TOOL_COMPLETE, TOOL_INIT, TOOL_PROMISE, TOOL_STATUS,
};

fn setup_logging() -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ralph-loop")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("ralph-loop.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.verbose {
        println!("{}", "Verbose mode enabled".yellow());
    }

    let store = StateStore::with_dir_name(&cli.workspace, &config.storage.state_dir);
    let controller = LoopController::new(store)
        .with_default_max_iterations(config.iteration.default_max_iterations);
    let surface = ToolSurface::new(controller);

    match &cli.command {
        Commands::Init {
            task,
            max_iterations,
        } => {
            let mut args = serde_json::json!({ "task": task });
            if let Some(max) = max_iterations {
                args["maxIterations"] = (*max).into();
            }
            println!("{}", surface.dispatch(TOOL_INIT, &args));
        }
        Commands::Promise { promise } => {
            println!(
                "{}",
                surface.dispatch(TOOL_PROMISE, &serde_json::json!({ "promise": promise }))
            );
        }
        Commands::Complete { complete, summary } => {
            let mut args = serde_json::json!({ "complete": complete });
            if let Some(summary) = summary {
                args["summary"] = summary.clone().into();
            }
            println!("{}", surface.dispatch(TOOL_COMPLETE, &args));
        }
        Commands::Status => {
            println!("{}", surface.dispatch(TOOL_STATUS, &serde_json::json!({})));
        }
        Commands::Cancel => {
            println!("{}", surface.dispatch(TOOL_CANCEL, &serde_json::json!({})));
        }
        Commands::Idle => handle_idle_event(&surface)?,
        Commands::Message { text } => handle_message_event(&surface, text)?,
    }

    Ok(())
}

/// Deliver an idle notification; prints guidance to stdout when the idle
/// moment is intercepted, so the host can inject it verbatim.
fn handle_idle_event(surface: &ToolSurface) -> Result<()> {
    match surface.controller().on_idle()? {
        IdleOutcome::Intercept { guidance } => println!("{}", guidance),
        IdleOutcome::LoopEnded { max_iterations } => {
            println!(
                "{}",
                format!("Loop ended: max iterations ({}) reached.", max_iterations).yellow()
            );
        }
        IdleOutcome::PassThrough => println!("{}", "No interception.".dimmed()),
    }
    Ok(())
}

fn handle_message_event(surface: &ToolSurface, segments: &[String]) -> Result<()> {
    let outcome = surface.controller().on_message(segments)?;

    if outcome.promise_recorded {
        println!("{}", "Completion promise recorded.".green());
    }
    match outcome.completion {
        Some(true) => println!("{}", "Completion signal: true. Loop ended.".green()),
        Some(false) => println!("{}", "Completion signal: false. Loop continues.".yellow()),
        None => {
            if outcome.is_noop() {
                println!("{}", "No markers found.".dimmed());
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    // Setup logging first
    setup_logging().context("Failed to setup logging")?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    // Run the main application logic
    run_application(&cli, &config).context("Application failed")?;

    Ok(())
}
