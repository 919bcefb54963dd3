//! Tool dispatch and response formatting
//!
//! Routes `(name, JSON args)` calls to the controller and renders the
//! textual responses the agent sees. Every failure comes back as a
//! descriptive message rather than an error; nothing here can take the
//! host down.

use serde_json::Value;

use crate::controller::LoopController;
use crate::domain::CompletionOutcome;

use super::definition::ToolSpec;

pub const TOOL_INIT: &str = "ralph-init";
pub const TOOL_PROMISE: &str = "ralph-promise";
pub const TOOL_COMPLETE: &str = "ralph-complete";
pub const TOOL_STATUS: &str = "ralph-status";
pub const TOOL_CANCEL: &str = "ralph-cancel";

/// Definitions for all five tool operations
pub fn definitions() -> Vec<ToolSpec> {
    vec![
        ToolSpec::new(
            TOOL_INIT,
            "Initialize a new ralph loop for iterative task completion.",
        )
        .with_schema(serde_json::json!({
            "type": "object",
            "properties": {
                "task": {
                    "type": "string",
                    "description": "The task description to work on"
                },
                "maxIterations": {
                    "type": "integer",
                    "description": "Maximum iterations before stopping (default: 100, 0 = unlimited)"
                }
            },
            "required": ["task"]
        })),
        ToolSpec::new(
            TOOL_PROMISE,
            "Set the completion promise for the active ralph loop.",
        )
        .with_schema(serde_json::json!({
            "type": "object",
            "properties": {
                "promise": {
                    "type": "string",
                    "description": "A clear, verifiable statement that will be TRUE when the task is complete"
                }
            },
            "required": ["promise"]
        })),
        ToolSpec::new(
            TOOL_COMPLETE,
            "Signal whether the ralph loop task is complete.",
        )
        .with_schema(serde_json::json!({
            "type": "object",
            "properties": {
                "complete": {
                    "type": "boolean",
                    "description": "true if the completion promise is genuinely fulfilled, false to continue working"
                },
                "summary": {
                    "type": "string",
                    "description": "Summary of what was done (required if complete=true)"
                }
            },
            "required": ["complete"]
        })),
        ToolSpec::new(TOOL_STATUS, "Get the current status of the ralph loop."),
        ToolSpec::new(TOOL_CANCEL, "Cancel the active ralph loop."),
    ]
}

/// Synchronous textual request/response surface over the controller
pub struct ToolSurface {
    controller: LoopController,
}

impl ToolSurface {
    /// Create a surface over the given controller
    pub fn new(controller: LoopController) -> Self {
        Self { controller }
    }

    /// The wrapped controller
    pub fn controller(&self) -> &LoopController {
        &self.controller
    }

    /// Execute a tool call by name
    pub fn dispatch(&self, name: &str, args: &Value) -> String {
        match name {
            TOOL_INIT => self.init(args),
            TOOL_PROMISE => self.promise(args),
            TOOL_COMPLETE => self.complete(args),
            TOOL_STATUS => self.status(),
            TOOL_CANCEL => self.cancel(),
            other => format!("Error: unknown tool: {}", other),
        }
    }

    fn init(&self, args: &Value) -> String {
        let Some(task) = args.get("task").and_then(Value::as_str) else {
            return "Error: missing required argument: task".to_string();
        };
        let max_iterations = args
            .get("maxIterations")
            .and_then(Value::as_u64)
            .map(|v| v as u32);

        match self.controller.init(task, max_iterations) {
            Ok(state) => {
                let budget = if state.max_iterations > 0 {
                    state.max_iterations.to_string()
                } else {
                    "unlimited".to_string()
                };
                format!(
                    "Ralph loop initialized!\n\
                     Task: {}\n\
                     Max iterations: {}\n\
                     \n\
                     Completion promise: not yet established. Declare one with the \
                     {} tool or emit a <ralph-promise> marker in your next message.",
                    state.original_task, budget, TOOL_PROMISE
                )
            }
            Err(e) => format!("Error: {}", e),
        }
    }

    fn promise(&self, args: &Value) -> String {
        let Some(promise) = args.get("promise").and_then(Value::as_str) else {
            return "Error: missing required argument: promise".to_string();
        };

        match self.controller.set_promise(promise) {
            Ok(_) => format!(
                "Completion promise established: {}\n\
                 \n\
                 Work will continue autonomously. When you check completion, use the \
                 {} tool or output <ralph-complete>true</ralph-complete>.",
                promise, TOOL_COMPLETE
            ),
            Err(e) => format!("Error: {}", e),
        }
    }

    fn complete(&self, args: &Value) -> String {
        let Some(complete) = args.get("complete").and_then(Value::as_bool) else {
            return "Error: missing required argument: complete".to_string();
        };
        let summary = args.get("summary").and_then(Value::as_str);

        match self.controller.report_completion(complete, summary) {
            Ok(CompletionOutcome::Completed {
                iterations,
                summary,
            }) => format!(
                "Ralph loop completed after {} iterations.\n\nSummary: {}",
                iterations, summary
            ),
            Ok(CompletionOutcome::Incomplete { promise }) => format!(
                "Task incomplete. Continue working toward the completion promise:\n\
                 \"{}\"\n\
                 \n\
                 Review what remains and take the next step.",
                promise.as_deref().unwrap_or("not yet established")
            ),
            Err(e) => format!("Error: {}", e),
        }
    }

    fn status(&self) -> String {
        match self.controller.status() {
            None => "No active ralph loop.".to_string(),
            Some(state) => format!(
                "Ralph loop status:\n\
                 - Active: {}\n\
                 - Iteration: {}\n\
                 - Started: {}\n\
                 - Task: {}\n\
                 - Promise: {}\n\
                 - Promise established: {}",
                state.active,
                state.iteration_display(),
                state.started_at.to_rfc3339(),
                state.original_task,
                state
                    .completion_promise
                    .as_deref()
                    .unwrap_or("not yet established"),
                state.promise_established
            ),
        }
    }

    fn cancel(&self) -> String {
        match self.controller.cancel() {
            Ok(Some(iteration)) => format!("Ralph loop cancelled at iteration {}.", iteration),
            Ok(None) => "No active ralph loop to cancel.".to_string(),
            Err(e) => format!("Error: {}", e),
        }
    }
}
