//! Completion-check guidance rendering
//!
//! Pure function of the loop state. The rendered text is injected as the
//! agent's next input when an idle event is intercepted; the agent answers
//! by emitting a completion marker, which the signal scanner picks up on
//! the next message event.

use crate::domain::LoopState;

const RULE: &str =
    "═══════════════════════════════════════════════════════════════════════════════";

/// Render the completion-check prompt for the current iteration
pub fn render(state: &LoopState) -> String {
    let promise = state
        .completion_promise
        .as_deref()
        .unwrap_or("(no promise recorded)");

    // The check numbered max-1 is the last one injected: the next idle
    // event hits the budget ceiling and ends the loop without rendering.
    let final_warning = if state.max_iterations > 0 && state.iteration + 1 >= state.max_iterations {
        "\nWARNING: This is your FINAL iteration. If the task is incomplete,\n\
         document what was accomplished and what remains to be done.\n"
    } else {
        ""
    };

    format!(
        "\n{RULE}\n\
         RALPH LOOP - COMPLETION CHECK (Iteration {iteration})\n\
         {RULE}\n\
         \n\
         STOP! Before prompting the user, you must check if the task is complete.\n\
         \n\
         Original Task:\n\
         {task}\n\
         \n\
         Your Completion Promise:\n\
         {promise}\n\
         \n\
         EVALUATE NOW: Is your completion promise fulfilled?\n\
         \n\
         If YES (promise is genuinely TRUE):\n\
         \x20 Output: <ralph-complete>true</ralph-complete>\n\
         \x20 Then provide a summary of what was accomplished.\n\
         \n\
         If NO (promise is NOT yet TRUE):\n\
         \x20 Output: <ralph-complete>false</ralph-complete>\n\
         \x20 Then CONTINUE WORKING on the task. Do NOT prompt the user for input.\n\
         \n\
         \x20 Ask yourself:\n\
         \x20 - What remains to be done?\n\
         \x20 - What is blocking progress?\n\
         \x20 - What should I try next?\n\
         \n\
         \x20 Then take action to move toward completion.\n\
         \n\
         CRITICAL RULES:\n\
         \x20 - Do NOT output <ralph-complete>true</ralph-complete> unless the promise is GENUINELY fulfilled\n\
         \x20 - Do NOT prompt the user for input if the task is incomplete\n\
         \x20 - Do NOT give up - iterate until completion or max iterations reached\n\
         \x20 - Review your previous work in files and git history\n\
         \x20 - Self-correct based on test results, errors, or failures\n\
         \x20 - Make incremental progress toward the completion promise\n\
         {final_warning}\
         {RULE}\n",
        iteration = state.iteration_display(),
        task = state.original_task,
    )
}
