//! Tool surface - the five operations the agent can call directly
//!
//! Lets the agent (or a human) mutate and observe loop state without
//! going through signal parsing: init, promise, complete, status, cancel.

mod definition;
mod surface;

pub use definition::ToolSpec;
pub use surface::{
    ToolSurface, definitions, TOOL_CANCEL, TOOL_COMPLETE, TOOL_INIT, TOOL_PROMISE, TOOL_STATUS,
};
