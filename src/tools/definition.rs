//! Tool definitions
//!
//! A tool carries a name, an LLM-facing description, and a JSON schema for
//! its arguments, so a host agent runtime can register it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A tool definition the host can expose to its agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    /// Tool name (e.g., "ralph-init")
    pub name: String,
    /// Human-readable description for the LLM
    pub description: String,
    /// JSON schema for input parameters
    pub input_schema: Value,
}

impl ToolSpec {
    /// Create a new tool definition with an empty schema
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        }
    }

    /// Set input schema
    pub fn with_schema(mut self, schema: Value) -> Self {
        self.input_schema = schema;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_spec_new() {
        let spec = ToolSpec::new("ralph-status", "Get loop status");
        assert_eq!(spec.name, "ralph-status");
        assert_eq!(spec.description, "Get loop status");
        assert_eq!(spec.input_schema["type"], "object");
    }

    #[test]
    fn test_tool_spec_with_schema() {
        let spec = ToolSpec::new("ralph-init", "Start a loop").with_schema(serde_json::json!({
            "type": "object",
            "properties": {
                "task": { "type": "string" }
            },
            "required": ["task"]
        }));

        assert!(spec.input_schema["properties"]["task"].is_object());
        assert_eq!(spec.input_schema["required"][0], "task");
    }

    #[test]
    fn test_tool_spec_serialization() {
        let spec = ToolSpec::new("ralph-cancel", "Cancel the loop");
        let json = serde_json::to_string(&spec).unwrap();
        assert!(json.contains("\"name\":\"ralph-cancel\""));

        let restored: ToolSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.name, spec.name);
    }
}
