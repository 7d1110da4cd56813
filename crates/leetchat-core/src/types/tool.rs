//! Tool/function calling types

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Tool declaration exposed to the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDeclaration {
    /// Tool name (function name), unique within a registry
    pub name: String,
    /// Description of what the tool does
    pub description: String,
    /// JSON Schema for the arguments
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

impl ToolDeclaration {
    /// Create a declaration that takes no arguments
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema: json!({ "type": "object", "properties": {} }),
        }
    }

    /// Set the argument schema
    pub fn with_schema(mut self, schema: Value) -> Self {
        self.input_schema = schema;
        self
    }

    /// Names listed under the schema's `required` key
    pub fn required_arguments(&self) -> Vec<&str> {
        self.input_schema
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

/// Tool invocation requested by the model. Untrusted input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallIntent {
    /// Provider-assigned call id, when the provider supplies one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Name of the tool being called
    pub name: String,
    /// Arguments as produced by the model
    #[serde(default)]
    pub arguments: Value,
}

impl ToolCallIntent {
    /// Create a new intent
    pub fn new(name: impl Into<String>, arguments: Value) -> Self {
        Self {
            id: None,
            name: name.into(),
            arguments,
        }
    }

    /// Attach the provider call id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Outcome of executing one intent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "value", rename_all = "snake_case")]
pub enum ToolResult {
    /// The tool ran and produced a payload
    Success(Value),
    /// The tool could not run or the downstream call failed
    Failure(String),
}

impl ToolResult {
    /// Create a failure result
    pub fn failure(message: impl Into<String>) -> Self {
        ToolResult::Failure(message.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ToolResult::Success(_))
    }

    /// The failure message, if any
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            ToolResult::Failure(message) => Some(message),
            ToolResult::Success(_) => None,
        }
    }

    /// Serialize into the text injected back into the conversation.
    ///
    /// Success becomes `{"tool": name, "result": payload}` and failure
    /// `{"tool": name, "error": message}`.
    pub fn to_envelope(&self, tool_name: &str) -> serde_json::Result<String> {
        let envelope = match self {
            ToolResult::Success(payload) => json!({ "tool": tool_name, "result": payload }),
            ToolResult::Failure(message) => json!({ "tool": tool_name, "error": message }),
        };
        serde_json::to_string(&envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_required_arguments() {
        let tool = ToolDeclaration::new("add_problems_to_todo", "Add problems").with_schema(json!({
            "type": "object",
            "properties": { "problems": { "type": "array" } },
            "required": ["problems"]
        }));

        assert_eq!(tool.required_arguments(), vec!["problems"]);
        assert!(ToolDeclaration::new("x", "y").required_arguments().is_empty());
    }

    #[test]
    fn test_intent_args() {
        let intent = ToolCallIntent::new("get_all_problems", json!({ "limit": 5 })).with_id("call_1");
        assert_eq!(intent.arguments["limit"], json!(5));
        assert_eq!(intent.id.as_deref(), Some("call_1"));
    }

    #[test]
    fn test_intent_defaults_missing_arguments() {
        let intent: ToolCallIntent = serde_json::from_str(r#"{"name":"get_all_problems"}"#).unwrap();
        assert_eq!(intent.arguments, Value::Null);
    }

    #[test]
    fn test_result_envelope() {
        let ok = ToolResult::Success(json!([{ "id": "1" }]));
        let text = ok.to_envelope("get_all_problems").unwrap();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, json!({ "tool": "get_all_problems", "result": [{ "id": "1" }] }));

        let err = ToolResult::failure("missing credentials");
        let parsed: Value = serde_json::from_str(&err.to_envelope("add_problems_to_todo").unwrap()).unwrap();
        assert_eq!(parsed["error"], "missing credentials");
        assert_eq!(err.failure_message(), Some("missing credentials"));
        assert!(!err.is_success());
    }
}
