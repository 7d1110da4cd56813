//! Model gateway trait definition

use async_trait::async_trait;

use crate::types::{Conversation, ToolCallIntent, ToolDeclaration};
use super::error::ProviderResult;

/// Model configuration for gateway requests
#[derive(Debug, Clone)]
pub struct GatewayModelConfig {
    /// Model identifier, optionally prefixed with the provider (`gemini/gemini-2.0-flash`)
    pub model: String,
    /// API key for authentication
    pub api_key: Option<String>,
    /// Custom API base URL
    pub api_base: Option<String>,
}

impl GatewayModelConfig {
    /// Create a new model config
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            api_key: None,
            api_base: None,
        }
    }

    /// Set the API key
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the API base URL
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = Some(base.into());
        self
    }
}

/// Generation options applied to every call
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Temperature for response generation (0.0 - 2.0)
    pub temperature: Option<f32>,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
    /// System instruction sent ahead of the conversation
    pub system_prompt: Option<String>,
}

impl GenerateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set temperature
    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    /// Set max tokens
    pub fn with_max_tokens(mut self, tokens: u32) -> Self {
        self.max_tokens = Some(tokens);
        self
    }

    /// Set the system instruction
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }
}

/// Classified model response
#[derive(Debug, Clone, PartialEq)]
pub enum ModelOutcome {
    /// The model answered without requesting a tool
    Direct(String),
    /// The model requested tools, possibly alongside some text
    ToolCalls {
        calls: Vec<ToolCallIntent>,
        text: Option<String>,
    },
    /// Nothing usable came back
    Empty,
}

impl ModelOutcome {
    /// Classify raw provider output.
    ///
    /// Tool calls win over text; whitespace-only text counts as no text.
    pub fn classify(text: String, calls: Vec<ToolCallIntent>) -> Self {
        let text = if text.trim().is_empty() { None } else { Some(text) };
        match (calls.is_empty(), text) {
            (false, text) => ModelOutcome::ToolCalls { calls, text },
            (true, Some(text)) => ModelOutcome::Direct(text),
            (true, None) => ModelOutcome::Empty,
        }
    }

    /// Short label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            ModelOutcome::Direct(_) => "direct",
            ModelOutcome::ToolCalls { .. } => "tool_calls",
            ModelOutcome::Empty => "empty",
        }
    }

    /// Build a tool-call outcome without text
    pub fn tool_calls(calls: Vec<ToolCallIntent>) -> Self {
        ModelOutcome::ToolCalls { calls, text: None }
    }
}

/// Thin contract over the LLM provider.
///
/// Implementations perform exactly one provider call per `generate` and are
/// the only place where raw provider output is turned into a [`ModelOutcome`].
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Get the provider name (e.g., "gemini")
    fn name(&self) -> &str;

    /// Send the conversation and the declared tools, classify the response
    async fn generate(
        &self,
        conversation: &Conversation,
        tools: &[ToolDeclaration],
    ) -> ProviderResult<ModelOutcome>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_direct() {
        assert_eq!(
            ModelOutcome::classify("hi there".to_string(), vec![]),
            ModelOutcome::Direct("hi there".to_string())
        );
    }

    #[test]
    fn test_classify_empty() {
        assert_eq!(ModelOutcome::classify(String::new(), vec![]), ModelOutcome::Empty);
        assert_eq!(ModelOutcome::classify("  \n".to_string(), vec![]), ModelOutcome::Empty);
    }

    #[test]
    fn test_classify_tool_calls_keep_text() {
        let call = ToolCallIntent::new("get_all_problems", json!({}));
        let outcome = ModelOutcome::classify("Let me check.".to_string(), vec![call.clone()]);
        assert_eq!(
            outcome,
            ModelOutcome::ToolCalls {
                calls: vec![call.clone()],
                text: Some("Let me check.".to_string()),
            }
        );
        assert_eq!(outcome.kind(), "tool_calls");

        assert_eq!(
            ModelOutcome::classify(" ".to_string(), vec![call.clone()]),
            ModelOutcome::tool_calls(vec![call])
        );
    }

    #[test]
    fn test_options_builder() {
        let options = GenerateOptions::new()
            .with_temperature(0.2)
            .with_max_tokens(512)
            .with_system_prompt("You are a study buddy");
        assert_eq!(options.temperature, Some(0.2));
        assert_eq!(options.max_tokens, Some(512));
        assert_eq!(options.system_prompt.as_deref(), Some("You are a study buddy"));
    }
}
