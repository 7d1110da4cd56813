//! Adapter between leetchat-core types and genai types
//!
//! The gateway leans on genai for the provider protocols; this module only
//! converts our turns and tool declarations in, and tool calls out.

use std::future::Future;
use std::pin::Pin;

use genai::chat::{
    ChatMessage as GenaiMessage, ChatOptions as GenaiOptions, ChatRole as GenaiRole,
    MessageContent as GenaiContent, Tool as GenaiTool, ToolCall as GenaiToolCall,
};
use genai::resolver::{AuthData, AuthResolver, Endpoint, ServiceTargetResolver};
use genai::{Client, ModelIden, ServiceTarget};

use crate::types::{Conversation, Role, ToolCallIntent, ToolDeclaration, Turn};

use super::traits::{GatewayModelConfig, GenerateOptions};

// ============================================================================
// Conversation Conversion: leetchat -> genai
// ============================================================================

/// Convert a turn role to a genai ChatRole
pub fn to_genai_role(role: Role) -> GenaiRole {
    match role {
        Role::User => GenaiRole::User,
        Role::Assistant => GenaiRole::Assistant,
    }
}

/// Convert one turn to a genai ChatMessage
pub fn to_genai_message(turn: &Turn) -> GenaiMessage {
    let content = GenaiContent::from(turn.text());
    match turn.role {
        Role::User => GenaiMessage::user(content),
        Role::Assistant => GenaiMessage::assistant(content),
    }
}

/// Convert a conversation to genai messages, order preserved
pub fn to_genai_messages(conversation: &Conversation) -> Vec<GenaiMessage> {
    conversation.turns().iter().map(to_genai_message).collect()
}

// ============================================================================
// Tool Conversion: leetchat -> genai
// ============================================================================

/// Convert a tool declaration to a genai Tool
pub fn to_genai_tool(tool: &ToolDeclaration) -> GenaiTool {
    GenaiTool::new(&tool.name)
        .with_description(&tool.description)
        .with_schema(tool.input_schema.clone())
}

/// Convert tool declarations to genai tools
pub fn to_genai_tools(tools: &[ToolDeclaration]) -> Vec<GenaiTool> {
    tools.iter().map(to_genai_tool).collect()
}

// ============================================================================
// Options Conversion: leetchat -> genai
// ============================================================================

/// Convert generation options to genai ChatOptions
pub fn to_genai_options(options: &GenerateOptions) -> GenaiOptions {
    let mut genai_opts = GenaiOptions::default();

    if let Some(temp) = options.temperature {
        genai_opts = genai_opts.with_temperature(temp as f64);
    }

    if let Some(max_tokens) = options.max_tokens {
        genai_opts = genai_opts.with_max_tokens(max_tokens);
    }

    // Tool calls arrive whole in the End event only when captured
    genai_opts.with_capture_tool_calls(true)
}

// ============================================================================
// Response Conversion: genai -> leetchat
// ============================================================================

/// Convert a genai ToolCall to a tool-call intent
pub fn from_genai_tool_call(tc: &GenaiToolCall) -> ToolCallIntent {
    let intent = ToolCallIntent::new(tc.fn_name.clone(), tc.fn_arguments.clone());
    if tc.call_id.is_empty() {
        intent
    } else {
        intent.with_id(tc.call_id.clone())
    }
}

// ============================================================================
// Model Name Handling
// ============================================================================

/// Extract provider ID from a model string (e.g., "gemini/gemini-2.0-flash" -> "gemini")
pub fn extract_provider(model: &str) -> Option<&str> {
    model.split_once('/').map(|(provider, _)| provider)
}

/// Extract model name from a model string (e.g., "gemini/gemini-2.0-flash" -> "gemini-2.0-flash")
pub fn extract_model_name(model: &str) -> &str {
    model.split_once('/').map(|(_, name)| name).unwrap_or(model)
}

// ============================================================================
// Client Creation with Custom Auth
// ============================================================================

/// Create a genai Client that authenticates with the configured key.
///
/// genai's own env var lookup is bypassed: the key comes from `ChatConfig`.
/// A configured `api_base` replaces the provider's default endpoint.
pub fn create_client(config: &GatewayModelConfig) -> Client {
    let auth_key = config.api_key.clone();

    let auth_resolver = AuthResolver::from_resolver_async_fn(
        move |_model_iden: ModelIden| -> Pin<Box<dyn Future<Output = genai::resolver::Result<Option<AuthData>>> + Send>> {
            let key = auth_key.clone();
            Box::pin(async move { Ok(key.map(AuthData::from_single)) })
        },
    );

    let api_base = config.api_base.clone();
    let target_resolver = ServiceTargetResolver::from_resolver_fn(
        move |target: ServiceTarget| -> Result<ServiceTarget, genai::resolver::Error> {
            match &api_base {
                Some(base) => Ok(ServiceTarget {
                    endpoint: Endpoint::from_owned(base.clone()),
                    auth: target.auth,
                    model: target.model,
                }),
                None => Ok(target),
            }
        },
    );

    Client::builder()
        .with_auth_resolver(auth_resolver)
        .with_service_target_resolver(target_resolver)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_conversion() {
        assert!(matches!(to_genai_role(Role::User), GenaiRole::User));
        assert!(matches!(to_genai_role(Role::Assistant), GenaiRole::Assistant));
    }

    #[test]
    fn test_message_conversion_keeps_order() {
        let conversation = Conversation::from(vec![
            Turn::user("hello"),
            Turn::assistant("hi"),
            Turn::user("show me problems"),
        ]);
        let messages = to_genai_messages(&conversation);
        assert_eq!(messages.len(), 3);
        assert!(matches!(messages[0].role, GenaiRole::User));
        assert!(matches!(messages[1].role, GenaiRole::Assistant));
        assert!(matches!(messages[2].role, GenaiRole::User));
    }

    #[test]
    fn test_tool_conversion() {
        let tool = ToolDeclaration::new("get_all_problems", "List problems").with_schema(json!({
            "type": "object",
            "properties": { "limit": { "type": "integer" } }
        }));

        let genai_tool = to_genai_tool(&tool);
        assert_eq!(genai_tool.name, "get_all_problems");
    }

    #[test]
    fn test_model_name_helpers() {
        assert_eq!(extract_provider("gemini/gemini-2.0-flash"), Some("gemini"));
        assert_eq!(extract_provider("gemini-2.0-flash"), None);
        assert_eq!(extract_model_name("gemini/gemini-2.0-flash"), "gemini-2.0-flash");
        assert_eq!(extract_model_name("gemini-2.0-flash"), "gemini-2.0-flash");
    }
}
