//! GenaiGateway - model gateway backed by the genai crate
//!
//! One `generate` call opens one chat stream, drains it, and classifies what
//! came back. Text chunks are concatenated; tool calls are taken from the
//! captured calls of the final event, so a stream that only carried partial
//! tool-call fragments classifies as empty.

use async_trait::async_trait;
use futures::StreamExt;
use std::sync::Arc;

use genai::chat::{ChatRequest, ChatStreamEvent};

use crate::logging::Logger;
use crate::types::{Conversation, ToolCallIntent, ToolDeclaration};

use super::error::{ProviderError, ProviderResult};
use super::genai_adapter::{
    create_client, extract_model_name, extract_provider, from_genai_tool_call, to_genai_messages,
    to_genai_options, to_genai_tools,
};
use super::traits::{GatewayModelConfig, GenerateOptions, ModelGateway, ModelOutcome};

/// Model gateway for any provider genai supports
pub struct GenaiGateway {
    /// Provider identifier
    provider_id: String,
    model_config: GatewayModelConfig,
    options: GenerateOptions,
    client: genai::Client,
    logger: Arc<dyn Logger>,
}

impl GenaiGateway {
    /// Create a new gateway. The genai client is built once and reused.
    pub fn new(
        provider_id: impl Into<String>,
        model_config: GatewayModelConfig,
        options: GenerateOptions,
        logger: Arc<dyn Logger>,
    ) -> Self {
        let provider_id = provider_id.into();
        let provider_id = extract_provider(&model_config.model)
            .map(str::to_string)
            .unwrap_or(provider_id);
        let client = create_client(&model_config);
        Self {
            provider_id,
            model_config,
            options,
            client,
            logger,
        }
    }

    /// Whether the provider can run without an API key
    fn keyless(&self) -> bool {
        self.provider_id.eq_ignore_ascii_case("ollama")
    }

    fn api_error(&self, message: impl Into<String>) -> ProviderError {
        ProviderError::api_error(self.provider_id.clone(), 500, message)
    }
}

#[async_trait]
impl ModelGateway for GenaiGateway {
    fn name(&self) -> &str {
        &self.provider_id
    }

    async fn generate(
        &self,
        conversation: &Conversation,
        tools: &[ToolDeclaration],
    ) -> ProviderResult<ModelOutcome> {
        if self.model_config.api_key.is_none() && !self.keyless() {
            return Err(ProviderError::missing_api_key(self.provider_id.clone()));
        }

        let model_name = extract_model_name(&self.model_config.model);
        self.logger.debug(&format!(
            "[GenaiGateway] generate: provider={}, model={}, turns={}, tools={}",
            self.provider_id,
            model_name,
            conversation.len(),
            tools.len()
        ));

        let mut chat_req = ChatRequest::new(to_genai_messages(conversation));
        if let Some(system) = &self.options.system_prompt {
            chat_req = chat_req.with_system(system.clone());
        }
        if !tools.is_empty() {
            chat_req = chat_req.with_tools(to_genai_tools(tools));
        }
        let genai_options = to_genai_options(&self.options);

        let chat_stream = self
            .client
            .exec_chat_stream(model_name, chat_req, Some(&genai_options))
            .await
            .map_err(|e| self.api_error(e.to_string()))?;

        let mut stream = Box::pin(chat_stream.stream);
        let mut text = String::new();
        let mut calls: Vec<ToolCallIntent> = Vec::new();
        let mut fragments = 0usize;

        while let Some(event) = stream.next().await {
            match event.map_err(|e| self.api_error(e.to_string()))? {
                ChatStreamEvent::Chunk(chunk) => text.push_str(&chunk.content),
                ChatStreamEvent::ToolCallChunk(_) => fragments += 1,
                ChatStreamEvent::End(end) => {
                    if let Some(captured) = end.captured_tool_calls() {
                        calls.extend(captured.iter().map(|tc| from_genai_tool_call(tc)));
                    }
                }
                _ => {}
            }
        }

        if calls.is_empty() && fragments > 0 {
            self.logger.warn(&format!(
                "[GenaiGateway] {} tool-call fragments without a completed call",
                fragments
            ));
        }

        let outcome = ModelOutcome::classify(text, calls);
        self.logger.debug(&format!("[GenaiGateway] outcome: {}", outcome.kind()));
        Ok(outcome)
    }
}
