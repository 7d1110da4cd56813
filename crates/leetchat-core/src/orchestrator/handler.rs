use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use serde_json::json;
use tokio::time::timeout;

use crate::backend::{BackendClient, BackendResult};
use crate::config::{ChatConfig, DEFAULT_FALLBACK_MESSAGE};
use crate::conversation;
use crate::error::{ChatError, ChatResult};
use crate::logging::SharedLogger;
use crate::{log_error, log_info, log_warn};
use crate::providers::{create_gateway, ModelGateway, ModelOutcome, ProviderError};
use crate::tools::{BackendToolExecutor, ToolExecutor, ToolRegistry};
use crate::types::{Conversation, CredentialContext, HistoryEntry, ToolCallIntent, ToolResult, Turn};

/// Failure message injected when a tool call exceeds its deadline
pub const TOOL_TIMEOUT_MESSAGE: &str = "tool call timed out";

const DEFAULT_MODEL_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_TOOL_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy)]
enum Pass {
    First,
    Second,
}

impl std::fmt::Display for Pass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pass::First => write!(f, "first"),
            Pass::Second => write!(f, "second"),
        }
    }
}

/// Drives one chat request from user message to final text.
///
/// Holds only read-only state, so one instance serves concurrent requests.
pub struct Orchestrator {
    gateway: Arc<dyn ModelGateway>,
    registry: ToolRegistry,
    executor: Arc<dyn ToolExecutor>,
    model_timeout: Duration,
    tool_timeout: Duration,
    fallback_message: String,
    logger: SharedLogger,
}

impl Orchestrator {
    /// Create with the Leetbase tool registry and default deadlines
    pub fn new(gateway: Arc<dyn ModelGateway>, executor: Arc<dyn ToolExecutor>, logger: SharedLogger) -> Self {
        Self {
            gateway,
            registry: ToolRegistry::leetbase(),
            executor,
            model_timeout: DEFAULT_MODEL_TIMEOUT,
            tool_timeout: DEFAULT_TOOL_TIMEOUT,
            fallback_message: DEFAULT_FALLBACK_MESSAGE.to_string(),
            logger,
        }
    }

    /// Wire the configured gateway and the backend executor
    pub fn from_config(config: &ChatConfig, logger: SharedLogger) -> BackendResult<Self> {
        let gateway = create_gateway(&config.model, logger.clone());
        let client = BackendClient::new(&config.backend)?;
        let executor = Arc::new(BackendToolExecutor::new(client, logger.clone()));
        Ok(Self::new(gateway, executor, logger)
            .with_model_timeout(config.model.timeout())
            .with_tool_timeout(config.backend.timeout())
            .with_fallback_message(config.fallback_message.clone()))
    }

    pub fn with_registry(mut self, registry: ToolRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_model_timeout(mut self, deadline: Duration) -> Self {
        self.model_timeout = deadline;
        self
    }

    pub fn with_tool_timeout(mut self, deadline: Duration) -> Self {
        self.tool_timeout = deadline;
        self
    }

    pub fn with_fallback_message(mut self, message: impl Into<String>) -> Self {
        self.fallback_message = message.into();
        self
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn fallback_message(&self) -> &str {
        &self.fallback_message
    }

    /// Answer one user message.
    ///
    /// Tool failures are fed back to the model and never fail the request;
    /// only a blank message or a provider error does.
    pub async fn handle(
        &self,
        message: &str,
        history: Option<&[HistoryEntry]>,
        credentials: Option<&CredentialContext>,
    ) -> ChatResult<String> {
        if message.trim().is_empty() {
            return Err(ChatError::invalid_request("message must not be empty"));
        }

        let mut conversation = conversation::build(message, history);

        let calls = match self.generate(Pass::First, &conversation).await? {
            ModelOutcome::Direct(text) => return Ok(text),
            ModelOutcome::Empty => return Ok(self.fallback(Pass::First)),
            ModelOutcome::ToolCalls { calls, text } if calls.is_empty() => {
                return Ok(text.unwrap_or_else(|| self.fallback(Pass::First)));
            }
            ModelOutcome::ToolCalls { calls, .. } => calls,
        };

        let results = self.dispatch(&calls, credentials).await;
        for (intent, result) in calls.iter().zip(&results) {
            conversation.push(result_turn(intent, result));
        }

        match self.generate(Pass::Second, &conversation).await? {
            ModelOutcome::Direct(text) => Ok(text),
            ModelOutcome::Empty => Ok(self.fallback(Pass::Second)),
            ModelOutcome::ToolCalls { calls, text } => {
                log_warn!(
                    self.logger,
                    "[Orchestrator] second pass requested {} more tool call(s); not executing them",
                    calls.len()
                );
                Ok(text.unwrap_or_else(|| self.fallback_message.clone()))
            }
        }
    }

    async fn generate(&self, pass: Pass, conversation: &Conversation) -> ChatResult<ModelOutcome> {
        log_info!(
            self.logger,
            "[Orchestrator] {} pass: {} turn(s), {} tool(s)",
            pass,
            conversation.len(),
            self.registry.len()
        );

        let call = self.gateway.generate(conversation, self.registry.list_tools());
        let outcome = match timeout(self.model_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::timeout(self.gateway.name(), self.model_timeout)),
        };

        match outcome {
            Ok(outcome) => {
                log_info!(self.logger, "[Orchestrator] {} pass returned {}", pass, outcome.kind());
                Ok(outcome)
            }
            Err(e) => {
                log_error!(self.logger, "[Orchestrator] {} pass failed: {}", pass, e);
                Err(e.into())
            }
        }
    }

    /// Run every intent concurrently; results come back in intent order
    async fn dispatch(&self, calls: &[ToolCallIntent], credentials: Option<&CredentialContext>) -> Vec<ToolResult> {
        join_all(calls.iter().map(|intent| self.execute(intent, credentials))).await
    }

    async fn execute(&self, intent: &ToolCallIntent, credentials: Option<&CredentialContext>) -> ToolResult {
        log_info!(self.logger, "[Orchestrator] dispatching tool: {}", intent.name);
        match timeout(self.tool_timeout, self.executor.execute(intent, credentials)).await {
            Ok(result) => result,
            Err(_) => {
                log_warn!(
                    self.logger,
                    "[Orchestrator] tool {} timed out after {:?}",
                    intent.name,
                    self.tool_timeout
                );
                ToolResult::failure(TOOL_TIMEOUT_MESSAGE)
            }
        }
    }

    fn fallback(&self, pass: Pass) -> String {
        log_warn!(self.logger, "[Orchestrator] {} pass produced no usable content", pass);
        self.fallback_message.clone()
    }
}

/// User turn carrying the serialized outcome of one intent
fn result_turn(intent: &ToolCallIntent, result: &ToolResult) -> Turn {
    let text = match result.to_envelope(&intent.name) {
        Ok(text) => text,
        Err(e) => json!({
            "tool": intent.name,
            "error": format!("result could not be serialized: {}", e),
        })
        .to_string(),
    };
    Turn::user(text)
}
