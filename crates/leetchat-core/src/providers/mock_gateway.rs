//! Mock gateway for testing
//!
//! Replays scripted outcomes without network access and records every
//! conversation it was asked about, so tests can assert on call counts and
//! on what the model would have seen.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use super::error::{ProviderError, ProviderResult};
use super::traits::{ModelGateway, ModelOutcome};
use crate::log_debug;
use crate::logging::Logger;
use crate::types::{Conversation, Role, ToolDeclaration};

/// One scripted reply
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return this outcome
    Outcome(ModelOutcome),
    /// Fail with a provider error carrying this message
    Error(String),
}

/// What to do once the script runs out
#[derive(Debug, Clone, Default)]
pub enum MockMode {
    /// Echo back the last user turn
    #[default]
    Echo,
    /// Always return the same text
    Fixed(String),
    /// Always return an empty outcome
    Empty,
}

/// Scripted model gateway for tests
pub struct MockGateway {
    script: Mutex<VecDeque<MockReply>>,
    mode: MockMode,
    delay: Option<Duration>,
    calls: Mutex<Vec<Conversation>>,
    logger: Arc<dyn Logger>,
}

impl MockGateway {
    /// Create an echo gateway with an empty script
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self::with_mode(MockMode::Echo, logger)
    }

    /// Create with a specific fallback mode
    pub fn with_mode(mode: MockMode, logger: Arc<dyn Logger>) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            mode,
            delay: None,
            calls: Mutex::new(Vec::new()),
            logger,
        }
    }

    /// Create a gateway that replays `replies` in order, then echoes
    pub fn scripted(replies: Vec<MockReply>, logger: Arc<dyn Logger>) -> Self {
        let gateway = Self::new(logger);
        *gateway.script.lock() = replies.into();
        gateway
    }

    /// Create a fixed response gateway
    pub fn fixed(response: impl Into<String>, logger: Arc<dyn Logger>) -> Self {
        Self::with_mode(MockMode::Fixed(response.into()), logger)
    }

    /// Sleep this long before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of `generate` calls so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Conversations received, in call order
    pub fn received(&self) -> Vec<Conversation> {
        self.calls.lock().clone()
    }

    fn fallback(&self, conversation: &Conversation) -> ModelOutcome {
        match &self.mode {
            MockMode::Echo => {
                let last_user = conversation
                    .turns()
                    .iter()
                    .rev()
                    .find(|turn| turn.role == Role::User)
                    .map(|turn| turn.text())
                    .unwrap_or_else(|| "Hello from MockGateway!".to_string());
                ModelOutcome::Direct(format!("Echo: {}", last_user))
            }
            MockMode::Fixed(text) => ModelOutcome::Direct(text.clone()),
            MockMode::Empty => ModelOutcome::Empty,
        }
    }
}

#[async_trait]
impl ModelGateway for MockGateway {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(
        &self,
        conversation: &Conversation,
        _tools: &[ToolDeclaration],
    ) -> ProviderResult<ModelOutcome> {
        self.calls.lock().push(conversation.clone());
        log_debug!(self.logger, "MockGateway: generate called with {} turns", conversation.len());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let next = self.script.lock().pop_front();
        match next {
            Some(MockReply::Outcome(outcome)) => Ok(outcome),
            Some(MockReply::Error(message)) => {
                Err(ProviderError::Other(format!("Mock error: {}", message)))
            }
            None => Ok(self.fallback(conversation)),
        }
    }
}
