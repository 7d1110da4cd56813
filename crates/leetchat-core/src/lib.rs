//! Leetchat Core
//!
//! Tool-calling chat assistant for the Leetbase problem tracker.
//! The crate is runtime-agnostic: the HTTP front end (or any other caller)
//! builds an [`Orchestrator`] once and calls [`Orchestrator::handle`] per
//! request.
//!
//! ## Request flow
//!
//! 1. `conversation::build` turns the message and history into a [`Conversation`]
//! 2. the [`ModelGateway`] answers directly or asks for tools
//! 3. the [`ToolExecutor`] runs the requested tools against the backend
//! 4. the gateway is called once more with the tool results
//!
//! ```rust,ignore
//! use leetchat_core::{ConfigLoader, Orchestrator, TracingLogger};
//!
//! let config = ConfigLoader::discover().load()?;
//! let orchestrator = Orchestrator::from_config(&config, Arc::new(TracingLogger::new()))?;
//! let reply = orchestrator.handle("show me easy problems", None, None).await?;
//! ```

pub mod types;
pub mod logging;
pub mod config;
pub mod providers;
pub mod backend;
pub mod tools;
pub mod conversation;
pub mod orchestrator;
pub mod error;

// Re-export commonly used types
pub use types::{
    Role, ContentPart, Turn, Conversation, HistoryEntry,
    ToolDeclaration, ToolCallIntent, ToolResult,
    CredentialContext,
};

pub use logging::{Logger, NoOpLogger, TracingLogger};

pub use config::{ChatConfig, ConfigError, ConfigLoader, ConfigResult};

pub use providers::{
    create_gateway, GenaiGateway, MockGateway, ModelGateway, ModelOutcome, ProviderError, ProviderResult,
};

pub use backend::{BackendClient, BackendError, BackendResult};

pub use tools::{BackendToolExecutor, ToolExecutor, ToolRegistry};

pub use orchestrator::Orchestrator;

pub use error::{ChatError, ChatResult};
