//! Core types for one chat request
//!
//! Everything here is created and dropped within a single orchestration run,
//! except tool declarations which live as long as the registry.

mod message;
mod tool;
mod credentials;

pub use message::{Role, ContentPart, Turn, Conversation, HistoryEntry};
pub use tool::{ToolDeclaration, ToolCallIntent, ToolResult};
pub use credentials::CredentialContext;
