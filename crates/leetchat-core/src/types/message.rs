//! Conversation turn types

use serde::{Deserialize, Serialize};

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Map a caller-supplied history `sender` to a role.
    ///
    /// `user` and `human` (any case, surrounding whitespace ignored) denote the
    /// person chatting; every other sender is the assistant.
    pub fn from_sender(sender: &str) -> Self {
        let sender = sender.trim();
        if sender.eq_ignore_ascii_case("user") || sender.eq_ignore_ascii_case("human") {
            Role::User
        } else {
            Role::Assistant
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// A segment of turn content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Plain text
    Text { text: String },
}

impl ContentPart {
    /// Create a text content part
    pub fn text(text: impl Into<String>) -> Self {
        ContentPart::Text { text: text.into() }
    }

    /// The text of this part
    pub fn as_text(&self) -> &str {
        match self {
            ContentPart::Text { text } => text,
        }
    }
}

/// One role-tagged entry of a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// The role of the producer
    pub role: Role,
    /// Ordered content segments
    pub parts: Vec<ContentPart>,
}

impl Turn {
    /// Create a user turn with a single text segment
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            parts: vec![ContentPart::text(text)],
        }
    }

    /// Create an assistant turn with a single text segment
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            parts: vec![ContentPart::text(text)],
        }
    }

    /// Create a turn from explicit parts
    pub fn with_parts(role: Role, parts: Vec<ContentPart>) -> Self {
        Self { role, parts }
    }

    /// All text segments joined with newlines
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .map(ContentPart::as_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Ordered sequence of turns sent to the model.
///
/// Turns can only be appended; an appended turn is never edited or merged
/// with its neighbour, even when both come from the same role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    /// Create an empty conversation
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn at the end
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// The turns in order
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// The most recent turn
    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

impl From<Vec<Turn>> for Conversation {
    fn from(turns: Vec<Turn>) -> Self {
        Self { turns }
    }
}

/// A prior chat entry as supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Who wrote the entry (`user` for the human, anything else for the bot)
    pub sender: String,
    /// Entry text. The older `message` key is accepted as well.
    #[serde(alias = "message")]
    pub content: String,
}

impl HistoryEntry {
    pub fn new(sender: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            content: content.into(),
        }
    }
}
