use crate::types::{Conversation, HistoryEntry, Role, Turn};

/// Build the conversation the model sees for one request.
///
/// History entries keep their order and map their `sender` through
/// [`Role::from_sender`]. The new message is always the last turn.
pub fn build(new_message: &str, history: Option<&[HistoryEntry]>) -> Conversation {
    let history = history.unwrap_or_default();
    let mut conversation = Conversation::from(Vec::with_capacity(history.len() + 1));
    for entry in history {
        let text = entry.content.clone();
        let turn = match Role::from_sender(&entry.sender) {
            Role::User => Turn::user(text),
            Role::Assistant => Turn::assistant(text),
        };
        conversation.push(turn);
    }
    conversation.push(Turn::user(new_message));
    conversation
}
