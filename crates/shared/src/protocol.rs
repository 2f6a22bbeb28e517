use serde::{Deserialize, Serialize};

use crate::domain::{ChatId, MessageId, Origin, Route, Screen};

/// One entry of a chat session's message log as handed to renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub text: String,
    pub origin: Origin,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum SessionEvent {
    MessageAppended(ChatMessage),
    Closed,
}

/// Navigation command emitted by form and prompt handlers for an external navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "target", rename_all = "snake_case")]
pub enum NavigateTo {
    Screen(Screen),
    Path(Route),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSummary {
    pub chat_id: ChatId,
    pub name: String,
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
