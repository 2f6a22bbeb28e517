use shared::{
    domain::{ChatId, Screen},
    error::FormError,
    protocol::{ChatSummary, NavigateTo},
};
use tracing::info;

/// Static chat list shown on the ChatList screen.
pub fn default_chat_directory() -> Vec<ChatSummary> {
    vec![
        ChatSummary {
            chat_id: ChatId(1),
            name: "General".to_string(),
        },
        ChatSummary {
            chat_id: ChatId(2),
            name: "Private".to_string(),
        },
    ]
}

pub fn open_chat(directory: &[ChatSummary], chat_id: ChatId) -> Option<NavigateTo> {
    directory
        .iter()
        .any(|chat| chat.chat_id == chat_id)
        .then_some(NavigateTo::Screen(Screen::Chat))
}

/// Adds a chat named `name` (trimmed) under the next free id.
pub fn create_chat(
    directory: &mut Vec<ChatSummary>,
    name: &str,
) -> Result<ChatSummary, FormError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(FormError::missing("chat name"));
    }

    let next_id = directory
        .iter()
        .map(|chat| chat.chat_id.0)
        .max()
        .map_or(1, |id| id + 1);
    let chat = ChatSummary {
        chat_id: ChatId(next_id),
        name: name.to_string(),
    };
    directory.push(chat.clone());

    info!("directory: chat created chat_id={} name={}", chat.chat_id, chat.name);
    Ok(chat)
}
