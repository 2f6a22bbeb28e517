//! Plain-terminal rendering of the message log: sent messages right-aligned,
//! received ones left-aligned.

use shared::{domain::Origin, protocol::ChatMessage};

pub const MIN_WIDTH: usize = 20;

pub fn render_header(display_name: &str) -> String {
    format!("SECURE_CHAT // ENCRYPTED\n{display_name}\n[*] SECURE CONNECTION")
}

pub fn render_message(message: &ChatMessage, width: usize) -> String {
    let width = width.max(MIN_WIDTH);
    match message.origin {
        Origin::Local => message
            .text
            .lines()
            .chain(std::iter::once(message.timestamp.as_str()))
            .map(|line| format!("{line:>width$}"))
            .collect::<Vec<_>>()
            .join("\n"),
        Origin::Remote => message
            .text
            .lines()
            .chain(std::iter::once(message.timestamp.as_str()))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

pub fn render_log(messages: &[ChatMessage], width: usize) -> String {
    messages
        .iter()
        .map(|message| render_message(message, width))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
