//! Composer input buffer and the keystrokes that drive it.

use shared::domain::MessageId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Backspace,
    Char(char),
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Self = Self { shift: false };
    pub const SHIFT: Self = Self { shift: true };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Enter was consumed as a send; the default newline was suppressed.
    Submitted(Option<MessageId>),
    Edited,
    Ignored,
}

#[derive(Debug, Default, Clone)]
pub(crate) struct Composer {
    buffer: String,
}

impl Composer {
    pub(crate) fn text(&self) -> &str {
        &self.buffer
    }

    pub(crate) fn set_text(&mut self, text: String) {
        self.buffer = text;
    }

    pub(crate) fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Applies any key other than a plain Enter. Returns `None` for Enter without
    /// shift, which the caller treats as a send.
    pub(crate) fn edit(&mut self, key: Key, modifiers: Modifiers) -> Option<KeyOutcome> {
        match key {
            Key::Enter if modifiers.shift => {
                self.buffer.push('\n');
                Some(KeyOutcome::Edited)
            }
            Key::Enter => None,
            Key::Char(c) => {
                self.buffer.push(c);
                Some(KeyOutcome::Edited)
            }
            Key::Backspace => {
                self.buffer.pop();
                Some(KeyOutcome::Edited)
            }
            Key::Other => Some(KeyOutcome::Ignored),
        }
    }
}
