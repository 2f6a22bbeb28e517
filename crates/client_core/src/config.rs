use std::time::Duration;

use uuid::Uuid;

pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1000);
pub const DEFAULT_REPLY_TEXT: &str = "Message received and encrypted.";
pub const DEFAULT_WELCOME_TEXT: &str =
    "Welcome to Secure Chat. Your messages are end-to-end encrypted.";

/// Per-session settings fixed when the chat view is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub display_name: String,
    pub reply_delay: Duration,
    pub reply_text: String,
    pub welcome_text: String,
}

impl SessionConfig {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            reply_delay: DEFAULT_REPLY_DELAY,
            reply_text: DEFAULT_REPLY_TEXT.to_string(),
            welcome_text: DEFAULT_WELCOME_TEXT.to_string(),
        }
    }

    pub fn with_reply_delay(mut self, reply_delay: Duration) -> Self {
        self.reply_delay = reply_delay;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(generate_display_name())
    }
}

/// `User_<n>` with `n` in `0..10000`, drawn from a v4 uuid.
pub fn generate_display_name() -> String {
    format!("User_{}", Uuid::new_v4().as_u128() % 10_000)
}
