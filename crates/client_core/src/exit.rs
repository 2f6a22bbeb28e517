use shared::{domain::Route, protocol::NavigateTo};

pub const EXIT_CONFIRMATION: &str = "Are you sure you want to exit secure chat?";

/// Confirmation gate in front of leaving the chat view for the entry screen.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExitPrompt;

impl ExitPrompt {
    pub fn message(&self) -> &'static str {
        EXIT_CONFIRMATION
    }

    pub fn resolve(&self, confirmed: bool) -> Option<NavigateTo> {
        confirmed.then_some(NavigateTo::Path(Route::Home))
    }
}

/// Accepts `y`/`yes` in any case; everything else declines.
pub fn is_confirmation(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
