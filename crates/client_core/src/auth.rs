//! Login / registration form. Nothing is authenticated; a valid submit only yields a
//! navigation command toward the chat view.

use shared::{
    domain::{AuthMode, Route},
    error::FormError,
    protocol::NavigateTo,
};
use tracing::{info, warn};

pub const USERNAME_MIN_CHARS: usize = 3;
pub const USERNAME_MAX_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Username,
    Email,
    Password,
    ConfirmPassword,
}

#[derive(Debug, Clone)]
pub struct AuthForm {
    mode: AuthMode,
    username: String,
    email: String,
    password: String,
    confirm_password: String,
}

impl Default for AuthForm {
    fn default() -> Self {
        Self::new(AuthMode::Login)
    }
}

impl AuthForm {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            username: String::new(),
            email: String::new(),
            password: String::new(),
            confirm_password: String::new(),
        }
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Username => &self.username,
            FormField::Email => &self.email,
            FormField::Password => &self.password,
            FormField::ConfirmPassword => &self.confirm_password,
        }
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Username => self.username = value,
            FormField::Email => self.email = value,
            FormField::Password => self.password = value,
            FormField::ConfirmPassword => self.confirm_password = value,
        }
    }

    /// Switches between login and register and resets every field.
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        };
        *self = Self::new(self.mode);
    }

    pub fn submit(&self) -> Result<NavigateTo, FormError> {
        for field in self.required_fields() {
            if self.field(*field).trim().is_empty() {
                return Err(FormError::missing(field_label(*field)));
            }
        }

        if self.mode == AuthMode::Register {
            let len = self.username.chars().count();
            if !(USERNAME_MIN_CHARS..=USERNAME_MAX_CHARS).contains(&len) {
                warn!("auth: register rejected reason=invalid_username len={len}");
                return Err(FormError::InvalidUsername {
                    min: USERNAME_MIN_CHARS,
                    max: USERNAME_MAX_CHARS,
                });
            }
        }

        if self.mode == AuthMode::Register && self.password != self.confirm_password {
            warn!("auth: register rejected reason=password_mismatch");
            return Err(FormError::PasswordMismatch);
        }

        info!(mode = ?self.mode, email = %self.email, "auth: form accepted");
        Ok(NavigateTo::Path(Route::Chat))
    }

    pub fn back_to_home(&self) -> NavigateTo {
        NavigateTo::Path(Route::Home)
    }

    fn required_fields(&self) -> &'static [FormField] {
        match self.mode {
            AuthMode::Login => &[FormField::Email, FormField::Password],
            AuthMode::Register => &[
                FormField::Username,
                FormField::Email,
                FormField::Password,
                FormField::ConfirmPassword,
            ],
        }
    }
}

fn field_label(field: FormField) -> &'static str {
    match field {
        FormField::Username => "username",
        FormField::Email => "email",
        FormField::Password => "password",
        FormField::ConfirmPassword => "confirm password",
    }
}

#[cfg(test)]
#[path = "tests/auth_tests.rs"]
mod tests;
