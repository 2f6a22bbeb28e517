use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation failures raised by the login/registration form.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum FormError {
    #[error("Passwords do not match!")]
    PasswordMismatch,
    #[error("{field} is required")]
    MissingField { field: String },
    #[error("Username must be between {min} and {max} characters")]
    InvalidUsername { min: usize, max: usize },
}

impl FormError {
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }
}
