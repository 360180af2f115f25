//! Error types for the reservaplus SDK.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReservaPlusError {
    #[error("Validation error on field '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("Invalid registration token")]
    InvalidToken,

    #[error("Registration token has expired")]
    TokenExpired,

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Internal error")]
    Internal,
}

impl ReservaPlusError {
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn internal() -> Self {
        Self::Internal
    }
}
