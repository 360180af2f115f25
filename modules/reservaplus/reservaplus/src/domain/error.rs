use reservaplus_sdk::ReservaPlusError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error on field '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("Invalid registration token")]
    InvalidToken,

    #[error("Registration token has expired")]
    TokenExpired,

    #[error("Authentication required: {0}")]
    Unauthenticated(String),

    #[error("Corrupt {entity} record at {key}: {reason}")]
    CorruptRecord {
        entity: &'static str,
        key: String,
        reason: String,
    },

    #[error("Store error: {0}")]
    Store(#[from] anyhow::Error),
}

impl DomainError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn unauthenticated(reason: impl Into<String>) -> Self {
        Self::Unauthenticated(reason.into())
    }

    /// Store and data failures are the only kinds surfaced as 500.
    #[must_use]
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, Self::CorruptRecord { .. } | Self::Store(_))
    }
}

impl From<DomainError> for ReservaPlusError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation { field, message } => Self::validation(field, message),
            DomainError::InvalidToken => Self::InvalidToken,
            DomainError::TokenExpired => Self::TokenExpired,
            DomainError::Unauthenticated(_) => Self::Unauthenticated,
            DomainError::CorruptRecord { .. } | DomainError::Store(_) => Self::internal(),
        }
    }
}
