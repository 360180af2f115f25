use chrono::{DateTime, Utc};
use reservaplus_sdk::{RegistrationStatus, RegistrationUserData, SelectedPlan};

use super::Service;
use crate::domain::error::DomainError;
use crate::domain::keys::registration_key;
use crate::domain::records::{PendingRegistrationRecord, decode};

const TOKEN_FIELD: &str = "token";

impl Service {
    /// Resolve a pending registration. Never writes to the store.
    ///
    /// # Errors
    /// - `Validation` for a blank or oversized token (the store is not touched)
    ///
    /// The token is opaque: a non-blank token is looked up exactly as given.
    /// - `InvalidToken` when no record exists
    /// - `TokenExpired` when the record's deadline has passed
    /// - `CorruptRecord` / `Store` for infrastructure failures
    pub async fn check_registration(&self, token: &str) -> Result<RegistrationStatus, DomainError> {
        if token.trim().is_empty() {
            return Err(DomainError::validation(TOKEN_FIELD, "is required"));
        }
        if token.len() > self.config.max_token_length {
            return Err(DomainError::validation(
                TOKEN_FIELD,
                format!("exceeds maximum length of {}", self.config.max_token_length),
            ));
        }

        let key = registration_key(token);
        let Some(item) = self.store.get_item(&key).await? else {
            return Err(DomainError::InvalidToken);
        };

        let record: PendingRegistrationRecord =
            decode(item).map_err(|e| DomainError::CorruptRecord {
                entity: "registration",
                key: key.to_string(),
                reason: e.to_string(),
            })?;

        if record.expires_at < self.clock.now_millis() {
            return Err(DomainError::TokenExpired);
        }

        let expires_at = DateTime::<Utc>::from_timestamp_millis(record.expires_at).ok_or_else(
            || DomainError::CorruptRecord {
                entity: "registration",
                key: key.to_string(),
                reason: format!("expires_at {} is out of range", record.expires_at),
            },
        )?;

        Ok(project(record, expires_at))
    }
}

/// Public-safe projection: only whitelisted user fields are carried over.
fn project(record: PendingRegistrationRecord, expires_at: DateTime<Utc>) -> RegistrationStatus {
    let user = record.user_data;
    RegistrationStatus {
        selected_plan: SelectedPlan::for_plan_id(&record.plan_id),
        expires_at,
        user_data: RegistrationUserData {
            email: record.email.or(user.email).unwrap_or_default(),
            first_name: user.first_name,
            last_name: user.last_name,
            organization_name: user.organization_name,
        },
    }
}
