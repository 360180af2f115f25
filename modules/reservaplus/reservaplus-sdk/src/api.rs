//! `ReservaPlusClientV1` trait definition.

use async_trait::async_trait;

use crate::errors::ReservaPlusError;
use crate::models::{AccountStatus, PlanSummary, RegistrationStatus};

/// Public API trait for the reservaplus module (Version 1).
///
/// Every method is a single request/lookup/shape cycle against the store.
/// Nothing is retried; a store failure surfaces as `ReservaPlusError::Internal`.
#[async_trait]
pub trait ReservaPlusClientV1: Send + Sync {
    /// List the active plan catalog ordered by display order.
    /// Falls back to the built-in catalog when the store holds no plans.
    async fn list_active_plans(&self) -> Result<Vec<PlanSummary>, ReservaPlusError>;

    /// Resolve a pending registration by its opaque token.
    async fn check_registration(&self, token: &str)
    -> Result<RegistrationStatus, ReservaPlusError>;

    /// Resolve the onboarding status of an authenticated account.
    async fn check_account_status(
        &self,
        account_id: &str,
        account_email: &str,
    ) -> Result<AccountStatus, ReservaPlusError>;
}
