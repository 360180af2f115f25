//! Local client implementing the `ReservaPlusClientV1` trait.

use std::sync::Arc;

use async_trait::async_trait;
use reservaplus_sdk::{AccountStatus, PlanSummary, RegistrationStatus, ReservaPlusClientV1, ReservaPlusError};

use crate::domain::service::Service;

/// In-process client that delegates to the domain service.
pub struct LocalClient {
    service: Arc<Service>,
}

impl LocalClient {
    #[must_use]
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl ReservaPlusClientV1 for LocalClient {
    async fn list_active_plans(&self) -> Result<Vec<PlanSummary>, ReservaPlusError> {
        self.service
            .list_active_plans()
            .await
            .map_err(ReservaPlusError::from)
    }

    async fn check_registration(
        &self,
        token: &str,
    ) -> Result<RegistrationStatus, ReservaPlusError> {
        self.service
            .check_registration(token)
            .await
            .map_err(ReservaPlusError::from)
    }

    async fn check_account_status(
        &self,
        account_id: &str,
        account_email: &str,
    ) -> Result<AccountStatus, ReservaPlusError> {
        self.service
            .check_account_status(account_id, account_email)
            .await
            .map_err(ReservaPlusError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::FixedClock;
    use crate::domain::service::ServiceConfig;
    use crate::infra::storage::MemoryStore;

    fn client() -> LocalClient {
        let service = Service::new(
            Arc::new(MemoryStore::default()),
            Arc::new(FixedClock::at(0)),
            ServiceConfig::default(),
        );
        LocalClient::new(Arc::new(service))
    }

    #[tokio::test]
    async fn test_unknown_token_maps_to_sdk_error() {
        let err = client().check_registration("nope").await.unwrap_err();
        assert_eq!(err, ReservaPlusError::InvalidToken);
    }

    #[tokio::test]
    async fn test_blank_token_maps_to_validation() {
        let err = client().check_registration("   ").await.unwrap_err();
        assert!(matches!(err, ReservaPlusError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_empty_account_maps_to_unauthenticated() {
        let err = client()
            .check_account_status("", "a@b.c")
            .await
            .unwrap_err();
        assert_eq!(err, ReservaPlusError::Unauthenticated);
    }

    #[tokio::test]
    async fn test_empty_store_lists_builtin_catalog() {
        let plans = client().list_active_plans().await.unwrap();
        assert_eq!(plans.len(), 3);
    }
}
