use reservaplus_sdk::{AccountStatus, Organization, UserInfo};
use serde_json::json;
use tracing::{debug, warn};

use super::Service;
use crate::domain::error::DomainError;
use crate::domain::keys::{organization_key, profile_key};
use crate::domain::records::{AccountProfileRecord, OrganizationRecord, decode};
use crate::domain::store::StoreItem;

impl Service {
    /// Resolve the onboarding status of an authenticated account.
    ///
    /// Only the onboarded path touches the organization record and stamps
    /// `last_login`. A failed stamp is logged and does not fail the call.
    ///
    /// # Errors
    /// - `Unauthenticated` when `account_id` is empty
    /// - `CorruptRecord` / `Store` for infrastructure failures
    pub async fn check_account_status(
        &self,
        account_id: &str,
        account_email: &str,
    ) -> Result<AccountStatus, DomainError> {
        if account_id.is_empty() {
            return Err(DomainError::unauthenticated("missing subject claim"));
        }

        let key = profile_key(account_id);
        let Some(item) = self.store.get_item(&key).await? else {
            debug!(account_id, "no profile, account needs onboarding");
            return Ok(AccountStatus::NewAccount {
                user_info: UserInfo {
                    id: account_id.to_owned(),
                    email: account_email.to_owned(),
                },
            });
        };

        let profile: AccountProfileRecord =
            decode(item).map_err(|e| DomainError::CorruptRecord {
                entity: "profile",
                key: key.to_string(),
                reason: e.to_string(),
            })?;

        if !profile.onboarding_completed {
            return Ok(AccountStatus::OnboardingPending {
                organization: profile.embedded_organization(),
            });
        }

        let organization = match profile.organization_ref() {
            Some(org_id) => self.find_organization(org_id).await?,
            None => None,
        };

        self.stamp_last_login(account_id).await;

        Ok(AccountStatus::Active {
            profile: profile.into(),
            organization,
        })
    }

    async fn find_organization(&self, org_id: &str) -> Result<Option<Organization>, DomainError> {
        let key = organization_key(org_id);
        let Some(item) = self.store.get_item(&key).await? else {
            warn!(org_id, "profile references a missing organization");
            return Ok(None);
        };

        let record: OrganizationRecord =
            decode(item).map_err(|e| DomainError::CorruptRecord {
                entity: "organization",
                key: key.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Some(record.into()))
    }

    async fn stamp_last_login(&self, account_id: &str) {
        let key = profile_key(account_id);
        let mut fields = StoreItem::new();
        fields.insert("last_login".to_owned(), json!(self.clock.now_millis()));

        if let Err(e) = self.store.update_fields(&key, fields).await {
            warn!(account_id, error = %e, "failed to stamp last_login");
        }
    }
}
