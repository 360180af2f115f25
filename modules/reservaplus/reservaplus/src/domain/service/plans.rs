use reservaplus_sdk::PlanSummary;
use tracing::{debug, warn};

use super::Service;
use crate::domain::catalog::{order_for_display, static_catalog};
use crate::domain::error::DomainError;
use crate::domain::keys::{ACTIVE_PLANS_PARTITION, PLAN_SORT_PREFIX, plan_key};
use crate::domain::records::{PlanRecord, decode, encode_plan};
use crate::domain::store::with_key_attributes;

impl Service {
    /// List active plans ordered by `display_order`.
    ///
    /// An empty partition yields the built-in catalog. Items that cannot be
    /// decoded are skipped.
    ///
    /// # Errors
    /// Returns `DomainError::Store` when the store is unavailable.
    pub async fn list_active_plans(&self) -> Result<Vec<PlanSummary>, DomainError> {
        let items = self
            .store
            .query_partition(ACTIVE_PLANS_PARTITION, PLAN_SORT_PREFIX)
            .await?;

        if items.is_empty() {
            debug!("no stored plans, serving built-in catalog");
            return Ok(static_catalog());
        }

        let mut plans: Vec<PlanSummary> = items
            .into_iter()
            .filter_map(|item| match decode::<PlanRecord>(item) {
                Ok(record) => Some(record.into()),
                Err(e) => {
                    warn!(error = %e, "skipping undecodable plan item");
                    None
                }
            })
            .collect();

        order_for_display(&mut plans);
        Ok(plans)
    }

    /// Write the given plans under the active catalog partition.
    ///
    /// # Errors
    /// Returns `DomainError::Store` on the first failed write.
    pub async fn seed_plans(&self, plans: &[PlanSummary]) -> Result<usize, DomainError> {
        for plan in plans {
            let key = plan_key(&plan.id);
            let item = encode_plan(plan).map_err(anyhow::Error::from)?;
            self.store
                .put_item(&key, with_key_attributes(&key, item))
                .await?;
            debug!(plan_id = %plan.id, "seeded plan");
        }
        Ok(plans.len())
    }
}
