//! Key layout of the single-table store.

use super::store::ItemKey;

pub const METADATA_SORT: &str = "METADATA";
pub const PROFILE_SORT: &str = "PROFILE";

pub const REGISTRATION_PREFIX: &str = "REG#";
pub const USER_PREFIX: &str = "USER#";
pub const ORGANIZATION_PREFIX: &str = "ORG#";

pub const ACTIVE_PLANS_PARTITION: &str = "PLANS#ACTIVE";
pub const PLAN_SORT_PREFIX: &str = "PLAN#";

#[must_use]
pub fn registration_key(token: &str) -> ItemKey {
    ItemKey::new(format!("{REGISTRATION_PREFIX}{token}"), METADATA_SORT)
}

#[must_use]
pub fn profile_key(account_id: &str) -> ItemKey {
    ItemKey::new(format!("{USER_PREFIX}{account_id}"), PROFILE_SORT)
}

#[must_use]
pub fn organization_key(org_id: &str) -> ItemKey {
    ItemKey::new(format!("{ORGANIZATION_PREFIX}{org_id}"), METADATA_SORT)
}

#[must_use]
pub fn plan_key(plan_id: &str) -> ItemKey {
    ItemKey::new(ACTIVE_PLANS_PARTITION, format!("{PLAN_SORT_PREFIX}{plan_id}"))
}
