//! Typed views of the raw store items.
//!
//! Every record is decoded at the store boundary with explicit per-field
//! defaults; anything not listed here (key attributes, index attributes,
//! bookkeeping fields) is dropped on the floor and never echoed back.

use reservaplus_sdk::{AccountProfile, Organization, PlanSummary, ProfileOrganization};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::keys::{ORGANIZATION_PREFIX, PLAN_SORT_PREFIX};
use super::store::{PARTITION_ATTR, SORT_ATTR, StoreItem};

/// Decode a store item into a typed record.
///
/// # Errors
/// Returns the serde error when a required field is missing or mistyped.
pub fn decode<T: DeserializeOwned>(item: StoreItem) -> Result<T, serde_json::Error> {
    serde_json::from_value(Value::Object(item))
}

fn default_true() -> bool {
    true
}

/// A stored `null` reads as the field's default, same as a missing attribute.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRecord {
    #[serde(rename = "SK", default, deserialize_with = "null_as_default", skip_serializing)]
    pub sort_key: String,
    #[serde(default)]
    pub plan_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price_monthly: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price_yearly: i64,
    #[serde(default)]
    pub original_price: Option<i64>,
    #[serde(default)]
    pub discount_text: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub features: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_popular: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_coming_soon: bool,
    #[serde(default)]
    pub badge_text: Option<String>,
    #[serde(default)]
    pub color_scheme: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub display_order: i64,
    #[serde(default = "default_true", deserialize_with = "null_as_true")]
    pub is_active: bool,
}

impl PlanRecord {
    /// `plan_id` if stored, otherwise the sort key without its `PLAN#` prefix.
    #[must_use]
    pub fn id(&self) -> String {
        match &self.plan_id {
            Some(id) if !id.is_empty() => id.clone(),
            _ => self
                .sort_key
                .strip_prefix(PLAN_SORT_PREFIX)
                .unwrap_or(&self.sort_key)
                .to_owned(),
        }
    }
}

impl From<PlanRecord> for PlanSummary {
    fn from(record: PlanRecord) -> Self {
        Self {
            id: record.id(),
            name: record.name,
            price_monthly: record.price_monthly,
            price_yearly: record.price_yearly,
            original_price: record.original_price,
            discount_text: record.discount_text,
            description: record.description,
            features: record.features,
            is_popular: record.is_popular,
            is_coming_soon: record.is_coming_soon,
            badge_text: record.badge_text,
            color_scheme: record.color_scheme,
            display_order: record.display_order,
        }
    }
}

impl From<&PlanSummary> for PlanRecord {
    fn from(plan: &PlanSummary) -> Self {
        Self {
            sort_key: format!("{PLAN_SORT_PREFIX}{}", plan.id),
            plan_id: Some(plan.id.clone()),
            name: plan.name.clone(),
            price_monthly: plan.price_monthly,
            price_yearly: plan.price_yearly,
            original_price: plan.original_price,
            discount_text: plan.discount_text.clone(),
            description: plan.description.clone(),
            features: plan.features.clone(),
            is_popular: plan.is_popular,
            is_coming_soon: plan.is_coming_soon,
            badge_text: plan.badge_text.clone(),
            color_scheme: plan.color_scheme.clone(),
            display_order: plan.display_order,
            is_active: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RegistrationUserDataRecord {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub organization_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PendingRegistrationRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub token: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub plan_id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_data: RegistrationUserDataRecord,
    /// Absolute deadline in epoch milliseconds.
    pub expires_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccountProfileRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub account_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub organization_id: Option<String>,
    #[serde(default)]
    pub organization_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub onboarding_completed: bool,
    #[serde(default)]
    pub subscription_status: Option<String>,
    #[serde(default)]
    pub trial_end: Option<String>,
    #[serde(default)]
    pub last_login: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl AccountProfileRecord {
    /// Organization summary built only from the profile's own fields.
    #[must_use]
    pub fn embedded_organization(&self) -> ProfileOrganization {
        ProfileOrganization {
            id: self.organization_id.clone(),
            name: self.organization_name.clone(),
            role: self.role.clone(),
            subscription_status: self.subscription_status.clone(),
        }
    }

    /// A stored but empty `organization_id` counts as no organization.
    #[must_use]
    pub fn organization_ref(&self) -> Option<&str> {
        self.organization_id.as_deref().filter(|id| !id.is_empty())
    }
}

impl From<AccountProfileRecord> for AccountProfile {
    fn from(record: AccountProfileRecord) -> Self {
        Self {
            account_id: record.account_id,
            email: record.email,
            first_name: record.first_name,
            last_name: record.last_name,
            role: record.role,
            phone: record.phone,
            organization_id: record.organization_id,
            organization_name: record.organization_name,
            onboarding_completed: record.onboarding_completed,
            subscription_status: record.subscription_status,
            trial_end: record.trial_end,
            last_login: record.last_login,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrganizationRecord {
    #[serde(rename = "PK", default, deserialize_with = "null_as_default")]
    pub partition_key: String,
    #[serde(default)]
    pub org_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub industry_template: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub subscription_status: Option<String>,
    #[serde(default)]
    pub trial_end: Option<String>,
}

impl OrganizationRecord {
    /// `org_id` if stored, otherwise the partition key without its `ORG#` prefix.
    #[must_use]
    pub fn id(&self) -> String {
        match &self.org_id {
            Some(id) if !id.is_empty() => id.clone(),
            _ => self
                .partition_key
                .strip_prefix(ORGANIZATION_PREFIX)
                .unwrap_or(&self.partition_key)
                .to_owned(),
        }
    }
}

impl From<OrganizationRecord> for Organization {
    fn from(record: OrganizationRecord) -> Self {
        Self {
            id: record.id(),
            name: record.name,
            industry_template: record.industry_template,
            email: record.email,
            phone: record.phone,
            subscription_status: record.subscription_status,
            trial_end: record.trial_end,
        }
    }
}

/// Serialize a plan for storage under its catalog key.
///
/// # Errors
/// Returns the serde error if the record cannot be represented as JSON.
pub fn encode_plan(plan: &PlanSummary) -> Result<StoreItem, serde_json::Error> {
    match serde_json::to_value(PlanRecord::from(plan))? {
        Value::Object(mut map) => {
            map.remove(PARTITION_ATTR);
            map.remove(SORT_ATTR);
            Ok(map)
        }
        _ => Ok(StoreItem::new()),
    }
}
