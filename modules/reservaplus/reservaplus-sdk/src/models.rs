//! Public models for the reservaplus module.
//!
//! These are transport-agnostic data structures that define the contract
//! between the module and its consumers. REST DTOs live in the module crate.

use chrono::{DateTime, Utc};

/// One entry of the plan catalog, as presented to the onboarding UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanSummary {
    pub id: String,
    pub name: String,
    pub price_monthly: i64,
    pub price_yearly: i64,
    pub original_price: Option<i64>,
    pub discount_text: Option<String>,
    pub description: String,
    pub features: Vec<String>,
    pub is_popular: bool,
    pub is_coming_soon: bool,
    pub badge_text: Option<String>,
    pub color_scheme: Option<String>,
    pub display_order: i64,
}

/// Plan projection embedded in a registration status.
///
/// Deliberately independent of the catalog: see `SelectedPlan::for_plan_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedPlan {
    pub id: String,
    pub name: String,
    pub price_monthly: i64,
}

impl SelectedPlan {
    pub const BASIC_PLAN_ID: &'static str = "basic";
    pub const BASIC_NAME: &'static str = "Plan B\u{e1}sico";
    pub const PREMIUM_NAME: &'static str = "Plan Premium";
    pub const PREMIUM_PRICE_MONTHLY: i64 = 50_000;

    /// Two-tier mapping: `basic` is free, every other id is the premium tier.
    #[must_use]
    pub fn for_plan_id(plan_id: &str) -> Self {
        if plan_id == Self::BASIC_PLAN_ID {
            Self {
                id: plan_id.to_owned(),
                name: Self::BASIC_NAME.to_owned(),
                price_monthly: 0,
            }
        } else {
            Self {
                id: plan_id.to_owned(),
                name: Self::PREMIUM_NAME.to_owned(),
                price_monthly: Self::PREMIUM_PRICE_MONTHLY,
            }
        }
    }
}

/// Whitelisted user data echoed back for a pending registration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegistrationUserData {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub organization_name: String,
}

/// A pending registration that exists and has not expired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationStatus {
    pub selected_plan: SelectedPlan,
    pub expires_at: DateTime<Utc>,
    pub user_data: RegistrationUserData,
}

/// Identity of an account that has no profile yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
}

/// Organization summary taken from the profile record itself.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileOrganization {
    pub id: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub subscription_status: Option<String>,
}

/// Profile of an account that completed onboarding.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccountProfile {
    pub account_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Option<String>,
    pub phone: Option<String>,
    pub organization_id: Option<String>,
    pub organization_name: Option<String>,
    pub onboarding_completed: bool,
    pub subscription_status: Option<String>,
    pub trial_end: Option<String>,
    pub last_login: Option<i64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Organization metadata joined for an onboarded account.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Organization {
    pub id: String,
    pub name: String,
    pub industry_template: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subscription_status: Option<String>,
    pub trial_end: Option<String>,
}

/// Outcome of resolving an authenticated account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountStatus {
    /// No profile record exists yet.
    NewAccount { user_info: UserInfo },
    /// A profile exists but onboarding is not completed.
    OnboardingPending { organization: ProfileOrganization },
    /// Onboarding completed. `organization` is `None` for a dangling reference.
    Active {
        profile: AccountProfile,
        organization: Option<Organization>,
    },
}

impl AccountStatus {
    #[must_use]
    pub fn needs_onboarding(&self) -> bool {
        !matches!(self, Self::Active { .. })
    }

    #[must_use]
    pub fn has_profile(&self) -> bool {
        !matches!(self, Self::NewAccount { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_plan_is_free() {
        let plan = SelectedPlan::for_plan_id("basic");
        assert_eq!(plan.name, "Plan B\u{e1}sico");
        assert_eq!(plan.price_monthly, 0);
    }

    #[test]
    fn any_other_plan_is_premium() {
        for id in ["premium", "profesional", "basico", ""] {
            let plan = SelectedPlan::for_plan_id(id);
            assert_eq!(plan.id, id);
            assert_eq!(plan.name, "Plan Premium");
            assert_eq!(plan.price_monthly, 50_000);
        }
    }

    #[test]
    fn status_flags() {
        let new = AccountStatus::NewAccount {
            user_info: UserInfo {
                id: "u1".to_owned(),
                email: "a@b.c".to_owned(),
            },
        };
        assert!(new.needs_onboarding());
        assert!(!new.has_profile());

        let pending = AccountStatus::OnboardingPending {
            organization: ProfileOrganization::default(),
        };
        assert!(pending.needs_onboarding());
        assert!(pending.has_profile());

        let active = AccountStatus::Active {
            profile: AccountProfile::default(),
            organization: None,
        };
        assert!(!active.needs_onboarding());
        assert!(active.has_profile());
    }
}
