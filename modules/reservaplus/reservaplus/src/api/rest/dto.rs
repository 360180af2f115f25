use chrono::SecondsFormat;
use reservaplus_sdk::{
    AccountProfile, AccountStatus, Organization, PlanSummary, ProfileOrganization,
    RegistrationStatus, RegistrationUserData, SelectedPlan, UserInfo,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// Plans
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PlanDto {
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

impl From<PlanSummary> for PlanDto {
    fn from(plan: PlanSummary) -> Self {
        Self {
            id: plan.id,
            name: plan.name,
            price_monthly: plan.price_monthly,
            price_yearly: plan.price_yearly,
            original_price: plan.original_price,
            discount_text: plan.discount_text,
            description: plan.description,
            features: plan.features,
            is_popular: plan.is_popular,
            is_coming_soon: plan.is_coming_soon,
            badge_text: plan.badge_text,
            color_scheme: plan.color_scheme,
            display_order: plan.display_order,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PlansResponseDto {
    pub results: Vec<PlanDto>,
    pub count: usize,
}

impl From<Vec<PlanSummary>> for PlansResponseDto {
    fn from(plans: Vec<PlanSummary>) -> Self {
        let results: Vec<PlanDto> = plans.into_iter().map(Into::into).collect();
        Self {
            count: results.len(),
            results,
        }
    }
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SelectedPlanDto {
    pub id: String,
    pub name: String,
    pub price_monthly: i64,
}

impl From<SelectedPlan> for SelectedPlanDto {
    fn from(plan: SelectedPlan) -> Self {
        Self {
            id: plan.id,
            name: plan.name,
            price_monthly: plan.price_monthly,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegistrationUserDataDto {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub organization_name: String,
}

impl From<RegistrationUserData> for RegistrationUserDataDto {
    fn from(user: RegistrationUserData) -> Self {
        Self {
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            organization_name: user.organization_name,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegistrationStatusDto {
    pub is_valid: bool,
    pub selected_plan: SelectedPlanDto,
    /// ISO-8601 UTC timestamp with millisecond precision.
    pub expires_at: String,
    pub user_data: RegistrationUserDataDto,
}

impl From<RegistrationStatus> for RegistrationStatusDto {
    fn from(status: RegistrationStatus) -> Self {
        Self {
            is_valid: true,
            selected_plan: status.selected_plan.into(),
            expires_at: status
                .expires_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            user_data: status.user_data.into(),
        }
    }
}

/// Body of every negative registration outcome.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegistrationErrorDto {
    pub is_valid: bool,
    pub error: String,
}

// ---------------------------------------------------------------------------
// Account status
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserInfoDto {
    pub id: String,
    pub email: String,
}

impl From<UserInfo> for UserInfoDto {
    fn from(info: UserInfo) -> Self {
        Self {
            id: info.id,
            email: info.email,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProfileOrganizationDto {
    pub id: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub subscription_status: Option<String>,
}

impl From<ProfileOrganization> for ProfileOrganizationDto {
    fn from(org: ProfileOrganization) -> Self {
        Self {
            id: org.id,
            name: org.name,
            role: org.role,
            subscription_status: org.subscription_status,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrganizationDto {
    pub id: String,
    pub name: String,
    pub industry_template: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subscription_status: Option<String>,
    pub trial_end: Option<String>,
}

impl From<Organization> for OrganizationDto {
    fn from(org: Organization) -> Self {
        Self {
            id: org.id,
            name: org.name,
            industry_template: org.industry_template,
            email: org.email,
            phone: org.phone,
            subscription_status: org.subscription_status,
            trial_end: org.trial_end,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AccountProfileDto {
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
    /// Epoch milliseconds.
    pub last_login: Option<i64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<AccountProfile> for AccountProfileDto {
    fn from(p: AccountProfile) -> Self {
        Self {
            account_id: p.account_id,
            email: p.email,
            first_name: p.first_name,
            last_name: p.last_name,
            role: p.role,
            phone: p.phone,
            organization_id: p.organization_id,
            organization_name: p.organization_name,
            onboarding_completed: p.onboarding_completed,
            subscription_status: p.subscription_status,
            trial_end: p.trial_end,
            last_login: p.last_login,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewAccountDto {
    pub needs_onboarding: bool,
    pub has_profile: bool,
    pub user_info: UserInfoDto,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingPendingDto {
    pub needs_onboarding: bool,
    pub has_profile: bool,
    pub organization_data: ProfileOrganizationDto,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActiveAccountDto {
    pub needs_onboarding: bool,
    pub has_profile: bool,
    pub user_profile: AccountProfileDto,
    /// `null` when the profile has no organization or it no longer exists.
    pub organization_data: Option<OrganizationDto>,
}

/// One of the three account status shapes.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum AccountStatusDto {
    Active(ActiveAccountDto),
    OnboardingPending(OnboardingPendingDto),
    NewAccount(NewAccountDto),
}

impl From<AccountStatus> for AccountStatusDto {
    fn from(status: AccountStatus) -> Self {
        let needs_onboarding = status.needs_onboarding();
        let has_profile = status.has_profile();
        match status {
            AccountStatus::NewAccount { user_info } => Self::NewAccount(NewAccountDto {
                needs_onboarding,
                has_profile,
                user_info: user_info.into(),
            }),
            AccountStatus::OnboardingPending { organization } => {
                Self::OnboardingPending(OnboardingPendingDto {
                    needs_onboarding,
                    has_profile,
                    organization_data: organization.into(),
                })
            }
            AccountStatus::Active {
                profile,
                organization,
            } => Self::Active(ActiveAccountDto {
                needs_onboarding,
                has_profile,
                user_profile: profile.into(),
                organization_data: organization.map(Into::into),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Misc
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBodyDto {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthDto {
    pub status: String,
}
