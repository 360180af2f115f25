use axum::Json;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use super::dto::{
    AccountProfileDto, AccountStatusDto, ActiveAccountDto, ErrorBodyDto, HealthDto,
    NewAccountDto, OnboardingPendingDto, OrganizationDto, PlanDto, PlansResponseDto,
    ProfileOrganizationDto, RegistrationErrorDto, RegistrationStatusDto,
    RegistrationUserDataDto, SelectedPlanDto, UserInfoDto,
};
use super::handlers;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    info(title = "ReservaPlus API"),
    paths(
        handlers::list_active_plans,
        handlers::get_registration_status,
        handlers::get_account_status,
        handlers::health,
    ),
    components(schemas(
        PlanDto,
        PlansResponseDto,
        SelectedPlanDto,
        RegistrationUserDataDto,
        RegistrationStatusDto,
        RegistrationErrorDto,
        UserInfoDto,
        ProfileOrganizationDto,
        OrganizationDto,
        AccountProfileDto,
        NewAccountDto,
        OnboardingPendingDto,
        ActiveAccountDto,
        AccountStatusDto,
        ErrorBodyDto,
        HealthDto,
    )),
    modifiers(&BearerAuth)
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
