use std::sync::Arc;

use axum::Json;
use axum::extract::{Extension, Path};

use crate::domain::service::Service;

use super::auth::IdentityClaims;
use super::dto::{
    AccountStatusDto, ErrorBodyDto, HealthDto, PlansResponseDto, RegistrationErrorDto,
    RegistrationStatusDto,
};
use super::error::ApiError;

#[utoipa::path(
    get,
    path = "/api/plans/active",
    tag = "plans",
    responses(
        (status = 200, description = "Active plans ordered by display order", body = PlansResponseDto),
        (status = 500, description = "Store unavailable", body = ErrorBodyDto),
    )
)]
pub async fn list_active_plans(
    Extension(svc): Extension<Arc<Service>>,
) -> Result<Json<PlansResponseDto>, ApiError> {
    let plans = svc.list_active_plans().await?;
    Ok(Json(plans.into()))
}

/// CORS preflight for the public catalog.
pub async fn plans_preflight() -> Json<serde_json::Value> {
    Json(serde_json::json!({}))
}

#[utoipa::path(
    get,
    path = "/api/registrations/{token}/status",
    tag = "registrations",
    params(("token" = String, Path, description = "Opaque registration token")),
    responses(
        (status = 200, description = "Token is valid", body = RegistrationStatusDto),
        (status = 400, description = "Missing token", body = RegistrationErrorDto),
        (status = 404, description = "Unknown token", body = RegistrationErrorDto),
        (status = 410, description = "Token has expired", body = RegistrationErrorDto),
        (status = 500, description = "Store unavailable", body = ErrorBodyDto),
    )
)]
pub async fn get_registration_status(
    Extension(svc): Extension<Arc<Service>>,
    Path(token): Path<String>,
) -> Result<Json<RegistrationStatusDto>, ApiError> {
    let status = svc.check_registration(&token).await?;
    Ok(Json(status.into()))
}

/// `/api/registrations//status`: an empty token segment.
pub async fn missing_registration_token(
    Extension(svc): Extension<Arc<Service>>,
) -> Result<Json<RegistrationStatusDto>, ApiError> {
    let status = svc.check_registration("").await?;
    Ok(Json(status.into()))
}

#[utoipa::path(
    get,
    path = "/api/accounts/me/status",
    tag = "accounts",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Onboarding status of the caller", body = AccountStatusDto),
        (status = 401, description = "No verified identity", body = ErrorBodyDto),
        (status = 500, description = "Store unavailable", body = ErrorBodyDto),
    )
)]
pub async fn get_account_status(
    Extension(svc): Extension<Arc<Service>>,
    claims: Option<Extension<IdentityClaims>>,
) -> Result<Json<AccountStatusDto>, ApiError> {
    let IdentityClaims { sub, email } = claims.map(|Extension(c)| c).unwrap_or_default();
    let status = svc.check_account_status(&sub, &email).await?;
    Ok(Json(status.into()))
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses((status = 200, description = "Process is up", body = HealthDto))
)]
pub async fn health() -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".to_owned(),
    })
}
