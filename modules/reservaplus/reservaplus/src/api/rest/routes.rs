use std::sync::Arc;

use axum::Router;
use axum::extract::Extension;
use axum::http::HeaderValue;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::domain::service::Service;

use super::auth::{AuthState, identity_middleware};
use super::{handlers, openapi};

/// All module routes. Every response, errors included, carries an open
/// `Access-Control-Allow-Origin`.
pub fn router(service: Arc<Service>, auth: AuthState) -> Router {
    let plans = Router::new()
        .route(
            "/api/plans/active",
            get(handlers::list_active_plans).options(handlers::plans_preflight),
        )
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type, Authorization"),
        ));

    // Only the account route reads the caller's identity; the public routes
    // ignore any Authorization header.
    let accounts = Router::new()
        .route(
            "/api/accounts/me/status",
            get(handlers::get_account_status),
        )
        .route_layer(from_fn_with_state(auth, identity_middleware));

    Router::new()
        .merge(plans)
        .merge(accounts)
        .route(
            "/api/registrations/{token}/status",
            get(handlers::get_registration_status),
        )
        .route(
            "/api/registrations//status",
            get(handlers::missing_registration_token),
        )
        .route("/health", get(handlers::health))
        .route("/openapi.json", get(openapi::openapi_json))
        .layer(Extension(service))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
}
