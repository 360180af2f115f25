use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::domain::error::DomainError;

use super::dto::{ErrorBodyDto, RegistrationErrorDto};

/// Domain error on its way out of a handler.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        domain_error_to_response(&self.0)
    }
}

/// Map a domain error to its status code and JSON body.
///
/// Infrastructure errors are logged with full detail here; the client only
/// sees a short generic message.
pub fn domain_error_to_response(e: &DomainError) -> Response {
    match e {
        DomainError::Validation { field, message } => registration_error(
            StatusCode::BAD_REQUEST,
            format!("{} {message}", field_label(field)),
        ),
        DomainError::InvalidToken => {
            registration_error(StatusCode::NOT_FOUND, "Invalid registration token")
        }
        DomainError::TokenExpired => {
            registration_error(StatusCode::GONE, "Registration token has expired")
        }
        DomainError::Unauthenticated(reason) => {
            tracing::debug!(reason = %reason, "rejecting unauthenticated request");
            unauthorized(reason)
        }
        DomainError::CorruptRecord { .. } => {
            tracing::error!(error = %e, "undecodable record in store");
            internal("Stored record could not be read")
        }
        DomainError::Store(inner) => {
            tracing::error!(error = ?inner, "store request failed");
            internal("Failed to reach data store")
        }
    }
}

pub fn unauthorized(message: impl Into<String>) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorBodyDto {
            error: "Unauthorized".to_owned(),
            message: message.into(),
        }),
    )
        .into_response()
}

fn internal(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBodyDto {
            error: "Internal server error".to_owned(),
            message: message.to_owned(),
        }),
    )
        .into_response()
}

fn registration_error(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(RegistrationErrorDto {
            is_valid: false,
            error: error.into(),
        }),
    )
        .into_response()
}

fn field_label(field: &str) -> &str {
    match field {
        "token" => "Registration token",
        other => other,
    }
}
