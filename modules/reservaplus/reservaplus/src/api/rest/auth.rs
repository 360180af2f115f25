//! Bearer token identity layer.
//!
//! Verifies the identity provider's JWT and exposes the subject and email to
//! handlers as [`IdentityClaims`]. Requests without an `Authorization` header
//! pass through unauthenticated; handlers decide whether that is acceptable.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{AuthConfig, JwtAlgorithm};

use super::error::unauthorized;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaims {
    #[serde(default)]
    pub sub: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Authorization header is not a bearer token")]
    MalformedHeader,

    #[error("Token verification is not configured")]
    NotConfigured,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Invalid auth configuration: {0}")]
    Config(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self, "rejecting bearer token");
        unauthorized(self.to_string())
    }
}

pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Build a verifier from config. `Ok(None)` when no key is configured.
    ///
    /// # Errors
    /// Returns `AuthError::Config` when the configured key cannot be parsed.
    pub fn from_config(cfg: &AuthConfig) -> Result<Option<Self>, AuthError> {
        let (key, algorithm) = match cfg.algorithm {
            JwtAlgorithm::Hs256 => match cfg.secret.as_deref().filter(|s| !s.is_empty()) {
                Some(secret) => (DecodingKey::from_secret(secret.as_bytes()), Algorithm::HS256),
                None => return Ok(None),
            },
            JwtAlgorithm::Rs256 => match cfg.public_key_pem.as_deref() {
                Some(pem) => (
                    DecodingKey::from_rsa_pem(pem.as_bytes())
                        .map_err(|e| AuthError::Config(e.to_string()))?,
                    Algorithm::RS256,
                ),
                None => return Ok(None),
            },
        };

        let mut validation = Validation::new(algorithm);
        validation.leeway = cfg.leeway_secs;
        if !cfg.issuers.is_empty() {
            validation.set_issuer(cfg.issuers.as_slice());
        }
        if cfg.audiences.is_empty() {
            validation.validate_aud = false;
        } else {
            validation.set_audience(cfg.audiences.as_slice());
        }

        Ok(Some(Self { key, validation }))
    }

    /// # Errors
    /// Returns `AuthError::InvalidToken` on a bad signature, expiry, issuer or audience.
    pub fn verify(&self, token: &str) -> Result<IdentityClaims, AuthError> {
        decode::<IdentityClaims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }
}

/// Shared middleware state; `None` means no verification key is configured.
pub type AuthState = Option<Arc<TokenVerifier>>;

pub async fn identity_middleware(
    State(verifier): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let Some(value) = req.headers().get(header::AUTHORIZATION) else {
        return Ok(next.run(req).await);
    };

    let token = value
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::MalformedHeader)?;

    let verifier = verifier.as_ref().ok_or(AuthError::NotConfigured)?;
    let claims = verifier.verify(token)?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
