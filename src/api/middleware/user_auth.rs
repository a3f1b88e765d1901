//! Bearer-token extractors
//!
//! Tokens are read from `Authorization: Bearer <jwt>` only.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::infrastructure::auth::JwtClaims;

/// Rejects the request with 401 unless it carries a valid token
#[derive(Debug, Clone)]
pub struct RequireUser(pub JwtClaims);

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| ApiError::unauthorized("Missing bearer token"))?;

        let claims = state.auth_service.verify(token).map_err(|e| {
            debug!(error = %e, "Rejected bearer token");
            ApiError::unauthorized("Invalid or expired token")
        })?;

        Ok(RequireUser(claims))
    }
}

/// Claims when a valid token is present; a bad token counts as anonymous
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<JwtClaims>);

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = bearer_token(&parts.headers)
            .and_then(|token| state.auth_service.verify(token).ok());

        Ok(MaybeUser(claims))
    }
}

/// The token from a `Bearer` authorization header, if non-empty
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();

    (!token.is_empty()).then_some(token)
}
