//! Admin authentication extractor

use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::{debug, warn};

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::infrastructure::auth::JwtClaims;

use super::user_auth::RequireUser;

/// Extractor that requires a valid JWT token carrying `is_admin`
///
/// Non-admin tokens are rejected with 401, like missing ones.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub JwtClaims);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RequireUser(claims) = RequireUser::from_request_parts(parts, state).await?;

        if !claims.is_admin {
            warn!(username = %claims.username(), "Admin access denied");
            return Err(ApiError::unauthorized("Admin access required"));
        }

        debug!(username = %claims.username(), "Admin access via JWT");
        Ok(RequireAdmin(claims))
    }
}
