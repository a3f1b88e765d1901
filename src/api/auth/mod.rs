//! Authentication API endpoints

use axum::{extract::State, routing::post, Router};
use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, ValidatedJson};

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 25))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Response carrying a freshly issued token
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Login with username and password
///
/// POST /login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    debug!(username = %request.username, "Login attempt");

    let token = state
        .auth_service
        .login(&request.username, &request.password)
        .await?;

    Ok(Json(TokenResponse { token }))
}
