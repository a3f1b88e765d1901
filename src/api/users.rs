//! User endpoints
//!
//! Reads are public. Registration is public, but only an admin token may
//! create another admin. Updates and deletes need the owner's or an admin's
//! token; a missing target is reported as 401 like any other refusal.

use axum::{extract::State, routing::get, Router};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use validator::Validate;

use crate::api::auth::TokenResponse;
use crate::api::middleware::{MaybeUser, RequireUser};
use crate::api::state::AppState;
use crate::api::types::{
    check_nullable_url, nullable, ApiError, Json, MessageResponse, Path, ValidatedJson,
};
use crate::domain::user::User;
use crate::domain::DomainError;
use crate::infrastructure::auth::JwtClaims;
use crate::infrastructure::user::{CreateUserRequest, UpdateUserRequest};

/// Create the users router
pub fn create_users_router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{username}",
            get(get_user).patch(update_user).delete(delete_user),
        )
}

/// Registration payload
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct NewUserBody {
    #[validate(length(min = 1, max = 25))]
    pub username: String,
    #[validate(length(min = 5, max = 128))]
    pub password: String,
    #[validate(length(min = 1, max = 30))]
    pub first_name: String,
    #[validate(length(min = 1, max = 30))]
    pub last_name: String,
    #[validate(email, length(max = 60))]
    pub email: String,
    #[validate(url)]
    pub photo_url: Option<String>,
    pub is_admin: Option<bool>,
}

/// Partial update payload; the username cannot change
///
/// `"photo_url": null` removes the photo, leaving the key out keeps it.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
#[validate(schema(function = "validate_update_urls"))]
pub struct UpdateUserBody {
    #[validate(length(min = 5, max = 128))]
    pub password: Option<String>,
    #[validate(length(min = 1, max = 30))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 30))]
    pub last_name: Option<String>,
    #[validate(email, length(max = 60))]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub photo_url: Option<Option<String>>,
    pub is_admin: Option<bool>,
}

fn validate_update_urls(body: &UpdateUserBody) -> Result<(), validator::ValidationError> {
    check_nullable_url(&body.photo_url, "photo_url")
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub users: Vec<User>,
}

/// GET /users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<UsersResponse>, ApiError> {
    debug!("Listing users");

    let users = state.user_service.find_all().await?;

    Ok(Json(UsersResponse { users }))
}

/// GET /users/{username}
pub async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(username = %username, "Getting user");

    let user = state.user_service.find_by_username(&username).await?;

    Ok(Json(UserResponse { user }))
}

/// POST /users
///
/// Returns a token for the new user.
pub async fn create_user(
    State(state): State<AppState>,
    MaybeUser(caller): MaybeUser,
    ValidatedJson(body): ValidatedJson<NewUserBody>,
) -> Result<Json<TokenResponse>, ApiError> {
    debug!(username = %body.username, "Creating user");

    let is_admin = body.is_admin.unwrap_or(false);
    if is_admin && !caller.as_ref().is_some_and(|c| c.is_admin) {
        warn!(username = %body.username, "Non-admin attempted to create an admin");
        return Err(ApiError::unauthorized("Only admins can create admin users"));
    }

    let request = CreateUserRequest {
        username: body.username,
        password: body.password,
        first_name: body.first_name,
        last_name: body.last_name,
        email: body.email,
        photo_url: body.photo_url,
        is_admin,
    };

    let (_, token) = state.auth_service.register(request).await?;

    Ok(Json(TokenResponse { token }))
}

/// PATCH /users/{username}
pub async fn update_user(
    State(state): State<AppState>,
    RequireUser(claims): RequireUser,
    Path(username): Path<String>,
    ValidatedJson(body): ValidatedJson<UpdateUserBody>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(username = %username, caller = %claims.username(), "Updating user");

    authorize(&claims, &username)?;

    if body.is_admin.is_some() && !claims.is_admin {
        return Err(ApiError::unauthorized("Only admins can change admin status"));
    }

    let request = UpdateUserRequest {
        password: body.password,
        first_name: body.first_name,
        last_name: body.last_name,
        email: body.email,
        photo_url: body.photo_url,
        is_admin: body.is_admin,
    };

    let user = state
        .user_service
        .update(&username, request)
        .await
        .map_err(not_found_as_unauthorized)?;

    Ok(Json(UserResponse { user }))
}

/// DELETE /users/{username}
pub async fn delete_user(
    State(state): State<AppState>,
    RequireUser(claims): RequireUser,
    Path(username): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    debug!(username = %username, caller = %claims.username(), "Deleting user");

    authorize(&claims, &username)?;

    state
        .user_service
        .remove(&username)
        .await
        .map_err(not_found_as_unauthorized)?;

    Ok(Json(MessageResponse::new("User deleted")))
}

fn authorize(claims: &JwtClaims, username: &str) -> Result<(), ApiError> {
    if claims.can_act_for(username) {
        return Ok(());
    }

    warn!(
        caller = %claims.username(),
        target = %username,
        "Refused access to another user's record"
    );
    Err(ApiError::unauthorized("Unauthorized"))
}

fn not_found_as_unauthorized(err: DomainError) -> ApiError {
    if err.is_not_found() {
        ApiError::unauthorized("Unauthorized")
    } else {
        err.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user_body() -> NewUserBody {
        NewUserBody {
            username: "u1".to_string(),
            password: "password1".to_string(),
            first_name: "U1F".to_string(),
            last_name: "U1L".to_string(),
            email: "user1@user.com".to_string(),
            photo_url: None,
            is_admin: None,
        }
    }

    #[test]
    fn test_new_user_body_rules() {
        assert!(new_user_body().validate().is_ok());

        let bad_email = NewUserBody {
            email: "not-an-email".to_string(),
            ..new_user_body()
        };
        assert!(bad_email.validate().is_err());

        let short_password = NewUserBody {
            password: "abc".to_string(),
            ..new_user_body()
        };
        assert!(short_password.validate().is_err());

        let bad_photo = NewUserBody {
            photo_url: Some("not a url".to_string()),
            ..new_user_body()
        };
        assert!(bad_photo.validate().is_err());
    }

    #[test]
    fn test_update_body_rejects_username() {
        let result = serde_json::from_str::<UpdateUserBody>(r#"{"username":"other"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_update_body_null_photo_differs_from_absent() {
        let absent: UpdateUserBody = serde_json::from_str(r#"{"first_name":"New"}"#).unwrap();
        assert_eq!(absent.photo_url, None);

        let cleared: UpdateUserBody = serde_json::from_str(r#"{"photo_url":null}"#).unwrap();
        assert_eq!(cleared.photo_url, Some(None));
        assert!(cleared.validate().is_ok());

        let bad: UpdateUserBody = serde_json::from_str(r#"{"photo_url":"not a url"}"#).unwrap();
        assert!(bad.validate().is_err());

        let good: UpdateUserBody =
            serde_json::from_str(r#"{"photo_url":"http://img.example.com/u1.png"}"#).unwrap();
        assert!(good.validate().is_ok());
    }

    #[test]
    fn test_not_found_is_reported_as_unauthorized() {
        let err = not_found_as_unauthorized(DomainError::not_found("No user: x"));
        assert_eq!(err.status, axum::http::StatusCode::UNAUTHORIZED);

        let err = not_found_as_unauthorized(DomainError::validation("bad"));
        assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);
    }
}
