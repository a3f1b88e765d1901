//! User service for account management and credential checks

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::info;

use crate::domain::user::{
    validate_email, validate_password, validate_username, User, UserChanges, UserRepository,
};
use crate::domain::DomainError;

use super::password::PasswordHasher;

/// Request for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub photo_url: Option<String>,
    pub is_admin: bool,
}

/// Request for updating a user; absent fields are left as they are
#[derive(Debug, Clone, Default)]
pub struct UpdateUserRequest {
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    /// `Some(None)` removes the photo
    pub photo_url: Option<Option<String>>,
    pub is_admin: Option<bool>,
}

/// Verified against when the username is unknown, so a miss costs one hash check
const UNKNOWN_USER_PASSWORD: &str = "unknown-user-placeholder";

/// User service for authentication and management
#[derive(Debug)]
pub struct UserService<R: UserRepository, H: PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
    dummy_hash: OnceCell<String>,
}

impl<R: UserRepository, H: PasswordHasher> UserService<R, H> {
    /// Create a new user service
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self {
            repository,
            hasher,
            dummy_hash: OnceCell::new(),
        }
    }

    async fn hash_password(&self, password: &str) -> Result<String, DomainError> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_string();

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| DomainError::internal(format!("Password hashing task failed: {}", e)))?
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_string();
        let hash = hash.to_string();

        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| DomainError::internal(format!("Password check task failed: {}", e)))
    }

    /// PHC string produced once with this service's hasher
    async fn dummy_hash(&self) -> Result<&str, DomainError> {
        self.dummy_hash
            .get_or_try_init(|| self.hash_password(UNKNOWN_USER_PASSWORD))
            .await
            .map(String::as_str)
    }

    /// All users, ordered by username
    pub async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        self.repository.list().await
    }

    /// Get a user by username
    pub async fn find_by_username(&self, username: &str) -> Result<User, DomainError> {
        self.repository
            .get_by_username(username)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("No user: {}", username)))
    }

    /// Create a new user
    pub async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        validate_username(&request.username)
            .and_then(|_| validate_password(&request.password))
            .and_then(|_| validate_email(&request.email))
            .map_err(|e| DomainError::validation(e.to_string()))?;

        if self.repository.username_exists(&request.username).await? {
            return Err(DomainError::conflict(format!(
                "Username '{}' already exists",
                request.username
            )));
        }

        let password_hash = self.hash_password(&request.password).await?;

        let user = User::new(
            request.username,
            password_hash,
            request.first_name,
            request.last_name,
            request.email,
        )
        .with_photo_url(request.photo_url)
        .with_admin(request.is_admin);

        let user = self.repository.create(user).await?;
        info!(username = %user.username(), is_admin = user.is_admin(), "Created user");

        Ok(user)
    }

    /// Apply a partial update; a new password is re-hashed
    pub async fn update(
        &self,
        username: &str,
        request: UpdateUserRequest,
    ) -> Result<User, DomainError> {
        if let Some(email) = &request.email {
            validate_email(email).map_err(|e| DomainError::validation(e.to_string()))?;
        }

        let password_hash = match &request.password {
            Some(password) => {
                validate_password(password).map_err(|e| DomainError::validation(e.to_string()))?;
                Some(self.hash_password(password).await?)
            }
            None => None,
        };

        let changes = UserChanges {
            password_hash,
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            photo_url: request.photo_url,
            is_admin: request.is_admin,
        };

        if changes.is_empty() {
            return Err(DomainError::validation("No data to update"));
        }

        self.repository.update(username, &changes).await
    }

    /// Delete a user
    pub async fn remove(&self, username: &str) -> Result<(), DomainError> {
        if !self.repository.delete(username).await? {
            return Err(DomainError::not_found(format!("No user: {}", username)));
        }

        info!(username = %username, "Deleted user");
        Ok(())
    }

    /// Authenticate a user with username and password
    ///
    /// Returns None for an unknown user or a wrong password alike. An unknown
    /// user still pays for one verification.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        let Some(user) = self.repository.get_by_username(username).await? else {
            let dummy = self.dummy_hash().await?;
            self.verify_password(password, dummy).await?;
            return Ok(None);
        };

        if !self.verify_password(password, user.password_hash()).await? {
            return Ok(None);
        }

        Ok(Some(user))
    }

    /// Count users
    pub async fn count(&self) -> Result<usize, DomainError> {
        self.repository.count().await
    }
}
