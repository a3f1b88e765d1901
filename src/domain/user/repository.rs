//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{User, UserChanges};
use crate::domain::DomainError;

/// Repository trait for user storage
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Get a user by username
    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Create a new user, failing with `Conflict` if the username is taken
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Apply a partial update, failing with `NotFound` if the user is absent
    async fn update(&self, username: &str, changes: &UserChanges) -> Result<User, DomainError>;

    /// Delete a user, returning whether a row was removed
    async fn delete(&self, username: &str) -> Result<bool, DomainError>;

    /// List all users ordered by username
    async fn list(&self) -> Result<Vec<User>, DomainError>;

    /// Count users
    async fn count(&self) -> Result<usize, DomainError>;

    /// Check if a username exists
    async fn username_exists(&self, username: &str) -> Result<bool, DomainError> {
        Ok(self.get_by_username(username).await?.is_some())
    }
}
