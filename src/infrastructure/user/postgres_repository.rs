//! PostgreSQL user repository implementation

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::user::{User, UserChanges, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::storage::{is_check_violation, is_unique_violation};

const USER_COLUMNS: &str = "username, password, first_name, last_name, email, photo_url, is_admin";

/// PostgreSQL implementation of UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM users WHERE username = $1",
            USER_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get user by username: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        // The primary key rejects a racing duplicate even after a pre-check
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO users (username, password, first_name, last_name, email,
                               photo_url, is_admin)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(user.username())
        .bind(user.password_hash())
        .bind(user.first_name())
        .bind(user.last_name())
        .bind(user.email())
        .bind(user.photo_url())
        .bind(user.is_admin())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::conflict(format!("Username '{}' already exists", user.username()))
            } else if is_check_violation(&e) {
                DomainError::validation(format!("Invalid data for user '{}'", user.username()))
            } else {
                DomainError::storage(format!("Failed to create user: {}", e))
            }
        })?;

        row_to_user(&row)
    }

    async fn update(&self, username: &str, changes: &UserChanges) -> Result<User, DomainError> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE users
            SET password = COALESCE($2, password),
                first_name = COALESCE($3, first_name),
                last_name = COALESCE($4, last_name),
                email = COALESCE($5, email),
                photo_url = CASE WHEN $6 THEN $7 ELSE photo_url END,
                is_admin = COALESCE($8, is_admin)
            WHERE username = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(username)
        .bind(&changes.password_hash)
        .bind(&changes.first_name)
        .bind(&changes.last_name)
        .bind(&changes.email)
        .bind(changes.photo_url.is_some())
        .bind(changes.photo_url.clone().flatten())
        .bind(changes.is_admin)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if is_check_violation(&e) {
                DomainError::validation(format!("Invalid data for user '{}'", username))
            } else {
                DomainError::storage(format!("Failed to update user: {}", e))
            }
        })?;

        match row {
            Some(row) => row_to_user(&row),
            None => Err(DomainError::not_found(format!(
                "User '{}' not found",
                username
            ))),
        }
    }

    async fn delete(&self, username: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE username = $1")
            .bind(username)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete user: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM users ORDER BY username",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list users: {}", e)))?;

        rows.iter().map(row_to_user).collect()
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count users: {}", e)))?;

        Ok(count as usize)
    }
}

fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
    let storage_err =
        |e: sqlx::Error| DomainError::storage(format!("Invalid user row in database: {}", e));

    let username: String = row.try_get("username").map_err(storage_err)?;
    let password_hash: String = row.try_get("password").map_err(storage_err)?;
    let first_name: String = row.try_get("first_name").map_err(storage_err)?;
    let last_name: String = row.try_get("last_name").map_err(storage_err)?;
    let email: String = row.try_get("email").map_err(storage_err)?;
    let photo_url: Option<String> = row.try_get("photo_url").map_err(storage_err)?;
    let is_admin: bool = row.try_get("is_admin").map_err(storage_err)?;

    Ok(User::new(username, password_hash, first_name, last_name, email)
        .with_photo_url(photo_url)
        .with_admin(is_admin))
}
