//! Database schema migrations
//!
//! Migrations are embedded SQL applied in version order and tracked in the
//! `_migrations` table. Each migration runs inside its own transaction.

use sqlx::postgres::PgPool;
use tracing::info;

use crate::domain::DomainError;

/// A versioned schema change
#[derive(Debug, Clone)]
pub struct Migration {
    /// Migration version, strictly increasing
    pub version: i64,
    /// Human-readable description
    pub description: String,
    /// SQL to run when applying the migration
    pub up: String,
    /// SQL to run when reverting the migration
    pub down: String,
}

impl Migration {
    pub fn new(
        version: i64,
        description: impl Into<String>,
        up: impl Into<String>,
        down: impl Into<String>,
    ) -> Self {
        Self {
            version,
            description: description.into(),
            up: up.into(),
            down: down.into(),
        }
    }
}

/// PostgreSQL migrator
#[derive(Debug, Clone)]
pub struct PostgresMigrator {
    pool: PgPool,
}

impl PostgresMigrator {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn ensure_migrations_table(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS _migrations (
                version BIGINT PRIMARY KEY,
                description TEXT NOT NULL,
                installed_on TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create migrations table: {}", e)))?;

        Ok(())
    }

    async fn is_applied(&self, version: i64) -> Result<bool, DomainError> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM _migrations WHERE version = $1)")
            .bind(version)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to check migration status: {}", e)))
    }

    /// Apply a migration unless it is already recorded
    ///
    /// Returns true if the migration ran.
    pub async fn run_migration(&self, migration: &Migration) -> Result<bool, DomainError> {
        self.ensure_migrations_table().await?;

        if self.is_applied(migration.version).await? {
            return Ok(false);
        }

        let storage_err = |e: sqlx::Error| {
            DomainError::storage(format!(
                "Failed to run migration {}: {}",
                migration.version, e
            ))
        };

        let mut tx = self.pool.begin().await.map_err(storage_err)?;

        // raw_sql allows several statements per migration
        sqlx::raw_sql(&migration.up)
            .execute(&mut *tx)
            .await
            .map_err(storage_err)?;

        sqlx::query("INSERT INTO _migrations (version, description) VALUES ($1, $2)")
            .bind(migration.version)
            .bind(&migration.description)
            .execute(&mut *tx)
            .await
            .map_err(storage_err)?;

        tx.commit().await.map_err(storage_err)?;

        info!(
            version = migration.version,
            description = %migration.description,
            "Applied migration"
        );

        Ok(true)
    }

    /// Revert a migration if it is recorded
    ///
    /// Returns true if the migration was reverted.
    pub async fn revert_migration(&self, migration: &Migration) -> Result<bool, DomainError> {
        self.ensure_migrations_table().await?;

        if !self.is_applied(migration.version).await? {
            return Ok(false);
        }

        let storage_err = |e: sqlx::Error| {
            DomainError::storage(format!(
                "Failed to revert migration {}: {}",
                migration.version, e
            ))
        };

        let mut tx = self.pool.begin().await.map_err(storage_err)?;

        sqlx::raw_sql(&migration.down)
            .execute(&mut *tx)
            .await
            .map_err(storage_err)?;

        sqlx::query("DELETE FROM _migrations WHERE version = $1")
            .bind(migration.version)
            .execute(&mut *tx)
            .await
            .map_err(storage_err)?;

        tx.commit().await.map_err(storage_err)?;

        info!(
            version = migration.version,
            description = %migration.description,
            "Reverted migration"
        );

        Ok(true)
    }

    /// Returns the latest applied migration version
    pub async fn current_version(&self) -> Result<Option<i64>, DomainError> {
        self.ensure_migrations_table().await?;

        sqlx::query_scalar("SELECT MAX(version) FROM _migrations")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get migration version: {}", e)))
    }

    /// Returns all applied migration versions
    pub async fn applied_versions(&self) -> Result<Vec<i64>, DomainError> {
        self.ensure_migrations_table().await?;

        sqlx::query_scalar("SELECT version FROM _migrations ORDER BY version")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get applied migrations: {}", e)))
    }
}

/// The Jobly schema: companies, jobs (foreign key to companies), users
pub fn schema_migrations() -> Vec<Migration> {
    vec![
        Migration::new(
            1,
            "Create companies table",
            r#"
            CREATE TABLE companies (
                handle VARCHAR(25) PRIMARY KEY CHECK (handle = lower(handle)),
                name TEXT UNIQUE NOT NULL,
                num_employees INTEGER CHECK (num_employees >= 0),
                description TEXT NOT NULL,
                logo_url TEXT
            );
            "#,
            "DROP TABLE IF EXISTS companies;",
        ),
        Migration::new(
            2,
            "Create jobs table",
            r#"
            CREATE TABLE jobs (
                id SERIAL PRIMARY KEY,
                title TEXT NOT NULL,
                salary INTEGER CHECK (salary >= 0),
                equity DOUBLE PRECISION CHECK (equity >= 0 AND equity <= 1.0),
                company_handle VARCHAR(25) NOT NULL
                    REFERENCES companies ON DELETE CASCADE
            );
            CREATE INDEX idx_jobs_company_handle ON jobs(company_handle);
            "#,
            "DROP TABLE IF EXISTS jobs;",
        ),
        Migration::new(
            3,
            "Create users table",
            r#"
            CREATE TABLE users (
                username VARCHAR(25) PRIMARY KEY,
                password TEXT NOT NULL,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                email TEXT NOT NULL CHECK (position('@' IN email) > 1),
                photo_url TEXT,
                is_admin BOOLEAN NOT NULL DEFAULT FALSE
            );
            "#,
            "DROP TABLE IF EXISTS users;",
        ),
    ]
}

/// Runs all pending schema migrations, returning how many were applied
pub async fn run_schema_migrations(pool: &PgPool) -> Result<usize, DomainError> {
    let migrator = PostgresMigrator::new(pool.clone());
    let mut applied = 0;

    for migration in schema_migrations() {
        if migrator.run_migration(&migration).await? {
            applied += 1;
        }
    }

    Ok(applied)
}

/// Reverts the most recently applied schema migration, if any
pub async fn revert_last_migration(pool: &PgPool) -> Result<Option<i64>, DomainError> {
    let migrator = PostgresMigrator::new(pool.clone());

    let Some(version) = migrator.current_version().await? else {
        return Ok(None);
    };

    let migration = schema_migrations()
        .into_iter()
        .find(|m| m.version == version)
        .ok_or_else(|| {
            DomainError::storage(format!("Applied migration {} is unknown to this build", version))
        })?;

    migrator.revert_migration(&migration).await?;

    Ok(Some(version))
}
