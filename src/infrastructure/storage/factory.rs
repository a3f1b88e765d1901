//! Storage factory for runtime storage selection

use std::sync::Arc;

use sqlx::PgPool;
use tracing::info;

use crate::domain::DomainError;

use super::in_memory::InMemoryTables;
use super::migrations::run_schema_migrations;
use super::postgres::{connect_pool, PostgresConfig};

/// Supported storage types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageType {
    /// In-memory storage (for testing/development)
    InMemory,
    /// PostgreSQL storage
    Postgres,
}

impl StorageType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Some(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Some(Self::Postgres),
            _ => None,
        }
    }
}

/// An opened storage backend, ready to hand to repositories
#[derive(Debug, Clone)]
pub enum StorageBackend {
    InMemory(Arc<InMemoryTables>),
    Postgres(PgPool),
}

/// Factory for opening storage backends
#[derive(Debug)]
pub struct StorageFactory;

impl StorageFactory {
    /// Opens the backend named by `storage_type`
    ///
    /// For PostgreSQL, pending schema migrations are applied when `migrate` is set.
    pub async fn create(
        storage_type: &StorageType,
        config: &PostgresConfig,
        migrate: bool,
    ) -> Result<StorageBackend, DomainError> {
        match storage_type {
            StorageType::InMemory => Ok(StorageBackend::InMemory(Self::create_in_memory())),
            StorageType::Postgres => {
                let pool = Self::create_postgres(config).await?;

                if migrate {
                    let applied = run_schema_migrations(&pool).await?;
                    info!(applied, "Schema migrations checked");
                }

                Ok(StorageBackend::Postgres(pool))
            }
        }
    }

    /// Creates empty in-memory tables
    pub fn create_in_memory() -> Arc<InMemoryTables> {
        InMemoryTables::new()
    }

    /// Opens a PostgreSQL connection pool
    pub async fn create_postgres(config: &PostgresConfig) -> Result<PgPool, DomainError> {
        info!("Connecting to PostgreSQL...");
        let pool = connect_pool(config).await?;
        info!("PostgreSQL connection established");

        Ok(pool)
    }
}
