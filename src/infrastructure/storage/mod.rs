//! Storage infrastructure - connection handling, migrations and in-memory tables

mod factory;
mod in_memory;
pub mod migrations;
mod postgres;

pub use factory::{StorageBackend, StorageFactory, StorageType};
pub use in_memory::InMemoryTables;
pub use migrations::{
    revert_last_migration, run_schema_migrations, schema_migrations, Migration, PostgresMigrator,
};
pub use postgres::{
    connect_pool, escape_like, is_check_violation, is_foreign_key_violation, is_unique_violation,
    PostgresConfig,
};
