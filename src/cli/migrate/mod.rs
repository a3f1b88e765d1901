//! Migrate command - applies or reverts the embedded schema migrations

use clap::Subcommand;
use tracing::info;

use crate::infrastructure::storage::{
    revert_last_migration, run_schema_migrations, schema_migrations, PostgresMigrator,
    StorageFactory,
};

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    /// Apply all pending migrations
    Up,
    /// Revert the most recent migration
    Down,
    /// List migrations and whether they are applied
    Status,
}

pub async fn run(action: MigrateAction) -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    let pool = StorageFactory::create_postgres(&config.database).await?;

    match action {
        MigrateAction::Up => {
            let applied = run_schema_migrations(&pool).await?;
            info!(applied, "Migrations applied");
        }
        MigrateAction::Down => match revert_last_migration(&pool).await? {
            Some(version) => info!(version, "Migration reverted"),
            None => info!("No migrations to revert"),
        },
        MigrateAction::Status => {
            let applied = PostgresMigrator::new(pool.clone()).applied_versions().await?;

            for migration in schema_migrations() {
                let state = if applied.contains(&migration.version) {
                    "applied"
                } else {
                    "pending"
                };
                println!("{:>4}  {:<8} {}", migration.version, state, migration.description);
            }
        }
    }

    pool.close().await;
    Ok(())
}
