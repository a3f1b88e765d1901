//! CLI module for Jobly
//!
//! - `serve`: run the HTTP API
//! - `migrate`: apply, revert or inspect schema migrations

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Jobly - users, companies and jobs over a REST API
#[derive(Parser)]
#[command(name = "jobly")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server
    Serve,

    /// Manage the database schema
    Migrate {
        #[command(subcommand)]
        action: migrate::MigrateAction,
    },
}

/// Load `.env` and the layered configuration, then start logging
pub(crate) fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging);

    Ok(config)
}
