//! Jobly API
//!
//! A job board backend:
//! - Users with Argon2 password hashes and JWT bearer authentication
//! - Companies and the jobs they post
//! - PostgreSQL storage with embedded migrations, or in-memory storage

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use config::AuthConfig;
use infrastructure::{
    auth::{JwtConfig, JwtService},
    company::{InMemoryCompanyRepository, PostgresCompanyRepository},
    job::{InMemoryJobRepository, PostgresJobRepository},
    storage::{InMemoryTables, StorageBackend, StorageFactory, StorageType},
    user::{Argon2Hasher, CreateUserRequest, InMemoryUserRepository, PostgresUserRepository},
};
use rand::Rng;
use tracing::{info, warn};

/// Username of the account created on an empty user table
pub const INITIAL_ADMIN_USERNAME: &str = "admin";

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let storage_type = StorageType::from_str(&config.storage.backend).ok_or_else(|| {
        anyhow::anyhow!("Unknown storage backend '{}'", config.storage.backend)
    })?;

    info!("Storage backend: {:?}", storage_type);

    if config.auth.uses_default_secret() {
        warn!("Using the default JWT secret; set APP__AUTH__JWT_SECRET in production");
    }

    let hasher = Arc::new(create_hasher(&config.auth)?);
    let jwt = Arc::new(JwtService::new(config.auth.jwt_config()));

    let backend =
        StorageFactory::create(&storage_type, &config.database, config.storage.run_migrations)
            .await?;

    let state = match backend {
        StorageBackend::InMemory(tables) => in_memory_state(tables, hasher, jwt),
        StorageBackend::Postgres(pool) => AppState::new(
            Arc::new(PostgresUserRepository::new(pool.clone())),
            Arc::new(PostgresCompanyRepository::new(pool.clone())),
            Arc::new(PostgresJobRepository::new(pool)),
            hasher,
            jwt,
        ),
    };

    create_initial_admin_user(&state, config.auth.admin_password()).await?;

    Ok(state)
}

/// Create a state over fresh in-memory repositories
pub fn create_in_memory_state(jwt_config: JwtConfig, hasher: Argon2Hasher) -> AppState {
    in_memory_state(
        StorageFactory::create_in_memory(),
        Arc::new(hasher),
        Arc::new(JwtService::new(jwt_config)),
    )
}

fn in_memory_state(
    tables: Arc<InMemoryTables>,
    hasher: Arc<Argon2Hasher>,
    jwt: Arc<JwtService>,
) -> AppState {
    AppState::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(InMemoryCompanyRepository::new(tables.clone())),
        Arc::new(InMemoryJobRepository::new(tables)),
        hasher,
        jwt,
    )
}

/// Generate a random password for the initial admin user
fn generate_random_password() -> String {
    use rand::distributions::Alphanumeric;

    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect()
}

/// Create the `admin` account if no users exist
///
/// Uses `password` when given, otherwise a generated one that is logged once.
/// Returns whether an account was created.
pub async fn create_initial_admin_user(
    state: &AppState,
    password: Option<&str>,
) -> anyhow::Result<bool> {
    if state.user_service.count().await? > 0 {
        return Ok(false);
    }

    let (password, is_configured) = match password {
        Some(p) => (p.to_string(), true),
        None => (generate_random_password(), false),
    };

    let request = CreateUserRequest {
        username: INITIAL_ADMIN_USERNAME.to_string(),
        password: password.clone(),
        first_name: "Admin".to_string(),
        last_name: "User".to_string(),
        email: "admin@localhost".to_string(),
        photo_url: None,
        is_admin: true,
    };

    state.auth_service.register(request).await?;

    info!("===========================================");
    info!("Initial admin user created!");
    info!("Username: {}", INITIAL_ADMIN_USERNAME);

    if is_configured {
        info!("Password: (set via ADMIN_DEFAULT_PASSWORD)");
    } else {
        info!("Password: {}", password);
    }

    info!("Please change this password after first login.");
    info!("===========================================");

    Ok(true)
}

fn create_hasher(auth: &AuthConfig) -> anyhow::Result<Argon2Hasher> {
    match (auth.argon2_memory_kib, auth.argon2_iterations) {
        (None, None) => Ok(Argon2Hasher::new()),
        (memory, iterations) => {
            let memory = memory.unwrap_or(argon2::Params::DEFAULT_M_COST);
            let iterations = iterations.unwrap_or(argon2::Params::DEFAULT_T_COST);
            Ok(Argon2Hasher::with_params(memory, iterations)?)
        }
    }
}
