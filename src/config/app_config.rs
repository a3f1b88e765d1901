use serde::Deserialize;

use crate::infrastructure::auth::{JwtConfig, DEFAULT_JWT_SECRET};
use crate::infrastructure::storage::PostgresConfig;

/// Top-level configuration, layered from files and `APP__*` variables
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub database: PostgresConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_expiration_hours: u64,
    /// Argon2 memory cost in KiB; the crate default when unset
    pub argon2_memory_kib: Option<u32>,
    /// Argon2 time cost; the crate default when unset
    pub argon2_iterations: Option<u32>,
    /// Password for the `admin` account created on an empty user table;
    /// generated and logged when unset
    pub admin_password: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// `memory` or `postgres`
    pub backend: String,
    /// Apply pending schema migrations on startup
    pub run_migrations: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            jwt_expiration_hours: 24,
            argon2_memory_kib: None,
            argon2_iterations: None,
            admin_password: None,
        }
    }
}

impl AuthConfig {
    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig::new(&self.jwt_secret, self.jwt_expiration_hours)
    }

    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }

    /// Configured bootstrap password, blank counts as unset
    pub fn admin_password(&self) -> Option<&str> {
        self.admin_password.as_deref().filter(|p| !p.is_empty())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: "postgres".to_string(),
            run_migrations: true,
        }
    }
}

impl AppConfig {
    /// Load `config/default`, `config/local`, then `APP__*` variables
    ///
    /// `DATABASE_URL` fills in `database.url` and `ADMIN_DEFAULT_PASSWORD`
    /// fills in `auth.admin_password` when nothing else sets them.
    pub fn load() -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        if let Ok(url) = std::env::var("DATABASE_URL") {
            builder = builder.set_default("database.url", url)?;
        }
        if let Ok(password) = std::env::var("ADMIN_DEFAULT_PASSWORD") {
            builder = builder.set_default("auth.admin_password", password)?;
        }

        let config = builder
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
