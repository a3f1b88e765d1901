//! HS256 bearer tokens carrying the username and admin flag

use std::fmt;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::user::User;
use crate::domain::DomainError;

/// Secret used when none is configured; only fit for local runs
pub const DEFAULT_JWT_SECRET: &str = "change-me-in-production";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Username
    pub sub: String,
    #[serde(default)]
    pub is_admin: bool,
    pub iat: i64,
    pub exp: i64,
}

impl JwtClaims {
    pub fn for_user(user: &User, lifetime: Duration) -> Self {
        let issued = Utc::now();

        Self {
            sub: user.username().to_string(),
            is_admin: user.is_admin(),
            iat: issued.timestamp(),
            exp: (issued + lifetime).timestamp(),
        }
    }

    pub fn username(&self) -> &str {
        &self.sub
    }

    /// Admins act for anyone, everyone else only for themselves
    pub fn can_act_for(&self, username: &str) -> bool {
        self.is_admin || self.sub == username
    }
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: u64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, expiration_hours: u64) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours,
        }
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self::new(DEFAULT_JWT_SECRET, 24)
    }
}

/// Mints and checks bearer tokens
pub trait TokenSigner: Send + Sync + fmt::Debug {
    fn sign(&self, user: &User) -> Result<String, DomainError>;

    /// Signature and expiry are both checked; any failure is Unauthorized
    fn verify(&self, token: &str) -> Result<JwtClaims, DomainError>;
}

#[derive(Clone)]
pub struct JwtService {
    lifetime: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Self {
        let secret = config.secret.as_bytes();

        Self {
            lifetime: Duration::hours(config.expiration_hours as i64),
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
        }
    }
}

impl fmt::Debug for JwtService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtService")
            .field("lifetime_hours", &self.lifetime.num_hours())
            .finish_non_exhaustive()
    }
}

impl TokenSigner for JwtService {
    fn sign(&self, user: &User) -> Result<String, DomainError> {
        let claims = JwtClaims::for_user(user, self.lifetime);

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to sign token: {}", e)))
    }

    fn verify(&self, token: &str) -> Result<JwtClaims, DomainError> {
        decode::<JwtClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| DomainError::unauthorized(format!("Invalid token: {}", e)))
    }
}
