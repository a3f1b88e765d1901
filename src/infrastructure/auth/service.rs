//! Login, registration and token verification

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::user::{User, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::user::{CreateUserRequest, PasswordHasher, UserService};

use super::jwt::{JwtClaims, TokenSigner};

const INVALID_CREDENTIALS: &str = "Invalid username/password";

#[derive(Debug)]
pub struct AuthService<R: UserRepository, H: PasswordHasher, G: TokenSigner> {
    users: Arc<UserService<R, H>>,
    jwt: Arc<G>,
}

impl<R: UserRepository, H: PasswordHasher, G: TokenSigner> AuthService<R, H, G> {
    pub fn new(users: Arc<UserService<R, H>>, jwt: Arc<G>) -> Self {
        Self { users, jwt }
    }

    /// Check credentials and issue a token
    ///
    /// An unknown user and a wrong password fail the same way.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, DomainError> {
        let Some(user) = self.users.authenticate(username, password).await? else {
            warn!(username = %username, "Failed login attempt");
            return Err(DomainError::unauthorized(INVALID_CREDENTIALS));
        };

        info!(username = %user.username(), "User logged in");
        self.jwt.sign(&user)
    }

    /// Create a user and issue a token for it
    pub async fn register(&self, request: CreateUserRequest) -> Result<(User, String), DomainError> {
        let user = self.users.create(request).await?;
        let token = self.jwt.sign(&user)?;

        Ok((user, token))
    }

    /// Validate signature and expiry of a token
    pub fn verify(&self, token: &str) -> Result<JwtClaims, DomainError> {
        self.jwt.verify(token)
    }
}
