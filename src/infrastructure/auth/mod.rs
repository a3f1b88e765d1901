//! Authentication infrastructure module
//!
//! JWT bearer tokens and the login flow built on the user service.

mod jwt;
mod service;

pub use jwt::{JwtClaims, JwtConfig, JwtService, TokenSigner, DEFAULT_JWT_SECRET};
pub use service::AuthService;
