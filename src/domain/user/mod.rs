//! User domain
//!
//! This module provides domain types and traits for user accounts,
//! including the user entity, partial updates, validation, and the
//! repository trait.

mod entity;
mod repository;
mod validation;

pub use entity::{User, UserChanges};
pub use repository::UserRepository;
pub use validation::{validate_email, validate_password, validate_username, UserValidationError};

#[cfg(test)]
pub use repository::mock::UnavailableUserRepository;
