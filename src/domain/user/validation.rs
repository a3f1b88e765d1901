//! Field rules for user accounts
//!
//! The HTTP layer checks payload shape; these rules hold for every caller of
//! the user service.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("Username must be 1 to {} characters", MAX_USERNAME_LENGTH)]
    UsernameLength,

    #[error("Username may only use letters, digits, '_' and '-' (found '{0}')")]
    UsernameCharacter(char),

    #[error("Password must be {} to {} characters", MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH)]
    PasswordLength,

    #[error("Email must look like name@domain")]
    Email,
}

pub const MAX_USERNAME_LENGTH: usize = 25;
pub const MIN_PASSWORD_LENGTH: usize = 5;
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Usernames are the primary key and appear in URLs
pub fn validate_username(username: &str) -> Result<(), UserValidationError> {
    if !(1..=MAX_USERNAME_LENGTH).contains(&username.chars().count()) {
        return Err(UserValidationError::UsernameLength);
    }

    match username
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
    {
        Some(bad) => Err(UserValidationError::UsernameCharacter(bad)),
        None => Ok(()),
    }
}

pub fn validate_password(password: &str) -> Result<(), UserValidationError> {
    if (MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&password.chars().count()) {
        Ok(())
    } else {
        Err(UserValidationError::PasswordLength)
    }
}

/// Matches the `users.email` CHECK constraint: something before an '@'
pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(UserValidationError::Email),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usernames() {
        for ok in ["u1", "admin", "first_last", "first-last", "A9"] {
            assert!(validate_username(ok).is_ok(), "{ok}");
        }

        assert_eq!(validate_username(""), Err(UserValidationError::UsernameLength));
        assert_eq!(
            validate_username(&"x".repeat(MAX_USERNAME_LENGTH + 1)),
            Err(UserValidationError::UsernameLength)
        );
        assert!(validate_username(&"x".repeat(MAX_USERNAME_LENGTH)).is_ok());
    }

    #[test]
    fn test_username_reports_first_bad_character() {
        assert_eq!(
            validate_username("new user!"),
            Err(UserValidationError::UsernameCharacter(' '))
        );
        assert_eq!(
            validate_username("me@home"),
            Err(UserValidationError::UsernameCharacter('@'))
        );
    }

    #[test]
    fn test_password_bounds() {
        assert!(validate_password("12345").is_ok());
        assert!(validate_password(&"p".repeat(MAX_PASSWORD_LENGTH)).is_ok());
        assert_eq!(validate_password("1234"), Err(UserValidationError::PasswordLength));
        assert_eq!(
            validate_password(&"p".repeat(MAX_PASSWORD_LENGTH + 1)),
            Err(UserValidationError::PasswordLength)
        );
    }

    #[test]
    fn test_email() {
        assert!(validate_email("u1@user.com").is_ok());
        assert!(validate_email("a@b").is_ok());
        assert_eq!(validate_email("@user.com"), Err(UserValidationError::Email));
        assert_eq!(validate_email("user.com"), Err(UserValidationError::Email));
        assert_eq!(validate_email("user@"), Err(UserValidationError::Email));
    }
}
