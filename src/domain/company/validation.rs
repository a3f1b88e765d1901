//! Company validation

use thiserror::Error;

/// Errors that can occur during company validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CompanyValidationError {
    #[error("Company handle cannot be empty")]
    EmptyHandle,

    #[error("Company handle cannot exceed {0} characters")]
    HandleTooLong(usize),

    #[error("Company handle can only contain lowercase letters, digits and hyphens")]
    InvalidHandleCharacters,

    #[error("Company handle cannot start or end with a hyphen")]
    InvalidHandleFormat,

    #[error("Company name cannot be empty")]
    EmptyName,

    #[error("Company name cannot exceed {0} characters")]
    NameTooLong(usize),

    #[error("Number of employees cannot be negative")]
    NegativeEmployees,
}

const MAX_HANDLE_LENGTH: usize = 25;
const MAX_NAME_LENGTH: usize = 128;

/// Validate a company handle (lowercase slug)
pub fn validate_handle(handle: &str) -> Result<(), CompanyValidationError> {
    if handle.is_empty() {
        return Err(CompanyValidationError::EmptyHandle);
    }

    if handle.len() > MAX_HANDLE_LENGTH {
        return Err(CompanyValidationError::HandleTooLong(MAX_HANDLE_LENGTH));
    }

    if !handle
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(CompanyValidationError::InvalidHandleCharacters);
    }

    if handle.starts_with('-') || handle.ends_with('-') {
        return Err(CompanyValidationError::InvalidHandleFormat);
    }

    Ok(())
}

/// Validate a company display name
pub fn validate_company_name(name: &str) -> Result<(), CompanyValidationError> {
    if name.trim().is_empty() {
        return Err(CompanyValidationError::EmptyName);
    }

    if name.len() > MAX_NAME_LENGTH {
        return Err(CompanyValidationError::NameTooLong(MAX_NAME_LENGTH));
    }

    Ok(())
}

/// Validate an employee head count
pub fn validate_num_employees(num_employees: Option<i32>) -> Result<(), CompanyValidationError> {
    match num_employees {
        Some(n) if n < 0 => Err(CompanyValidationError::NegativeEmployees),
        _ => Ok(()),
    }
}
