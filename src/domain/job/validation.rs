//! Job validation

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum JobValidationError {
    #[error("Job title cannot be empty")]
    EmptyTitle,

    #[error("Salary cannot be negative")]
    NegativeSalary,

    #[error("Equity must be between 0 and 1, got {0}")]
    EquityOutOfRange(f64),
}

pub fn validate_title(title: &str) -> Result<(), JobValidationError> {
    if title.trim().is_empty() {
        return Err(JobValidationError::EmptyTitle);
    }
    Ok(())
}

pub fn validate_salary(salary: Option<i32>) -> Result<(), JobValidationError> {
    match salary {
        Some(s) if s < 0 => Err(JobValidationError::NegativeSalary),
        _ => Ok(()),
    }
}

pub fn validate_equity(equity: Option<f64>) -> Result<(), JobValidationError> {
    match equity {
        Some(e) if !(0.0..=1.0).contains(&e) => Err(JobValidationError::EquityOutOfRange(e)),
        _ => Ok(()),
    }
}
