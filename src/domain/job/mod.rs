//! Job domain

mod entity;
mod repository;
mod validation;

pub use entity::{Job, JobChanges, JobFilter, NewJob};
pub use repository::JobRepository;
pub use validation::{validate_equity, validate_salary, validate_title, JobValidationError};
