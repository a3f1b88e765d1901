//! Company domain

mod entity;
mod repository;
mod validation;

pub use entity::{Company, CompanyChanges, CompanyFilter};
pub use repository::CompanyRepository;
pub use validation::{
    validate_company_name, validate_handle, validate_num_employees, CompanyValidationError,
};
