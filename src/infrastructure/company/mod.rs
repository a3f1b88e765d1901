//! Company infrastructure module

mod postgres_repository;
mod repository;
mod service;

pub use postgres_repository::PostgresCompanyRepository;
pub use repository::InMemoryCompanyRepository;
pub use service::{CompanyService, CompanyWithJobs, CreateCompanyRequest, UpdateCompanyRequest};
