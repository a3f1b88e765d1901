//! Domain layer - Core business logic and entities

pub mod company;
pub mod error;
pub mod job;
pub mod user;

pub use company::{Company, CompanyChanges, CompanyFilter, CompanyRepository};
pub use error::DomainError;
pub use job::{Job, JobChanges, JobFilter, JobRepository, NewJob};
pub use user::{User, UserChanges, UserRepository};
