//! Company repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{Company, CompanyChanges, CompanyFilter};
use crate::domain::DomainError;

/// Repository trait for company storage
#[async_trait]
pub trait CompanyRepository: Send + Sync + Debug {
    /// Get a company by handle
    async fn get(&self, handle: &str) -> Result<Option<Company>, DomainError>;

    /// Create a company, failing with `Conflict` on a duplicate handle or name
    async fn create(&self, company: Company) -> Result<Company, DomainError>;

    /// Apply a partial update, failing with `NotFound` if the company is absent
    async fn update(&self, handle: &str, changes: &CompanyChanges)
        -> Result<Company, DomainError>;

    /// Delete a company and, through the foreign key, its jobs
    async fn delete(&self, handle: &str) -> Result<bool, DomainError>;

    /// List companies matching the filter, ordered by name
    async fn list(&self, filter: &CompanyFilter) -> Result<Vec<Company>, DomainError>;

    /// Count companies without loading them
    async fn count(&self) -> Result<usize, DomainError>;
}
