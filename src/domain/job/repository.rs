//! Job repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{Job, JobChanges, JobFilter, NewJob};
use crate::domain::DomainError;

/// Repository trait for job storage
#[async_trait]
pub trait JobRepository: Send + Sync + Debug {
    async fn get(&self, id: i32) -> Result<Option<Job>, DomainError>;

    /// Store a new job; `Validation` if the company does not exist
    async fn create(&self, job: NewJob) -> Result<Job, DomainError>;

    async fn update(&self, id: i32, changes: &JobChanges) -> Result<Job, DomainError>;

    async fn delete(&self, id: i32) -> Result<bool, DomainError>;

    /// List jobs matching the filter, ordered by title then id
    async fn list(&self, filter: &JobFilter) -> Result<Vec<Job>, DomainError>;
}
