//! Job service

use std::sync::Arc;

use tracing::info;

use crate::domain::job::{
    validate_equity, validate_salary, validate_title, Job, JobChanges, JobFilter, JobRepository,
    NewJob,
};
use crate::domain::DomainError;

/// Request for posting a new job
#[derive(Debug, Clone)]
pub struct CreateJobRequest {
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<f64>,
    pub company_handle: String,
}

/// Request for updating a job; the company cannot be changed
#[derive(Debug, Clone, Default)]
pub struct UpdateJobRequest {
    pub title: Option<String>,
    /// `Some(None)` clears the value; likewise for `equity`
    pub salary: Option<Option<i32>>,
    pub equity: Option<Option<f64>>,
}

#[derive(Debug)]
pub struct JobService<J: JobRepository> {
    repository: Arc<J>,
}

impl<J: JobRepository> JobService<J> {
    pub fn new(repository: Arc<J>) -> Self {
        Self { repository }
    }

    pub async fn get(&self, id: i32) -> Result<Job, DomainError> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("No job: {}", id)))
    }

    pub async fn list(&self, filter: &JobFilter) -> Result<Vec<Job>, DomainError> {
        self.repository.list(filter).await
    }

    pub async fn create(&self, request: CreateJobRequest) -> Result<Job, DomainError> {
        validate_title(&request.title).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_salary(request.salary).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_equity(request.equity).map_err(|e| DomainError::validation(e.to_string()))?;

        let job = self
            .repository
            .create(NewJob {
                title: request.title,
                salary: request.salary,
                equity: request.equity,
                company_handle: request.company_handle,
            })
            .await?;

        info!(id = job.id, company = %job.company_handle, "Created job");
        Ok(job)
    }

    pub async fn update(&self, id: i32, request: UpdateJobRequest) -> Result<Job, DomainError> {
        if let Some(title) = &request.title {
            validate_title(title).map_err(|e| DomainError::validation(e.to_string()))?;
        }
        validate_salary(request.salary.flatten())
            .map_err(|e| DomainError::validation(e.to_string()))?;
        validate_equity(request.equity.flatten())
            .map_err(|e| DomainError::validation(e.to_string()))?;

        let changes = JobChanges {
            title: request.title,
            salary: request.salary,
            equity: request.equity,
        };

        self.repository.update(id, &changes).await
    }

    pub async fn remove(&self, id: i32) -> Result<(), DomainError> {
        if !self.repository.delete(id).await? {
            return Err(DomainError::not_found(format!("No job: {}", id)));
        }

        info!(id, "Deleted job");
        Ok(())
    }
}
