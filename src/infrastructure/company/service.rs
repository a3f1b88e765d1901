//! Company service

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::domain::company::{
    validate_company_name, validate_handle, validate_num_employees, Company, CompanyChanges,
    CompanyFilter, CompanyRepository,
};
use crate::domain::job::{Job, JobFilter, JobRepository};
use crate::domain::DomainError;

/// Request for creating a new company
#[derive(Debug, Clone)]
pub struct CreateCompanyRequest {
    pub handle: String,
    pub name: String,
    pub num_employees: Option<i32>,
    pub description: String,
    pub logo_url: Option<String>,
}

/// Request for updating a company; absent fields are left as they are
#[derive(Debug, Clone, Default)]
pub struct UpdateCompanyRequest {
    pub name: Option<String>,
    /// `Some(None)` clears the value; likewise for `logo_url`
    pub num_employees: Option<Option<i32>>,
    pub description: Option<String>,
    pub logo_url: Option<Option<String>>,
}

/// A company together with its job postings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyWithJobs {
    #[serde(flatten)]
    pub company: Company,
    pub jobs: Vec<Job>,
}

#[derive(Debug)]
pub struct CompanyService<C: CompanyRepository, J: JobRepository> {
    companies: Arc<C>,
    jobs: Arc<J>,
}

impl<C: CompanyRepository, J: JobRepository> CompanyService<C, J> {
    pub fn new(companies: Arc<C>, jobs: Arc<J>) -> Self {
        Self { companies, jobs }
    }

    /// Get a company with its jobs
    pub async fn get(&self, handle: &str) -> Result<CompanyWithJobs, DomainError> {
        let company = self
            .companies
            .get(handle)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("No company: {}", handle)))?;

        let jobs = self.jobs.list(&JobFilter::for_company(handle)).await?;

        Ok(CompanyWithJobs { company, jobs })
    }

    /// List companies, optionally filtered
    pub async fn list(&self, filter: &CompanyFilter) -> Result<Vec<Company>, DomainError> {
        if let (Some(min), Some(max)) = (filter.min_employees, filter.max_employees) {
            if min > max {
                return Err(DomainError::validation(
                    "min_employees cannot be greater than max_employees",
                ));
            }
        }

        self.companies.list(filter).await
    }

    pub async fn count(&self) -> Result<usize, DomainError> {
        self.companies.count().await
    }

    pub async fn create(&self, request: CreateCompanyRequest) -> Result<Company, DomainError> {
        validate_handle(&request.handle).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_company_name(&request.name).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_num_employees(request.num_employees)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        let company = Company::new(request.handle, request.name, request.description)
            .with_num_employees(request.num_employees)
            .with_logo_url(request.logo_url);

        let company = self.companies.create(company).await?;
        info!(handle = %company.handle, "Created company");

        Ok(company)
    }

    pub async fn update(
        &self,
        handle: &str,
        request: UpdateCompanyRequest,
    ) -> Result<Company, DomainError> {
        if let Some(name) = &request.name {
            validate_company_name(name).map_err(|e| DomainError::validation(e.to_string()))?;
        }
        validate_num_employees(request.num_employees.flatten())
            .map_err(|e| DomainError::validation(e.to_string()))?;

        let changes = CompanyChanges {
            name: request.name,
            num_employees: request.num_employees,
            description: request.description,
            logo_url: request.logo_url,
        };

        self.companies.update(handle, &changes).await
    }

    /// Delete a company and its jobs
    pub async fn remove(&self, handle: &str) -> Result<(), DomainError> {
        if !self.companies.delete(handle).await? {
            return Err(DomainError::not_found(format!("No company: {}", handle)));
        }

        info!(handle = %handle, "Deleted company");
        Ok(())
    }
}
