//! In-memory company repository implementation

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::company::{Company, CompanyChanges, CompanyFilter, CompanyRepository};
use crate::domain::DomainError;
use crate::infrastructure::storage::InMemoryTables;

/// In-memory implementation of CompanyRepository
#[derive(Debug, Clone)]
pub struct InMemoryCompanyRepository {
    tables: Arc<InMemoryTables>,
}

impl InMemoryCompanyRepository {
    pub fn new(tables: Arc<InMemoryTables>) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl CompanyRepository for InMemoryCompanyRepository {
    async fn get(&self, handle: &str) -> Result<Option<Company>, DomainError> {
        Ok(self.tables.companies.read().await.get(handle).cloned())
    }

    async fn create(&self, company: Company) -> Result<Company, DomainError> {
        let mut companies = self.tables.companies.write().await;

        if companies.contains_key(&company.handle) {
            return Err(DomainError::conflict(format!(
                "Company '{}' already exists",
                company.handle
            )));
        }

        if companies.values().any(|c| c.name == company.name) {
            return Err(DomainError::conflict(format!(
                "Company name '{}' already exists",
                company.name
            )));
        }

        companies.insert(company.handle.clone(), company.clone());

        Ok(company)
    }

    async fn update(
        &self,
        handle: &str,
        changes: &CompanyChanges,
    ) -> Result<Company, DomainError> {
        let mut companies = self.tables.companies.write().await;

        if let Some(name) = &changes.name {
            if companies.values().any(|c| &c.name == name && c.handle != handle) {
                return Err(DomainError::conflict(format!(
                    "Company name '{}' already exists",
                    name
                )));
            }
        }

        let company = companies
            .get_mut(handle)
            .ok_or_else(|| DomainError::not_found(format!("Company '{}' not found", handle)))?;

        company.apply(changes);

        Ok(company.clone())
    }

    async fn delete(&self, handle: &str) -> Result<bool, DomainError> {
        let mut companies = self.tables.companies.write().await;

        if companies.remove(handle).is_none() {
            return Ok(false);
        }

        // ON DELETE CASCADE
        let mut jobs = self.tables.jobs.write().await;
        jobs.retain(|_, job| job.company_handle != handle);

        Ok(true)
    }

    async fn list(&self, filter: &CompanyFilter) -> Result<Vec<Company>, DomainError> {
        let companies = self.tables.companies.read().await;

        let mut result: Vec<Company> = companies
            .values()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect();

        result.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(result)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.tables.companies.read().await.len())
    }
}
