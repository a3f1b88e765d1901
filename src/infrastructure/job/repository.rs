//! In-memory job repository implementation

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::job::{Job, JobChanges, JobFilter, JobRepository, NewJob};
use crate::domain::DomainError;
use crate::infrastructure::storage::InMemoryTables;

/// In-memory implementation of JobRepository
#[derive(Debug, Clone)]
pub struct InMemoryJobRepository {
    tables: Arc<InMemoryTables>,
}

impl InMemoryJobRepository {
    pub fn new(tables: Arc<InMemoryTables>) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl JobRepository for InMemoryJobRepository {
    async fn get(&self, id: i32) -> Result<Option<Job>, DomainError> {
        Ok(self.tables.jobs.read().await.get(&id).cloned())
    }

    async fn create(&self, job: NewJob) -> Result<Job, DomainError> {
        // Held until the insert so the company cannot be deleted in between
        let companies = self.tables.companies.read().await;

        if !companies.contains_key(&job.company_handle) {
            return Err(DomainError::validation(format!(
                "No company: {}",
                job.company_handle
            )));
        }

        let mut jobs = self.tables.jobs.write().await;
        let job = job.into_job(self.tables.next_job_id());
        jobs.insert(job.id, job.clone());

        Ok(job)
    }

    async fn update(&self, id: i32, changes: &JobChanges) -> Result<Job, DomainError> {
        let mut jobs = self.tables.jobs.write().await;

        let job = jobs
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found(format!("No job: {}", id)))?;

        job.apply(changes);

        Ok(job.clone())
    }

    async fn delete(&self, id: i32) -> Result<bool, DomainError> {
        Ok(self.tables.jobs.write().await.remove(&id).is_some())
    }

    async fn list(&self, filter: &JobFilter) -> Result<Vec<Job>, DomainError> {
        let jobs = self.tables.jobs.read().await;

        let mut result: Vec<Job> = jobs.values().filter(|j| filter.matches(j)).cloned().collect();
        result.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Company;

    async fn setup() -> InMemoryJobRepository {
        let tables = InMemoryTables::new();
        tables
            .companies
            .write()
            .await
            .insert("c1".to_string(), Company::new("c1", "C1", "Desc"));
        InMemoryJobRepository::new(tables)
    }

    fn new_job(title: &str, salary: Option<i32>, equity: Option<f64>) -> NewJob {
        NewJob {
            title: title.to_string(),
            salary,
            equity,
            company_handle: "c1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_ids() {
        let repo = setup().await;

        let first = repo.create(new_job("J1", Some(1), None)).await.unwrap();
        let second = repo.create(new_job("J2", Some(2), None)).await.unwrap();

        assert!(second.id > first.id);
        assert_eq!(repo.get(first.id).await.unwrap().unwrap().title, "J1");
    }

    #[tokio::test]
    async fn test_create_unknown_company() {
        let repo = setup().await;

        let mut job = new_job("J1", None, None);
        job.company_handle = "nope".to_string();

        let result = repo.create(job).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
        assert!(repo.list(&JobFilter::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let repo = setup().await;
        let job = repo.create(new_job("J1", Some(1), None)).await.unwrap();

        let changes = JobChanges {
            salary: Some(Some(500)),
            ..Default::default()
        };
        let updated = repo.update(job.id, &changes).await.unwrap();
        assert_eq!(updated.salary, Some(500));
        assert_eq!(updated.title, "J1");

        assert!(repo.delete(job.id).await.unwrap());
        assert!(!repo.delete(job.id).await.unwrap());

        let missing = repo.update(job.id, &changes).await;
        assert!(matches!(missing, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_list_ordered_and_filtered() {
        let repo = setup().await;
        repo.create(new_job("J3", Some(3), None)).await.unwrap();
        repo.create(new_job("J1", Some(1), Some(0.1))).await.unwrap();
        repo.create(new_job("J2", Some(2), Some(0.0))).await.unwrap();

        let all = repo.list(&JobFilter::default()).await.unwrap();
        let titles: Vec<&str> = all.iter().map(|j| j.title.as_str()).collect();
        assert_eq!(titles, vec!["J1", "J2", "J3"]);

        let with_equity = JobFilter {
            has_equity: true,
            ..Default::default()
        };
        let found = repo.list(&with_equity).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "J1");
    }
}
