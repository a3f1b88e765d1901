//! PostgreSQL job repository implementation

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};

use crate::domain::job::{Job, JobChanges, JobFilter, JobRepository, NewJob};
use crate::domain::DomainError;
use crate::infrastructure::storage::{escape_like, is_check_violation, is_foreign_key_violation};

const JOB_COLUMNS: &str = "id, title, salary, equity, company_handle";

/// PostgreSQL implementation of JobRepository
#[derive(Debug, Clone)]
pub struct PostgresJobRepository {
    pool: PgPool,
}

impl PostgresJobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobRepository for PostgresJobRepository {
    async fn get(&self, id: i32) -> Result<Option<Job>, DomainError> {
        let row = sqlx::query(&format!("SELECT {} FROM jobs WHERE id = $1", JOB_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get job: {}", e)))?;

        row.as_ref().map(row_to_job).transpose()
    }

    async fn create(&self, job: NewJob) -> Result<Job, DomainError> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO jobs (title, salary, equity, company_handle)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            JOB_COLUMNS
        ))
        .bind(&job.title)
        .bind(job.salary)
        .bind(job.equity)
        .bind(&job.company_handle)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                DomainError::validation(format!("No company: {}", job.company_handle))
            } else if is_check_violation(&e) {
                DomainError::validation("Invalid job data")
            } else {
                DomainError::storage(format!("Failed to create job: {}", e))
            }
        })?;

        row_to_job(&row)
    }

    async fn update(&self, id: i32, changes: &JobChanges) -> Result<Job, DomainError> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE jobs
            SET title = COALESCE($2, title),
                salary = CASE WHEN $3 THEN $4 ELSE salary END,
                equity = CASE WHEN $5 THEN $6 ELSE equity END
            WHERE id = $1
            RETURNING {}
            "#,
            JOB_COLUMNS
        ))
        .bind(id)
        .bind(&changes.title)
        .bind(changes.salary.is_some())
        .bind(changes.salary.flatten())
        .bind(changes.equity.is_some())
        .bind(changes.equity.flatten())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if is_check_violation(&e) {
                DomainError::validation("Invalid job data")
            } else {
                DomainError::storage(format!("Failed to update job: {}", e))
            }
        })?;

        match row {
            Some(row) => row_to_job(&row),
            None => Err(DomainError::not_found(format!("No job: {}", id))),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete job: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, filter: &JobFilter) -> Result<Vec<Job>, DomainError> {
        let mut query = build_list_query(filter);

        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list jobs: {}", e)))?;

        rows.iter().map(row_to_job).collect()
    }
}

fn build_list_query(filter: &JobFilter) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(format!("SELECT {} FROM jobs", JOB_COLUMNS));
    let mut keyword = " WHERE ";

    if let Some(title) = &filter.title {
        query
            .push(keyword)
            .push("title ILIKE ")
            .push_bind(format!("%{}%", escape_like(title)));
        keyword = " AND ";
    }

    if let Some(min) = filter.min_salary {
        query.push(keyword).push("salary >= ").push_bind(min);
        keyword = " AND ";
    }

    if filter.has_equity {
        query.push(keyword).push("equity > 0");
        keyword = " AND ";
    }

    if let Some(handle) = &filter.company_handle {
        query
            .push(keyword)
            .push("company_handle = ")
            .push_bind(handle.clone());
    }

    query.push(" ORDER BY title, id");
    query
}

fn row_to_job(row: &PgRow) -> Result<Job, DomainError> {
    let storage_err =
        |e: sqlx::Error| DomainError::storage(format!("Invalid job row in database: {}", e));

    Ok(Job {
        id: row.try_get("id").map_err(storage_err)?,
        title: row.try_get("title").map_err(storage_err)?,
        salary: row.try_get("salary").map_err(storage_err)?,
        equity: row.try_get("equity").map_err(storage_err)?,
        company_handle: row.try_get("company_handle").map_err(storage_err)?,
    })
}
