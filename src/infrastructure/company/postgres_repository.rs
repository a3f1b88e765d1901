//! PostgreSQL company repository implementation

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};

use crate::domain::company::{Company, CompanyChanges, CompanyFilter, CompanyRepository};
use crate::domain::DomainError;
use crate::infrastructure::storage::{escape_like, is_check_violation, is_unique_violation};

const COMPANY_COLUMNS: &str = "handle, name, num_employees, description, logo_url";

/// PostgreSQL implementation of CompanyRepository
#[derive(Debug, Clone)]
pub struct PostgresCompanyRepository {
    pool: PgPool,
}

impl PostgresCompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn write_error(action: &str, company: &str, e: sqlx::Error) -> DomainError {
    if is_unique_violation(&e) {
        DomainError::conflict(format!("Company '{}' already exists", company))
    } else if is_check_violation(&e) {
        DomainError::validation(format!("Invalid company data for '{}'", company))
    } else {
        DomainError::storage(format!("Failed to {} company: {}", action, e))
    }
}

#[async_trait]
impl CompanyRepository for PostgresCompanyRepository {
    async fn get(&self, handle: &str) -> Result<Option<Company>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM companies WHERE handle = $1",
            COMPANY_COLUMNS
        ))
        .bind(handle)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get company: {}", e)))?;

        row.as_ref().map(row_to_company).transpose()
    }

    async fn create(&self, company: Company) -> Result<Company, DomainError> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO companies (handle, name, num_employees, description, logo_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            COMPANY_COLUMNS
        ))
        .bind(&company.handle)
        .bind(&company.name)
        .bind(company.num_employees)
        .bind(&company.description)
        .bind(&company.logo_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error("create", &company.handle, e))?;

        row_to_company(&row)
    }

    async fn update(
        &self,
        handle: &str,
        changes: &CompanyChanges,
    ) -> Result<Company, DomainError> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE companies
            SET name = COALESCE($2, name),
                num_employees = CASE WHEN $3 THEN $4 ELSE num_employees END,
                description = COALESCE($5, description),
                logo_url = CASE WHEN $6 THEN $7 ELSE logo_url END
            WHERE handle = $1
            RETURNING {}
            "#,
            COMPANY_COLUMNS
        ))
        .bind(handle)
        .bind(&changes.name)
        .bind(changes.num_employees.is_some())
        .bind(changes.num_employees.flatten())
        .bind(&changes.description)
        .bind(changes.logo_url.is_some())
        .bind(changes.logo_url.clone().flatten())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_error("update", handle, e))?;

        match row {
            Some(row) => row_to_company(&row),
            None => Err(DomainError::not_found(format!(
                "Company '{}' not found",
                handle
            ))),
        }
    }

    async fn delete(&self, handle: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM companies WHERE handle = $1")
            .bind(handle)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete company: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, filter: &CompanyFilter) -> Result<Vec<Company>, DomainError> {
        let mut query = build_list_query(filter);

        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list companies: {}", e)))?;

        rows.iter().map(row_to_company).collect()
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM companies")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count companies: {}", e)))?;

        Ok(count as usize)
    }
}

fn build_list_query(filter: &CompanyFilter) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(format!("SELECT {} FROM companies", COMPANY_COLUMNS));
    let mut keyword = " WHERE ";

    if let Some(name) = &filter.name {
        query
            .push(keyword)
            .push("name ILIKE ")
            .push_bind(format!("%{}%", escape_like(name)));
        keyword = " AND ";
    }

    if let Some(min) = filter.min_employees {
        query
            .push(keyword)
            .push("num_employees >= ")
            .push_bind(min);
        keyword = " AND ";
    }

    if let Some(max) = filter.max_employees {
        query
            .push(keyword)
            .push("num_employees <= ")
            .push_bind(max);
    }

    query.push(" ORDER BY name");
    query
}

fn row_to_company(row: &PgRow) -> Result<Company, DomainError> {
    let storage_err =
        |e: sqlx::Error| DomainError::storage(format!("Invalid company row in database: {}", e));

    Ok(Company {
        handle: row.try_get("handle").map_err(storage_err)?,
        name: row.try_get("name").map_err(storage_err)?,
        num_employees: row.try_get("num_employees").map_err(storage_err)?,
        description: row.try_get("description").map_err(storage_err)?,
        logo_url: row.try_get("logo_url").map_err(storage_err)?,
    })
}
