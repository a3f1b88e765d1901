//! Job entity and related types

use serde::{Deserialize, Serialize};

/// A job posting, owned by a company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    /// Fraction of the company offered, 0.0 to 1.0
    pub equity: Option<f64>,
    pub company_handle: String,
}

/// A job that has not been stored yet; the store assigns the id
#[derive(Debug, Clone, PartialEq)]
pub struct NewJob {
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<f64>,
    pub company_handle: String,
}

impl NewJob {
    pub fn into_job(self, id: i32) -> Job {
        Job {
            id,
            title: self.title,
            salary: self.salary,
            equity: self.equity,
            company_handle: self.company_handle,
        }
    }
}

/// Partial update of a job; the owning company cannot change
///
/// `Some(None)` clears salary or equity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobChanges {
    pub title: Option<String>,
    pub salary: Option<Option<i32>>,
    pub equity: Option<Option<f64>>,
}

impl Job {
    pub fn apply(&mut self, changes: &JobChanges) {
        if let Some(title) = &changes.title {
            self.title = title.clone();
        }
        if let Some(salary) = changes.salary {
            self.salary = salary;
        }
        if let Some(equity) = changes.equity {
            self.equity = equity;
        }
    }
}

/// Filter for listing jobs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobFilter {
    /// Case-insensitive substring match on the title
    pub title: Option<String>,
    pub min_salary: Option<i32>,
    /// Only jobs with non-zero equity
    pub has_equity: bool,
    pub company_handle: Option<String>,
}

impl JobFilter {
    pub fn for_company(handle: impl Into<String>) -> Self {
        Self {
            company_handle: Some(handle.into()),
            ..Default::default()
        }
    }

    pub fn matches(&self, job: &Job) -> bool {
        if let Some(title) = &self.title {
            if !job.title.to_lowercase().contains(&title.to_lowercase()) {
                return false;
            }
        }

        if let Some(min) = self.min_salary {
            if job.salary.is_none_or(|salary| salary < min) {
                return false;
            }
        }

        if self.has_equity && job.equity.is_none_or(|equity| equity <= 0.0) {
            return false;
        }

        if let Some(handle) = &self.company_handle {
            if &job.company_handle != handle {
                return false;
            }
        }

        true
    }
}
