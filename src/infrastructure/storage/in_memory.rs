//! In-memory tables shared by the company and job repositories
//!
//! Jobs reference companies, so both repositories share one set of tables
//! to enforce the foreign key and cascade deletes the way PostgreSQL does.
//! Lock order is always `companies` before `jobs`.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::{Company, Job};

/// Process-local stand-in for the `companies` and `jobs` tables
#[derive(Debug)]
pub struct InMemoryTables {
    pub(crate) companies: RwLock<BTreeMap<String, Company>>,
    pub(crate) jobs: RwLock<BTreeMap<i32, Job>>,
    job_sequence: AtomicI32,
}

impl InMemoryTables {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            companies: RwLock::new(BTreeMap::new()),
            jobs: RwLock::new(BTreeMap::new()),
            job_sequence: AtomicI32::new(1),
        })
    }

    /// Next value of the job id sequence, like a SERIAL column
    pub(crate) fn next_job_id(&self) -> i32 {
        self.job_sequence.fetch_add(1, Ordering::SeqCst)
    }
}
