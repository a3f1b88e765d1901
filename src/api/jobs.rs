//! Job endpoints; reads are public, writes need an admin token

use axum::{extract::State, http::StatusCode, routing::get, Router};
use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

use crate::api::middleware::RequireAdmin;
use crate::api::state::AppState;
use crate::api::types::{
    nullable, ApiError, Json, MessageResponse, Path, Query, ValidatedJson,
};
use crate::domain::job::{Job, JobFilter};
use crate::infrastructure::job::{CreateJobRequest, UpdateJobRequest};

/// Create the jobs router
pub fn create_jobs_router() -> Router<AppState> {
    Router::new()
        .route("/jobs", get(list_jobs).post(create_job))
        .route("/jobs/{id}", get(get_job).patch(update_job).delete(delete_job))
}

/// Query string for GET /jobs
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobSearchQuery {
    pub title: Option<String>,
    pub min_salary: Option<i32>,
    pub has_equity: Option<bool>,
}

impl From<JobSearchQuery> for JobFilter {
    fn from(query: JobSearchQuery) -> Self {
        Self {
            title: query.title.filter(|t| !t.trim().is_empty()),
            min_salary: query.min_salary,
            has_equity: query.has_equity.unwrap_or(false),
            company_handle: None,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct NewJobBody {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(range(min = 0))]
    pub salary: Option<i32>,
    #[validate(range(min = 0.0, max = 1.0))]
    pub equity: Option<f64>,
    #[validate(length(min = 1, max = 25))]
    pub company_handle: String,
}

/// Partial update payload; the company cannot change
///
/// An explicit `null` clears `salary` or `equity`; their ranges are checked
/// by the job service.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateJobBody {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub salary: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    pub equity: Option<Option<f64>>,
}

#[derive(Debug, Serialize)]
pub struct JobResponse {
    pub job: Job,
}

#[derive(Debug, Serialize)]
pub struct JobsResponse {
    pub jobs: Vec<Job>,
}

/// GET /jobs
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobSearchQuery>,
) -> Result<Json<JobsResponse>, ApiError> {
    debug!(?query, "Listing jobs");

    let jobs = state.job_service.list(&query.into()).await?;

    Ok(Json(JobsResponse { jobs }))
}

/// GET /jobs/{id}
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<JobResponse>, ApiError> {
    debug!(id, "Getting job");

    let job = state.job_service.get(id).await?;

    Ok(Json(JobResponse { job }))
}

/// POST /jobs
pub async fn create_job(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ValidatedJson(body): ValidatedJson<NewJobBody>,
) -> Result<(StatusCode, Json<JobResponse>), ApiError> {
    debug!(company = %body.company_handle, admin = %admin.username(), "Creating job");

    let job = state
        .job_service
        .create(CreateJobRequest {
            title: body.title,
            salary: body.salary,
            equity: body.equity,
            company_handle: body.company_handle,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(JobResponse { job })))
}

/// PATCH /jobs/{id}
pub async fn update_job(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<i32>,
    ValidatedJson(body): ValidatedJson<UpdateJobBody>,
) -> Result<Json<JobResponse>, ApiError> {
    debug!(id, "Updating job");

    let job = state
        .job_service
        .update(
            id,
            UpdateJobRequest {
                title: body.title,
                salary: body.salary,
                equity: body.equity,
            },
        )
        .await?;

    Ok(Json(JobResponse { job }))
}

/// DELETE /jobs/{id}
pub async fn delete_job(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    debug!(id, "Deleting job");

    state.job_service.remove(id).await?;

    Ok(Json(MessageResponse::new("Job deleted")))
}
