//! Company endpoints; reads are public, writes need an admin token

use axum::{extract::State, http::StatusCode, routing::get, Router};
use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

use crate::api::middleware::RequireAdmin;
use crate::api::state::AppState;
use crate::api::types::{
    check_nullable_url, nullable, ApiError, Json, MessageResponse, Path, Query, ValidatedJson,
};
use crate::domain::company::{Company, CompanyFilter};
use crate::infrastructure::company::{
    CompanyWithJobs, CreateCompanyRequest, UpdateCompanyRequest,
};

/// Create the companies router
pub fn create_companies_router() -> Router<AppState> {
    Router::new()
        .route("/companies", get(list_companies).post(create_company))
        .route(
            "/companies/{handle}",
            get(get_company).patch(update_company).delete(delete_company),
        )
}

/// Query string for GET /companies
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompanySearchQuery {
    pub name: Option<String>,
    pub min_employees: Option<i32>,
    pub max_employees: Option<i32>,
}

impl From<CompanySearchQuery> for CompanyFilter {
    fn from(query: CompanySearchQuery) -> Self {
        Self {
            name: query.name.filter(|n| !n.trim().is_empty()),
            min_employees: query.min_employees,
            max_employees: query.max_employees,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct NewCompanyBody {
    #[validate(length(min = 1, max = 25))]
    pub handle: String,
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    pub description: String,
    #[validate(range(min = 0))]
    pub num_employees: Option<i32>,
    #[validate(url)]
    pub logo_url: Option<String>,
}

/// Partial update payload; the handle cannot change
///
/// An explicit `null` clears `num_employees` or `logo_url`.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
#[validate(schema(function = "validate_update_urls"))]
pub struct UpdateCompanyBody {
    #[validate(length(min = 1, max = 128))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub num_employees: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    pub logo_url: Option<Option<String>>,
}

fn validate_update_urls(body: &UpdateCompanyBody) -> Result<(), validator::ValidationError> {
    check_nullable_url(&body.logo_url, "logo_url")
}

#[derive(Debug, Serialize)]
pub struct CompanyResponse<T> {
    pub company: T,
}

#[derive(Debug, Serialize)]
pub struct CompaniesResponse {
    pub companies: Vec<Company>,
}

/// GET /companies
pub async fn list_companies(
    State(state): State<AppState>,
    Query(query): Query<CompanySearchQuery>,
) -> Result<Json<CompaniesResponse>, ApiError> {
    debug!(?query, "Listing companies");

    let companies = state.company_service.list(&query.into()).await?;

    Ok(Json(CompaniesResponse { companies }))
}

/// GET /companies/{handle}
pub async fn get_company(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<Json<CompanyResponse<CompanyWithJobs>>, ApiError> {
    debug!(handle = %handle, "Getting company");

    let company = state.company_service.get(&handle).await?;

    Ok(Json(CompanyResponse { company }))
}

/// POST /companies
pub async fn create_company(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ValidatedJson(body): ValidatedJson<NewCompanyBody>,
) -> Result<(StatusCode, Json<CompanyResponse<Company>>), ApiError> {
    debug!(handle = %body.handle, admin = %admin.username(), "Creating company");

    let company = state
        .company_service
        .create(CreateCompanyRequest {
            handle: body.handle,
            name: body.name,
            num_employees: body.num_employees,
            description: body.description,
            logo_url: body.logo_url,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(CompanyResponse { company })))
}

/// PATCH /companies/{handle}
pub async fn update_company(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(handle): Path<String>,
    ValidatedJson(body): ValidatedJson<UpdateCompanyBody>,
) -> Result<Json<CompanyResponse<Company>>, ApiError> {
    debug!(handle = %handle, "Updating company");

    let company = state
        .company_service
        .update(
            &handle,
            UpdateCompanyRequest {
                name: body.name,
                num_employees: body.num_employees,
                description: body.description,
                logo_url: body.logo_url,
            },
        )
        .await?;

    Ok(Json(CompanyResponse { company }))
}

/// DELETE /companies/{handle}
pub async fn delete_company(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(handle): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    debug!(handle = %handle, "Deleting company");

    state.company_service.remove(&handle).await?;

    Ok(Json(MessageResponse::new("Company deleted")))
}
