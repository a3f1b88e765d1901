//! Liveness and readiness checks

use std::future::Future;
use std::time::Instant;

use axum::{extract::State, http::StatusCode};
use serde::Serialize;
use tracing::warn;

use crate::api::types::Json;
use crate::domain::DomainError;

use super::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub checks: Vec<StoreCheck>,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Outcome of one store check; failures carry no driver detail
#[derive(Debug, Serialize)]
pub struct StoreCheck {
    pub store: &'static str,
    pub status: HealthStatus,
    pub latency_ms: u64,
}

async fn check_store<T>(
    store: &'static str,
    check: impl Future<Output = Result<T, DomainError>>,
) -> StoreCheck {
    let start = Instant::now();
    let result = check.await;
    let latency_ms = start.elapsed().as_millis() as u64;

    let status = match result {
        Ok(_) => HealthStatus::Healthy,
        Err(e) => {
            warn!(store, error = %e, "Readiness check failed");
            HealthStatus::Unhealthy
        }
    };

    StoreCheck {
        store,
        status,
        latency_ms,
    }
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION"),
        checks: Vec::new(),
    })
}

/// GET /ready; 503 unless both stores answer
pub async fn ready_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let checks = vec![
        check_store("users", state.user_service.count()).await,
        check_store("companies", state.company_service.count()).await,
    ];

    let ready = checks.iter().all(|c| c.status == HealthStatus::Healthy);
    let (code, status) = if ready {
        (StatusCode::OK, HealthStatus::Healthy)
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, HealthStatus::Unhealthy)
    };

    (
        code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            checks,
        }),
    )
}

/// GET /live
pub async fn live_check() -> StatusCode {
    StatusCode::OK
}
