//! JSON error responses
//!
//! Every failure leaves the API as
//! `{"error": {"message": "...", "type": "...", "status": N}}`.

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorType {
    BadRequest,
    Unauthorized,
    NotFound,
    Conflict,
    InternalError,
}

impl ApiErrorType {
    fn status(self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: ApiErrorType,
    pub status: u16,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    body: ApiErrorBody,
}

impl ApiError {
    fn of(kind: ApiErrorType, message: impl Into<String>) -> Self {
        let status = kind.status();

        Self {
            status,
            body: ApiErrorBody {
                message: message.into(),
                kind,
                status: status.as_u16(),
            },
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::of(ApiErrorType::BadRequest, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::of(ApiErrorType::Unauthorized, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::of(ApiErrorType::NotFound, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::of(ApiErrorType::Conflict, message)
    }

    pub fn message(&self) -> &str {
        &self.body.message
    }

    pub fn kind(&self) -> ApiErrorType {
        self.body.kind
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status.as_u16(), self.body.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorResponse { error: self.body };
        (self.status, Json(body)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { message } => Self::not_found(message),
            DomainError::Validation { message } => Self::bad_request(message),
            DomainError::Conflict { message } => Self::conflict(message),
            DomainError::Unauthorized { message } => Self::unauthorized(message),
            DomainError::Storage { .. }
            | DomainError::Configuration { .. }
            | DomainError::Internal { .. } => {
                error!(error = %err, "Unhandled server error");
                Self::of(ApiErrorType::InternalError, "Internal server error")
            }
        }
    }
}
