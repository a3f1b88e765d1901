//! Shared API types: errors, extractors and response envelopes

pub mod error;
pub mod json;
pub mod response;

pub use error::{ApiError, ApiErrorResponse, ApiErrorType};
pub use json::{check_nullable_url, nullable, Json, Path, Query, ValidatedJson};
pub use response::MessageResponse;
