use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use crate::validation::ValidationError;

pub const MISSING_DATES_MESSAGE: &str =
    "Check-in date (dtstart) and check-out date (dtend) are required";

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg).into_response(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(value: ValidationError) -> Self {
        match value {
            ValidationError::MissingRequiredField(_) => {
                warn!("Rejected request: {value}");
                ApiError::BadRequest(MISSING_DATES_MESSAGE.into())
            }
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(value: QueryRejection) -> Self {
        warn!("Rejected query string: {value}");
        ApiError::BadRequest(value.body_text())
    }
}
