use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use crate::services::error::ServiceError;

pub enum APIResponse {
    OK,
    NotFound(String),
}

impl IntoResponse for APIResponse {
    fn into_response(self) -> Response {
        match self {
            Self::OK => (
                StatusCode::OK,
                Json(serde_json::json!({"status": "ok"})),
            )
                .into_response(),
            Self::NotFound(msg) => error_body(StatusCode::NOT_FOUND, msg),
        }
    }
}

#[derive(Debug)]
pub enum APIError {
    BadRequest(String),
    UnAuthorized,
    NotFound(String),
    Conflict(String),
    InternalServerError(String),
}

impl IntoResponse for APIError {
    fn into_response(self) -> Response {
        match self {
            Self::BadRequest(msg) => error_body(StatusCode::BAD_REQUEST, msg),
            Self::UnAuthorized => error_body(StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            Self::NotFound(msg) => error_body(StatusCode::NOT_FOUND, msg),
            Self::Conflict(msg) => error_body(StatusCode::CONFLICT, msg),
            Self::InternalServerError(msg) => {
                error_body(StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        }
    }
}

impl From<ServiceError> for APIError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(msg) => Self::NotFound(msg),
            ServiceError::Conflict(msg) => Self::Conflict(msg),
            ServiceError::Validation(msg) => Self::BadRequest(msg),
            ServiceError::Database(e) => {
                error!("Database error: {}", e);
                Self::InternalServerError("Database error".to_string())
            }
            ServiceError::Diagram(e) => {
                error!("Failed to read floor diagram: {}", e);
                Self::InternalServerError("Failed to read floor diagram".to_string())
            }
        }
    }
}

fn error_body(status: StatusCode, msg: String) -> Response {
    (
        status,
        Json(serde_json::json!({"status": "error", "details": msg})),
    )
        .into_response()
}
