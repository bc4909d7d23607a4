use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// Handler error, rendered as `{ "error": "<message>" }`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No product answers to this id; carries the id as the client wrote it.
    #[error("El producto con el id {0} no se ha encontrado")]
    ProductNotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::ProductNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Service(ServiceError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Service(e) if e.is_rejection() => StatusCode::BAD_REQUEST,
            ApiError::Service(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let msg = match self {
            ApiError::Service(ServiceError::NotFound(id)) => {
                ApiError::ProductNotFound(id.to_string()).to_string()
            }
            other => other.to_string(),
        };
        if status.is_server_error() {
            error!(error = %msg, "request failed");
        }
        (status, Json(ErrorBody::new(msg))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
