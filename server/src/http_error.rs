use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};
use utoipa::ToSchema;

use memorybox_core::service::CapsuleError;

/// Seconds clients are asked to wait before retrying a 503.
const RETRY_AFTER_SECS: &str = "5";

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("missing or empty principal header")]
    Unauthorized,
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Service(#[from] CapsuleError),
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

impl HttpError {
    pub fn bad_request(err: impl std::fmt::Display) -> Self {
        HttpError::BadRequest(err.to_string())
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            HttpError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            HttpError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            HttpError::Service(err) => match err {
                CapsuleError::Validation(_) => (StatusCode::BAD_REQUEST, err.to_string()),
                CapsuleError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
                CapsuleError::Forbidden(_) => (StatusCode::FORBIDDEN, err.to_string()),
                CapsuleError::Conflict(_) => (StatusCode::CONFLICT, err.to_string()),
                CapsuleError::Unavailable(source) => {
                    warn!(?source, "store unavailable");
                    (StatusCode::SERVICE_UNAVAILABLE, err.to_string())
                }
                CapsuleError::Internal(source) => {
                    error!(?source, "internal error handling request");
                    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
                }
            },
        };
        let mut response = (status, Json(ErrorBody { error: message })).into_response();
        if status == StatusCode::SERVICE_UNAVAILABLE {
            response.headers_mut().insert(
                header::RETRY_AFTER,
                HeaderValue::from_static(RETRY_AFTER_SECS),
            );
        }
        response
    }
}

impl From<eyre::Report> for HttpError {
    fn from(report: eyre::Report) -> Self {
        HttpError::Service(report.into())
    }
}

pub type ApiResult<T> = Result<T, HttpError>;
