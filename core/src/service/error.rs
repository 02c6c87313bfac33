use thiserror::Error;

use crate::model::repository::StoreError;

/// Errors callers of the services have to handle. Everything except
/// `Unavailable` and `Internal` is caused by the request itself.
#[derive(Error, Debug)]
pub enum CapsuleError {
    #[error("invalid request: {0}")]
    Validation(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("forbidden: {0}")]
    Forbidden(String),
    /// A concurrent action on the same record won
    #[error("conflict: {0}")]
    Conflict(String),
    /// Retrying later may succeed
    #[error("service temporarily unavailable")]
    Unavailable(#[source] StoreError),
    #[error("internal error")]
    Internal(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl CapsuleError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        CapsuleError::Validation(msg.into())
    }

    pub(crate) fn forbidden(msg: impl Into<String>) -> Self {
        CapsuleError::Forbidden(msg.into())
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, CapsuleError::Unavailable(_))
    }
}

impl From<StoreError> for CapsuleError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(_) => CapsuleError::Unavailable(err),
            StoreError::Internal(_) => CapsuleError::Internal(Box::new(err)),
        }
    }
}

impl From<eyre::Report> for CapsuleError {
    fn from(report: eyre::Report) -> Self {
        CapsuleError::Internal(report.into())
    }
}

impl From<tokio::task::JoinError> for CapsuleError {
    fn from(err: tokio::task::JoinError) -> Self {
        CapsuleError::Internal(Box::new(err))
    }
}

pub type CapsuleResult<T> = Result<T, CapsuleError>;
