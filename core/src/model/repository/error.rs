use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure of a store call, split by whether the caller may retry it.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Connection could not be acquired or the database is busy
    #[error("database unavailable")]
    Unavailable(#[source] BoxedError),
    #[error("database error")]
    Internal(#[source] BoxedError),
}

impl From<eyre::Report> for StoreError {
    fn from(report: eyre::Report) -> Self {
        if is_unavailable(&report) {
            StoreError::Unavailable(report.into())
        } else {
            StoreError::Internal(report.into())
        }
    }
}

fn is_unavailable(report: &eyre::Report) -> bool {
    report.chain().any(|cause| {
        if cause
            .downcast_ref::<deadpool::managed::PoolError<deadpool_diesel::Error>>()
            .is_some()
            || cause.downcast_ref::<diesel::ConnectionError>().is_some()
        {
            return true;
        }
        match cause.downcast_ref::<DieselError>() {
            Some(DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)) => true,
            Some(DieselError::DatabaseError(_, info)) => {
                // SQLITE_BUSY and SQLITE_LOCKED only surface as messages
                let msg = info.message();
                msg.contains("database is locked") || msg.contains("database table is locked")
            }
            _ => false,
        }
    })
}
