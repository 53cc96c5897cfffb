use chrono::NaiveDate;
use sqlx::error::ErrorKind;
use thiserror::Error;

/// Failures surfaced by the job store. A missing row is not an error; lookups
/// return `None` instead.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no connection to the database: {0}")]
    NotConnected(#[source] sqlx::Error),

    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("query failed: {0}")]
    Query(#[source] sqlx::Error),

    #[error("job {id} has a malformed stored value: {reason}")]
    MalformedRow { id: i64, reason: String },

    #[error("after date {after} is later than before date {before}")]
    InvalidRange { after: NaiveDate, before: NaiveDate },
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) => match db_err.kind() {
                ErrorKind::UniqueViolation
                | ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => {
                    StoreError::ConstraintViolation(db_err.message().to_string())
                }
                _ => StoreError::Query(err),
            },
            sqlx::Error::Configuration(_)
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => StoreError::NotConnected(err),
            _ => StoreError::Query(err),
        }
    }
}
