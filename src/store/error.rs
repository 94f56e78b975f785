//! Store Error Types
//!
//! Every failure coming out of the record store, the transaction coordinator
//! or the transfer orchestrator is one of these variants.

use std::time::Duration;

use thiserror::Error;

/// PostgreSQL SQLSTATE for `numeric_value_out_of_range` (BIGINT overflow).
const PG_NUMERIC_OUT_OF_RANGE: &str = "22003";

/// Store error types
#[derive(Error, Debug)]
pub enum StoreError {
    /// Bad input caught before any storage access
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Referenced row is absent
    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: i64 },

    /// Foreign key / check / overflow rejected by the storage engine
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Begin / commit / rollback failure
    #[error("Transaction error: {0}")]
    Transaction(#[from] TxError),

    /// Any other driver or engine failure
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),
}

/// Transaction lifecycle failures
#[derive(Error, Debug)]
pub enum TxError {
    #[error("failed to begin transaction: {0}")]
    Begin(#[source] sqlx::Error),

    #[error("failed to commit transaction: {0}")]
    Commit(#[source] sqlx::Error),

    /// The unit of work failed and the rollback failed too; both are kept.
    #[error("tx err: {work}, rb err: {rollback}")]
    Rollback {
        work: Box<StoreError>,
        #[source]
        rollback: sqlx::Error,
    },

    #[error("unit of work timed out after {0:?}")]
    TimedOut(Duration),
}

impl StoreError {
    /// Shorthand used by `get_*` lookups that came back empty
    pub fn not_found(resource: &'static str, id: i64) -> Self {
        StoreError::NotFound { resource, id }
    }

    /// Get the error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::InvalidArgument(_) => "INVALID_ARGUMENT",
            StoreError::NotFound { .. } => "NOT_FOUND",
            StoreError::ConstraintViolation(_) => "CONSTRAINT_VIOLATION",
            StoreError::Transaction(_) => "TRANSACTION_ERROR",
            StoreError::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Get HTTP status code suggestion
    pub fn http_status(&self) -> u16 {
        match self {
            StoreError::InvalidArgument(_) => 400,
            StoreError::NotFound { .. } => 404,
            StoreError::ConstraintViolation(_) => 422,
            StoreError::Transaction(TxError::TimedOut(_)) => 503,
            StoreError::Transaction(_) | StoreError::Database(_) => 500,
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, StoreError::InvalidArgument(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, StoreError::ConstraintViolation(_))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            if is_constraint_error(db_err.kind(), db_err.code().as_deref()) {
                return StoreError::ConstraintViolation(db_err.message().to_string());
            }
        }
        StoreError::Database(e)
    }
}

/// Classify an engine error by kind and SQLSTATE.
fn is_constraint_error(kind: sqlx::error::ErrorKind, code: Option<&str>) -> bool {
    use sqlx::error::ErrorKind;

    match kind {
        ErrorKind::ForeignKeyViolation
        | ErrorKind::CheckViolation
        | ErrorKind::UniqueViolation
        | ErrorKind::NotNullViolation => true,
        _ => code == Some(PG_NUMERIC_OUT_OF_RANGE),
    }
}
