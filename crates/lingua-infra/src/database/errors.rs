//! Mapping from SeaORM errors to repository errors.

use sea_orm::{DbErr, SqlErr};

use lingua_core::error::RepoError;

/// Translate a database error, turning unique and foreign-key violations
/// into `RepoError::Constraint`.
pub(crate) fn map_db_err(err: DbErr) -> RepoError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => {
            tracing::debug!(error = %msg, "Unique constraint violated");
            RepoError::Constraint(format!("Unique constraint violated: {msg}"))
        }
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
            tracing::debug!(error = %msg, "Foreign key constraint violated");
            RepoError::Constraint(format!("Referenced record does not exist: {msg}"))
        }
        _ => match err {
            // The row was removed between the read and the write.
            DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => RepoError::NotFound,
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(err.to_string()),
            _ => RepoError::Query(err.to_string()),
        },
    }
}
