//! Storage failures raised by repositories.

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Record not found")]
    NotFound,

    /// A unique constraint rejected the write
    #[error("Duplicate value: {0}")]
    Conflict(String),

    #[error(transparent)]
    Database(DbErr),
}

impl From<DbErr> for StorageError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => StorageError::Conflict(detail),
            _ => match err {
                DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => StorageError::NotFound,
                other => StorageError::Database(other),
            },
        }
    }
}

pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_not_found_maps_to_not_found() {
        let err = StorageError::from(DbErr::RecordNotFound("users".into()));
        assert!(matches!(err, StorageError::NotFound));
    }

    #[test]
    fn test_other_errors_are_kept() {
        let err = StorageError::from(DbErr::Custom("disk full".into()));
        assert!(matches!(err, StorageError::Database(DbErr::Custom(_))));
    }
}
