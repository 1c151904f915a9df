// src/infrastructure/repositories/sqlite/error.rs

use diesel::r2d2::PoolError;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

use crate::domain::error::DomainError;

#[derive(Error, Debug)]
pub enum SqliteRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DieselError),

    #[error("Connection pool error: {0}")]
    ConnectionPoolError(String),

    #[error("Link not found with ID: {0}")]
    LinkNotFound(String),

    #[error("Failed to convert entity: {0}")]
    ConversionError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Migration error: {0}")]
    MigrationError(String),

    #[error("Database task failed: {0}")]
    TaskFailed(String),
}

pub type SqliteResult<T> = Result<T, SqliteRepositoryError>;

impl From<PoolError> for SqliteRepositoryError {
    fn from(err: PoolError) -> Self {
        SqliteRepositoryError::ConnectionPoolError(err.to_string())
    }
}

impl From<SqliteRepositoryError> for DomainError {
    fn from(err: SqliteRepositoryError) -> Self {
        match err {
            SqliteRepositoryError::LinkNotFound(id) => DomainError::LinkNotFound(id),
            SqliteRepositoryError::DatabaseError(diesel_err) => match diesel_err {
                DieselError::NotFound => DomainError::LinkNotFound("Resource not found".to_string()),
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                    DomainError::RepositoryError(format!(
                        "Duplicate entry: {}",
                        info.message()
                    ))
                }
                DieselError::DatabaseError(_, info) => {
                    DomainError::RepositoryError(format!("Database error: {}", info.message()))
                }
                _ => DomainError::RepositoryError(format!("Database error: {}", diesel_err)),
            },
            SqliteRepositoryError::ConnectionPoolError(e) => {
                DomainError::RepositoryError(format!("Connection pool error: {}", e))
            }
            SqliteRepositoryError::ConversionError(e) => {
                DomainError::RepositoryError(format!("Data conversion error: {}", e))
            }
            SqliteRepositoryError::IoError(e) => DomainError::Io(e),
            SqliteRepositoryError::MigrationError(e) => {
                DomainError::RepositoryError(format!("Migration error: {}", e))
            }
            SqliteRepositoryError::TaskFailed(e) => {
                DomainError::RepositoryError(format!("Database task failed: {}", e))
            }
        }
    }
}
