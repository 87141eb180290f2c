//! Database error types.

use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// Database operation errors.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Database connection pool error.
    #[error(transparent)]
    R2D2(#[from] diesel::r2d2::PoolError),

    /// Diesel ORM operation error.
    #[error(transparent)]
    Diesel(DieselError),

    /// Pending migrations could not be applied.
    #[error("Failed to run database migrations: {0}")]
    Migration(String),

    /// A unique constraint rejected the write.
    #[error("Unique constraint '{0}' violated")]
    UniqueViolation(String),
}

impl From<DieselError> for Error {
    fn from(value: DieselError) -> Self {
        match value {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::UniqueViolation(info.constraint_name().unwrap_or("unknown").to_string())
            }
            other => Self::Diesel(other),
        }
    }
}
