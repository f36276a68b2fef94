use sqlx::{Error as SqlxError, error::ErrorKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Sqlx(SqlxError),

    #[error("Not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Foreign key violation: {0}")]
    ForeignKey(String),

    #[error("Custom: {0}")]
    Custom(String),
}

impl From<SqlxError> for RepositoryError {
    fn from(err: SqlxError) -> Self {
        if let SqlxError::RowNotFound = err {
            return RepositoryError::NotFound;
        }

        let Some(db_err) = err.as_database_error() else {
            return RepositoryError::Sqlx(err);
        };

        let detail = db_err
            .constraint()
            .map(str::to_owned)
            .unwrap_or_else(|| db_err.message().to_owned());

        match db_err.kind() {
            ErrorKind::UniqueViolation => RepositoryError::AlreadyExists(detail),
            ErrorKind::ForeignKeyViolation => RepositoryError::ForeignKey(detail),
            ErrorKind::CheckViolation | ErrorKind::NotNullViolation => {
                RepositoryError::Conflict(detail)
            }
            _ => RepositoryError::Sqlx(err),
        }
    }
}
