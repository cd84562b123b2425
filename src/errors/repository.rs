use sqlx::Error as SqlxError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Sqlx(#[from] SqlxError),

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

impl RepositoryError {
    /// Maps Postgres constraint violations onto the taxonomy so callers can
    /// react to duplicates (23505) and missing references (23503) without
    /// digging into driver error codes themselves.
    pub fn from_sqlx(err: SqlxError, subject: &str) -> Self {
        if let SqlxError::Database(ref db_err) = err {
            match db_err.code().as_deref() {
                Some("23505") => return RepositoryError::AlreadyExists(subject.to_string()),
                Some("23503") => return RepositoryError::ForeignKey(subject.to_string()),
                _ => {}
            }
        }

        if matches!(err, SqlxError::RowNotFound) {
            return RepositoryError::NotFound;
        }

        RepositoryError::Sqlx(err)
    }
}
