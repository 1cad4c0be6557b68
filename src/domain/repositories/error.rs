use thiserror::Error;

/// Errors returned by repository implementations
///
/// Engine errors (constraint violations, connection failures, column
/// mapping failures) pass through unchanged in `Database`.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A single-row fetch matched more than one row
    #[error("expected at most one result but found {0}")]
    NonUniqueResult(usize),

    /// A mutation targeted a row that does not exist
    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl RepositoryError {
    /// Returns true if the engine rejected the statement on a constraint
    pub fn is_constraint_violation(&self) -> bool {
        match self {
            RepositoryError::Database(sqlx::Error::Database(db)) => matches!(
                db.kind(),
                sqlx::error::ErrorKind::ForeignKeyViolation
                    | sqlx::error::ErrorKind::UniqueViolation
                    | sqlx::error::ErrorKind::NotNullViolation
                    | sqlx::error::ErrorKind::CheckViolation
            ),
            _ => false,
        }
    }
}
