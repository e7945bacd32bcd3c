use messagely_db::DbError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RepoError>;

#[derive(Debug, Error)]
pub enum RepoError {
    /// A lookup by key matched no row.
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    /// The backend rejected a write, e.g. a duplicate username. Passed through as-is.
    #[error("constraint violation: {0}")]
    ConstraintViolation(#[source] rusqlite::Error),

    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error(transparent)]
    Storage(DbError),
}

impl RepoError {
    pub(crate) fn user_not_found(username: &str) -> Self {
        RepoError::NotFound {
            entity: "user",
            key: username.to_string(),
        }
    }

    pub(crate) fn message_not_found(id: i64) -> Self {
        RepoError::NotFound {
            entity: "message",
            key: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RepoError::NotFound { .. })
    }
}

impl From<DbError> for RepoError {
    fn from(err: DbError) -> Self {
        if !err.is_constraint_violation() {
            return RepoError::Storage(err);
        }
        match err {
            DbError::Sqlite(inner) => RepoError::ConstraintViolation(inner),
            other => RepoError::Storage(other),
        }
    }
}
