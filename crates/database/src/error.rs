//! Database error types.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors that can occur during database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// SQLx error (connection, query, etc.)
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Migration error
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Record not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Record already exists
    #[error("{entity} already exists: {id}")]
    AlreadyExists { entity: &'static str, id: String },

    /// A field failed validation before reaching the database.
    #[error("invalid input: {0}")]
    Invalid(#[from] ValidationError),

    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

impl DatabaseError {
    /// Map a write error, turning constraint violations into typed errors.
    ///
    /// Foreign-key failures become `NotFound` for the referenced `parent`
    /// entity, unique failures become `AlreadyExists` for `entity`.
    pub(crate) fn from_write(
        err: sqlx::Error,
        entity: &'static str,
        id: impl Into<String>,
        parent: (&'static str, String),
    ) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.is_unique_violation() {
                return DatabaseError::AlreadyExists {
                    entity,
                    id: id.into(),
                };
            }
            if db_err.is_foreign_key_violation() {
                return DatabaseError::NotFound {
                    entity: parent.0,
                    id: parent.1,
                };
            }
        }
        DatabaseError::Sqlx(err)
    }
}

/// Result type for database operations.
pub type Result<T> = std::result::Result<T, DatabaseError>;
