//! Database error types.

use thiserror::Error;

/// Errors raised by the PostgreSQL layer.
#[derive(Debug, Error)]
pub enum DbError {
    /// Pool could not be established.
    #[error("database connection error: {message}")]
    Connection { message: String },

    /// Statement failed.
    #[error("database query error in {operation}: {source}")]
    Query {
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },

    /// A migration script failed to apply.
    #[error("migration {module}/{id} failed: {source}")]
    Migration {
        module: String,
        id: &'static str,
        #[source]
        source: sqlx::Error,
    },

    /// Store state contradicts an operation (e.g. a row vanished mid-write).
    #[error("database inconsistency: {message}")]
    Inconsistent { message: String },
}

impl DbError {
    /// Wrap a sqlx failure with the operation that caused it.
    pub fn query(operation: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| DbError::Query { operation, source }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_error_names_operation() {
        let error = DbError::query("find_author")(sqlx::Error::RowNotFound);
        assert!(error.to_string().contains("find_author"));
    }
}
