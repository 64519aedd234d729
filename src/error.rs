use bookshelf_db::DbError;
use bookshelf_http::error::AppError;
use thiserror::Error;

/// Failures surfaced by the resource services.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{resource} {key} not found")]
    NotFound { resource: &'static str, key: String },

    #[error(transparent)]
    Store(#[from] DbError),
}

impl ServiceError {
    pub fn not_found(resource: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            resource,
            key: key.to_string(),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<ServiceError> for AppError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::NotFound { .. } => AppError::not_found(error.to_string()),
            ServiceError::Store(e) => AppError::Internal(e.into()),
        }
    }
}
