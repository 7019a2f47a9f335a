pub mod statistics_service;

pub use statistics_service::StatisticsService;

use crate::errors::{QueryError, StorageError};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ServiceError {
    /// Whether the caller supplied a bad request, as opposed to an infrastructure failure.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ServiceError::Query(_))
    }
}
