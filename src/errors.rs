use thiserror::Error;

use crate::stats::request::ReportType;

/// Client errors raised while normalising a report request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("Invalid report type: {0}")]
    InvalidReportType(String),
    #[error("Report `{0}` requires both start_date and end_date")]
    MissingDateRange(ReportType),
    #[error("Invalid date for {field}: `{value}`")]
    InvalidDate { field: &'static str, value: String },
    #[error("Invalid value for {field}: `{value}`")]
    InvalidFilter { field: &'static str, value: String },
}

/// Infrastructure failures reported by record sources and configuration storage.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Record source unavailable: {0}")]
    Unavailable(String),
}

/// User-facing command-line error wrapper.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Service(#[from] crate::core::services::ServiceError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("{0} request(s) failed")]
    Failed(usize),
}
