//! Error types and handling.

use thiserror::Error;

use crate::workflow::WorkflowError;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Seed data could not be parsed
    #[error("Data error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Excel export error
    #[error("Export error: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),

    /// Scan or sync rejected by the workflow
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// Background task failed or was dropped
    #[error("Task error: {0}")]
    Task(String),
}

/// Result type alias for AppError
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Create a config error with message
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error with message
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a task error with message
    pub fn task(msg: impl Into<String>) -> Self {
        Self::Task(msg.into())
    }
}
