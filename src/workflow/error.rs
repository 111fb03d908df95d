//! Workflow error types.

use thiserror::Error;

/// Expected, recoverable failures of workflow operations. None of these mutate state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    /// Scanned roll number is not on the roster.
    #[error("Student not found: {0}")]
    StudentNotFound(String),

    /// Manual sync attempted while offline.
    #[error("Cannot sync while offline. Please check your internet connection.")]
    Offline,
}

/// Result type for workflow operations.
pub type Result<T> = std::result::Result<T, WorkflowError>;
