//! Error types for task domain validation and parsing.

use crate::error::FailureKind;
use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task identifier is empty after trimming.
    #[error("task identifier must not be empty")]
    EmptyTaskId,

    /// The task name is empty after trimming.
    #[error("task name must not be empty")]
    EmptyTaskName,

    /// A page size of zero was requested.
    #[error("page size must be a positive integer")]
    ZeroPageSize,

    /// The page number is not a non-negative integer.
    #[error("invalid page number '{0}', expected a non-negative integer")]
    InvalidPageNumber(String),

    /// The page size is not a positive integer.
    #[error("invalid page size '{0}', expected a positive integer")]
    InvalidPageSize(String),
}

impl TaskDomainError {
    /// Classifies the error for transports.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        FailureKind::InvalidInput
    }
}

/// Error returned while parsing a priority literal.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParsePriorityError(pub String);

impl ParsePriorityError {
    /// Classifies the error for transports.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        FailureKind::InvalidInput
    }
}
