//! Error types for task domain validation.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty or only whitespace.
    #[error("task title must not be empty")]
    EmptyTitle,
}
