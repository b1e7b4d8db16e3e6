//! Error types for tag domain validation.

use thiserror::Error;

/// Errors returned while constructing domain tag values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TagDomainError {
    /// The tag title is empty after trimming.
    #[error("tag title must not be empty")]
    EmptyTitle,
}
