//! Port contracts for task persistence and tagging storage.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod repository;
pub mod tagging;

pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
pub use tagging::{TaggingRepository, TaggingRepositoryError, TaggingRepositoryResult};
