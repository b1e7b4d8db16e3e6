//! Port contracts for tag persistence.

pub mod repository;

pub use repository::{TagRepository, TagRepositoryError, TagRepositoryResult};
