//! Repository port for tag persistence and lookup by natural key.

use crate::tag::domain::{Tag, TagId, TagTitle};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for tag repository operations.
pub type TagRepositoryResult<T> = Result<T, TagRepositoryError>;

/// Tag persistence contract.
///
/// Implementations must enforce title uniqueness atomically: of two
/// concurrent [`TagRepository::store`] calls with the same title, exactly one
/// succeeds and the other fails with [`TagRepositoryError::DuplicateTitle`].
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Stores a new tag.
    ///
    /// # Errors
    ///
    /// Returns [`TagRepositoryError::DuplicateTitle`] when a tag with the same
    /// title exists or [`TagRepositoryError::DuplicateTag`] when the
    /// identifier is already taken.
    async fn store(&self, tag: &Tag) -> TagRepositoryResult<()>;

    /// Persists a changed title for an existing tag.
    ///
    /// # Errors
    ///
    /// Returns [`TagRepositoryError::NotFound`] when the tag does not exist or
    /// [`TagRepositoryError::DuplicateTitle`] when another tag owns the title.
    async fn update(&self, tag: &Tag) -> TagRepositoryResult<()>;

    /// Finds a tag by identifier.
    async fn find_by_id(&self, id: TagId) -> TagRepositoryResult<Option<Tag>>;

    /// Finds a tag by exact title match.
    async fn find_by_title(&self, title: &TagTitle) -> TagRepositoryResult<Option<Tag>>;

    /// Returns every tag in creation order.
    async fn list(&self) -> TagRepositoryResult<Vec<Tag>>;

    /// Deletes a tag together with all of its taggings.
    ///
    /// # Errors
    ///
    /// Returns [`TagRepositoryError::NotFound`] when the tag does not exist.
    async fn delete(&self, id: TagId) -> TagRepositoryResult<()>;
}

/// Errors returned by tag repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TagRepositoryError {
    /// A tag with the same identifier already exists.
    #[error("duplicate tag identifier: {0}")]
    DuplicateTag(TagId),

    /// A tag with the same title already exists.
    #[error("tag title has already been taken: {0}")]
    DuplicateTitle(TagTitle),

    /// The tag was not found.
    #[error("tag not found: {0}")]
    NotFound(TagId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TagRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
