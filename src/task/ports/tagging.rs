//! Repository port for the task/tag join records.

use crate::{
    tag::domain::{Tag, TagId},
    task::domain::{Tagging, TaggingChanges, TaggingPlan, TaskId},
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for tagging repository operations.
pub type TaggingRepositoryResult<T> = Result<T, TaggingRepositoryError>;

/// Tagging persistence contract.
///
/// Implementations own the `(task_id, tag_id)` uniqueness invariant. Taggings
/// are only ever written through [`TaggingRepository::apply`].
#[async_trait]
pub trait TaggingRepository: Send + Sync {
    /// Returns the task's taggings in creation order.
    async fn find_for_task(&self, task_id: TaskId) -> TaggingRepositoryResult<Vec<Tagging>>;

    /// Applies a reconciliation plan atomically.
    ///
    /// The plan is diffed against the task's taggings as they stand once the
    /// task is locked, so concurrent plans for one task take effect one after
    /// the other and the last one wins. Removals are deleted first, then each
    /// addition is inserted unless a tagging for the same `(task_id, tag_id)`
    /// pair already exists. Readers never observe a partially applied plan.
    ///
    /// # Errors
    ///
    /// Returns [`TaggingRepositoryError::TaskNotFound`] or
    /// [`TaggingRepositoryError::TagNotFound`] when a referenced parent no
    /// longer exists; nothing is applied in that case.
    async fn apply(&self, plan: &TaggingPlan) -> TaggingRepositoryResult<TaggingChanges>;

    /// Returns the tags attached to the task, ordered by tagging creation.
    async fn tags_for_task(&self, task_id: TaskId) -> TaggingRepositoryResult<Vec<Tag>>;
}

/// Errors returned by tagging repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaggingRepositoryError {
    /// The tagged task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The attached tag does not exist.
    #[error("tag not found: {0}")]
    TagNotFound(TagId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaggingRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
