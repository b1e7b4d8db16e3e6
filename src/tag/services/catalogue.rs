//! Service layer for explicit tag management.

use crate::tag::{
    domain::{Tag, TagDomainError, TagId, TagTitle},
    ports::{TagRepository, TagRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument};

/// Service-level errors for tag catalogue operations.
#[derive(Debug, Error)]
pub enum TagCatalogueError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TagDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TagRepositoryError),
}

/// Result type for tag catalogue operations.
pub type TagCatalogueResult<T> = Result<T, TagCatalogueError>;

/// Create, read, rename and delete operations for tags.
///
/// Unlike [`super::TagResolver`], creating a tag whose title already exists is
/// an error here.
#[derive(Clone)]
pub struct TagCatalogueService<R, C>
where
    R: TagRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TagCatalogueService<R, C>
where
    R: TagRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new tag catalogue service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a tag with the given title.
    ///
    /// # Errors
    ///
    /// Returns [`TagCatalogueError::Domain`] for a blank title and
    /// [`TagRepositoryError::DuplicateTitle`] when the title is taken.
    #[instrument(skip_all)]
    pub async fn create(&self, title: impl AsRef<str> + Send) -> TagCatalogueResult<Tag> {
        let tag = Tag::new(TagTitle::new(title)?, &*self.clock);
        self.repository.store(&tag).await?;
        info!(tag_id = %tag.id(), title = %tag.title(), "tag created");
        Ok(tag)
    }

    /// Retrieves a tag by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TagCatalogueError::Repository`] when lookup fails.
    pub async fn find(&self, id: TagId) -> TagCatalogueResult<Option<Tag>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Lists all tags in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`TagCatalogueError::Repository`] when lookup fails.
    pub async fn list(&self) -> TagCatalogueResult<Vec<Tag>> {
        Ok(self.repository.list().await?)
    }

    /// Renames an existing tag.
    ///
    /// # Errors
    ///
    /// Returns [`TagRepositoryError::NotFound`] for an unknown tag,
    /// [`TagCatalogueError::Domain`] for a blank title and
    /// [`TagRepositoryError::DuplicateTitle`] when the title is taken.
    #[instrument(skip_all, fields(tag_id = %id))]
    pub async fn rename(
        &self,
        id: TagId,
        title: impl AsRef<str> + Send,
    ) -> TagCatalogueResult<Tag> {
        let new_title = TagTitle::new(title)?;
        let mut tag = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(TagRepositoryError::NotFound(id))?;
        tag.rename(new_title, &*self.clock);
        self.repository.update(&tag).await?;
        info!(title = %tag.title(), "tag renamed");
        Ok(tag)
    }

    /// Deletes a tag and every tagging that references it.
    ///
    /// Tasks that carried the tag are left in place.
    ///
    /// # Errors
    ///
    /// Returns [`TagRepositoryError::NotFound`] for an unknown tag.
    #[instrument(skip_all, fields(tag_id = %id))]
    pub async fn delete(&self, id: TagId) -> TagCatalogueResult<()> {
        self.repository.delete(id).await?;
        info!("tag deleted");
        Ok(())
    }
}
