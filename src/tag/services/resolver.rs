//! Resolution of raw labels into existing or newly created tags.

use crate::tag::{
    domain::{Tag, TagTitle, normalize_labels},
    ports::{TagRepository, TagRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors returned while resolving labels into tags.
#[derive(Debug, Error)]
pub enum TagResolveError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TagRepositoryError),

    /// Tag creation lost a uniqueness race and the winning tag could not be
    /// read back.
    #[error("tag '{0}' was created concurrently but could not be found")]
    Unresolvable(TagTitle),
}

/// Result type for tag resolution.
pub type TagResolveResult<T> = Result<T, TagResolveError>;

/// Finds or creates one tag per distinct normalized label.
pub struct TagResolver<R, C>
where
    R: TagRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TagResolver<R, C>
where
    R: TagRepository,
    C: Clock + Send + Sync,
{
    /// Creates a resolver over the given tag repository.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Resolves labels into tags, creating missing tags on demand.
    ///
    /// Labels are trimmed, blanks dropped and duplicates collapsed before any
    /// lookup. The result holds one tag per distinct label in first-seen
    /// order; an empty input yields an empty result.
    ///
    /// # Errors
    ///
    /// Returns [`TagResolveError`] when the repository fails or a lost
    /// creation race cannot be recovered by re-reading the winning tag.
    pub async fn resolve<S>(&self, labels: &[S]) -> TagResolveResult<Vec<Tag>>
    where
        S: AsRef<str> + Sync,
    {
        let titles = normalize_labels(labels);
        let mut tags = Vec::with_capacity(titles.len());
        for title in titles {
            tags.push(self.find_or_create(title).await?);
        }
        Ok(tags)
    }

    async fn find_or_create(&self, title: TagTitle) -> TagResolveResult<Tag> {
        if let Some(existing) = self.repository.find_by_title(&title).await? {
            return Ok(existing);
        }

        let candidate = Tag::new(title, &*self.clock);
        match self.repository.store(&candidate).await {
            Ok(()) => {
                debug!(tag_id = %candidate.id(), title = %candidate.title(), "created tag");
                Ok(candidate)
            }
            Err(TagRepositoryError::DuplicateTitle(title)) => {
                debug!(%title, "tag created concurrently, reusing existing record");
                self.repository
                    .find_by_title(&title)
                    .await?
                    .ok_or(TagResolveError::Unresolvable(title))
            }
            Err(err) => Err(err.into()),
        }
    }
}
