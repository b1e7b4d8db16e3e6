//! Reconciliation of a task's taggings against a desired label list.

use crate::{
    tag::{
        domain::Tag,
        ports::TagRepository,
        services::{TagResolveError, TagResolver},
    },
    task::{
        domain::{TaggingChanges, TaggingPlan, TaskId},
        ports::{TaggingRepository, TaggingRepositoryError},
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Errors returned while reconciling a task's taggings.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// Labels could not be resolved into tags.
    #[error(transparent)]
    Resolve(#[from] TagResolveError),
    /// Tagging storage failed.
    #[error(transparent)]
    Repository(#[from] TaggingRepositoryError),
}

/// Result type for reconciliation.
pub type ReconcileResult<T> = Result<T, ReconcileError>;

/// What a reconciliation did to a task's taggings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaggingOutcome {
    /// No label list was supplied; taggings were left as they were.
    Unchanged,
    /// Taggings now match the supplied labels.
    Reconciled {
        /// Taggings deleted.
        removed: usize,
        /// Taggings created.
        added: usize,
        /// The resolved desired tags, in label order.
        tags: Vec<Tag>,
    },
}

/// Synchronizes a task's taggings with a caller-supplied label list.
pub struct TagReconciler<R, A, C>
where
    R: TagRepository,
    A: TaggingRepository,
    C: Clock + Send + Sync,
{
    resolver: TagResolver<R, C>,
    taggings: Arc<A>,
    clock: Arc<C>,
}

impl<R, A, C> TagReconciler<R, A, C>
where
    R: TagRepository,
    A: TaggingRepository,
    C: Clock + Send + Sync,
{
    /// Creates a reconciler over the tag and tagging repositories.
    #[must_use]
    pub fn new(tags: Arc<R>, taggings: Arc<A>, clock: Arc<C>) -> Self {
        Self {
            resolver: TagResolver::new(tags, Arc::clone(&clock)),
            taggings,
            clock,
        }
    }

    /// Reconciles the task's taggings with `labels`.
    ///
    /// `None` means the caller did not supply a tag list and is a no-op.
    /// `Some` (including an empty list) resolves the labels into tags,
    /// removes every tagging whose tag is not desired, then adds the missing
    /// ones. The store works out those changes under its own lock, so
    /// concurrent reconciliations of one task end with one caller's tag set.
    /// When a first read already matches, nothing is written. Running the
    /// same reconciliation twice leaves the second run with nothing to do.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError`] when tag resolution or tagging storage
    /// fails. No retries are attempted.
    #[instrument(skip_all, fields(task_id = %task_id))]
    pub async fn reconcile<S>(
        &self,
        task_id: TaskId,
        labels: Option<&[S]>,
    ) -> ReconcileResult<TaggingOutcome>
    where
        S: AsRef<str> + Sync,
    {
        let Some(labels) = labels else {
            debug!("tag list omitted, leaving taggings untouched");
            return Ok(TaggingOutcome::Unchanged);
        };

        let desired = self.resolver.resolve(labels).await?;
        let plan = TaggingPlan::toward(task_id, &desired, &*self.clock);
        let current = self.taggings.find_for_task(task_id).await?;

        let changes = if plan.diff(&current).is_empty() {
            debug!("taggings already match requested tags");
            TaggingChanges::default()
        } else {
            self.taggings.apply(&plan).await?
        };

        info!(
            removed = changes.removed,
            added = changes.added,
            tags = desired.len(),
            "reconciled task tags"
        );
        Ok(TaggingOutcome::Reconciled {
            removed: changes.removed,
            added: changes.added,
            tags: desired,
        })
    }
}
