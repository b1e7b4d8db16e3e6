//! Service layer for task creation, update, retrieval and deletion.

use super::reconciler::{ReconcileError, TagReconciler};
use crate::{
    tag::ports::TagRepository,
    task::{
        domain::{Task, TaskDomainError, TaskId, TaskTitle, TaskWithTags},
        ports::{TaggingRepository, TaggingRepositoryError, TaskRepository, TaskRepositoryError},
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument, warn};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    tags: Option<Vec<String>>,
}

impl CreateTaskRequest {
    /// Creates a request without a tag list.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            tags: None,
        }
    }

    /// Supplies the desired tag labels.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }
}

/// Request payload for updating a task.
///
/// Fields left unset are not changed. In particular an unset tag list keeps
/// the task's taggings, whereas an empty tag list removes them all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    title: Option<String>,
    tags: Option<Vec<String>>,
}

impl UpdateTaskRequest {
    /// Creates a request that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a new title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Supplies the desired tag labels.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Tagging repository operation failed.
    #[error(transparent)]
    Tagging(#[from] TaggingRepositoryError),
    /// The task row was written but its tags could not be synchronized.
    ///
    /// The persisted task is not rolled back.
    #[error("task {task_id} was saved but its tags could not be synchronized: {source}")]
    TagSync {
        /// The saved task.
        task_id: TaskId,
        /// Reconciliation failure.
        #[source]
        source: ReconcileError,
    },
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
///
/// Every successful create or update that carries a tag list runs exactly
/// one reconciliation after the task row is persisted.
pub struct TaskLifecycleService<T, R, A, C>
where
    T: TaskRepository,
    R: TagRepository,
    A: TaggingRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    taggings: Arc<A>,
    reconciler: TagReconciler<R, A, C>,
    clock: Arc<C>,
}

impl<T, R, A, C> TaskLifecycleService<T, R, A, C>
where
    T: TaskRepository,
    R: TagRepository,
    A: TaggingRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub fn new(tasks: Arc<T>, tags: Arc<R>, taggings: Arc<A>, clock: Arc<C>) -> Self {
        let reconciler = TagReconciler::new(tags, Arc::clone(&taggings), Arc::clone(&clock));
        Self {
            tasks,
            taggings,
            reconciler,
            clock,
        }
    }

    /// Creates a task and attaches the requested tags.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] for a blank title (nothing is
    /// persisted), [`TaskLifecycleError::Repository`] when the task cannot be
    /// stored, and [`TaskLifecycleError::TagSync`] when the task was stored
    /// but tag reconciliation failed.
    #[instrument(skip_all)]
    pub async fn create(&self, request: CreateTaskRequest) -> TaskLifecycleResult<TaskWithTags> {
        let title = TaskTitle::new(request.title)?;
        let task = Task::new(title, &*self.clock);
        self.tasks.store(&task).await?;
        info!(task_id = %task.id(), "task created");
        self.after_save(task, request.tags).await
    }

    /// Updates a task's title and/or tags.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] for an unknown task,
    /// [`TaskLifecycleError::Domain`] for a blank title (nothing is
    /// persisted), and [`TaskLifecycleError::TagSync`] when the title was
    /// saved but tag reconciliation failed.
    #[instrument(skip_all, fields(task_id = %id))]
    pub async fn update(
        &self,
        id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskLifecycleResult<TaskWithTags> {
        let new_title = request.title.map(TaskTitle::new).transpose()?;
        let mut task = self
            .tasks
            .find_by_id(id)
            .await?
            .ok_or(TaskRepositoryError::NotFound(id))?;

        if let Some(title) = new_title {
            task.rename(title, &*self.clock);
            self.tasks.update(&task).await?;
            info!("task title updated");
        }
        self.after_save(task, request.tags).await
    }

    /// Retrieves a task with its tags.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when persistence lookup fails.
    pub async fn find(&self, id: TaskId) -> TaskLifecycleResult<Option<TaskWithTags>> {
        match self.tasks.find_by_id(id).await? {
            Some(task) => Ok(Some(self.with_tags(task).await?)),
            None => Ok(None),
        }
    }

    /// Lists all tasks with their tags, in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when persistence lookup fails.
    pub async fn list(&self) -> TaskLifecycleResult<Vec<TaskWithTags>> {
        let tasks = self.tasks.list().await?;
        let mut views = Vec::with_capacity(tasks.len());
        for task in tasks {
            views.push(self.with_tags(task).await?);
        }
        Ok(views)
    }

    /// Deletes a task and its taggings. Referenced tags remain.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] for an unknown task.
    #[instrument(skip_all, fields(task_id = %id))]
    pub async fn delete(&self, id: TaskId) -> TaskLifecycleResult<()> {
        self.tasks.delete(id).await?;
        info!("task deleted");
        Ok(())
    }

    /// Post-persist hook: reconciles tags when a tag list was supplied.
    async fn after_save(
        &self,
        task: Task,
        tags: Option<Vec<String>>,
    ) -> TaskLifecycleResult<TaskWithTags> {
        let task_id = task.id();
        self.reconciler
            .reconcile(task_id, tags.as_deref())
            .await
            .map_err(|source| {
                warn!(%task_id, error = %source, "tag synchronization failed after save");
                TaskLifecycleError::TagSync { task_id, source }
            })?;
        self.with_tags(task).await
    }

    async fn with_tags(&self, task: Task) -> TaskLifecycleResult<TaskWithTags> {
        let tags = self.taggings.tags_for_task(task.id()).await?;
        Ok(TaskWithTags { task, tags })
    }
}
