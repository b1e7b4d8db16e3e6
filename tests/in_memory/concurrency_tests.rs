//! Concurrent reconciliation against the in-memory store.

use super::helpers::{MemoryContext, context, stored_tag_titles};
use async_trait::async_trait;
use mockable::DefaultClock;
use rstest::rstest;
use std::sync::Arc;
use tasktag::{
    adapters::memory::InMemoryStore,
    tag::domain::Tag,
    task::{
        domain::{Tagging, TaggingChanges, TaggingPlan, TaskId},
        ports::{TaggingRepository, TaggingRepositoryResult},
        services::{CreateTaskRequest, TaskLifecycleService, UpdateTaskRequest},
    },
};
use tokio::sync::Barrier;

/// Holds every reader of a task's taggings until the whole group has read,
/// so each caller plans from the same snapshot.
struct LockstepTaggings {
    store: Arc<InMemoryStore>,
    readers: Barrier,
}

#[async_trait]
impl TaggingRepository for LockstepTaggings {
    async fn find_for_task(&self, task_id: TaskId) -> TaggingRepositoryResult<Vec<Tagging>> {
        let current = self.store.find_for_task(task_id).await?;
        self.readers.wait().await;
        Ok(current)
    }

    async fn apply(&self, plan: &TaggingPlan) -> TaggingRepositoryResult<TaggingChanges> {
        self.store.apply(plan).await
    }

    async fn tags_for_task(&self, task_id: TaskId) -> TaggingRepositoryResult<Vec<Tag>> {
        self.store.tags_for_task(task_id).await
    }
}

async fn final_titles(store: &InMemoryStore, id: TaskId) -> Result<Vec<String>, eyre::Report> {
    Ok(store
        .tags_for_task(id)
        .await?
        .into_iter()
        .map(|tag| tag.title().as_str().to_owned())
        .collect())
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn parallel_tasks_share_one_tag_per_title(context: MemoryContext) -> Result<(), eyre::Report> {
    let store = Arc::clone(&context.store);
    let tasks = Arc::new(context.tasks);

    let handles: Vec<_> = (0..8)
        .map(|index| {
            let tasks = Arc::clone(&tasks);
            tokio::spawn(async move {
                tasks
                    .create(
                        CreateTaskRequest::new(format!("task {index}"))
                            .with_tags(["shared", "common"]),
                    )
                    .await
            })
        })
        .collect();
    for handle in handles {
        let created = handle.await??;
        eyre::ensure!(created.tag_titles() == ["shared", "common"], "unexpected tags");
    }

    let mut titles = stored_tag_titles(&store).await?;
    titles.sort();
    eyre::ensure!(titles == ["common", "shared"], "expected exactly two tags");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn repeated_updates_converge(context: MemoryContext) -> Result<(), eyre::Report> {
    let tasks = Arc::new(context.tasks);
    let created = tasks
        .create(CreateTaskRequest::new("contested").with_tags(["harry"]))
        .await?;
    let id = created.task.id();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let tasks = Arc::clone(&tasks);
            tokio::spawn(async move {
                tasks
                    .update(id, UpdateTaskRequest::new().with_tags(["potter", "ron"]))
                    .await
            })
        })
        .collect();
    for handle in handles {
        handle.await??;
    }

    let found = tasks
        .find(id)
        .await?
        .ok_or_else(|| eyre::eyre!("task should exist"))?;
    eyre::ensure!(found.tag_titles() == ["potter", "ron"], "no duplicate taggings");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn divergent_updates_from_one_snapshot_keep_one_request(
    context: MemoryContext,
) -> Result<(), eyre::Report> {
    let id = context
        .tasks
        .create(CreateTaskRequest::new("contested").with_tags(["x"]))
        .await?
        .task
        .id();
    let lockstep = Arc::new(LockstepTaggings {
        store: Arc::clone(&context.store),
        readers: Barrier::new(2),
    });
    let tasks = Arc::new(TaskLifecycleService::new(
        Arc::clone(&context.store),
        Arc::clone(&context.store),
        lockstep,
        Arc::new(DefaultClock),
    ));

    let handles: Vec<_> = ["y", "z"]
        .into_iter()
        .map(|label| {
            let tasks = Arc::clone(&tasks);
            tokio::spawn(async move {
                tasks
                    .update(id, UpdateTaskRequest::new().with_tags([label]))
                    .await
            })
        })
        .collect();
    for handle in handles {
        handle.await??;
    }

    let titles = final_titles(&context.store, id).await?;
    eyre::ensure!(
        titles == ["y"] || titles == ["z"],
        "final tags {titles:?} match neither request"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn divergent_updates_end_on_one_request(context: MemoryContext) -> Result<(), eyre::Report> {
    let store = Arc::clone(&context.store);
    let tasks = Arc::new(context.tasks);
    let id = tasks
        .create(CreateTaskRequest::new("contested").with_tags(["x"]))
        .await?
        .task
        .id();

    for _ in 0..16 {
        let handles: Vec<_> = [["y", "w"], ["z", "w"]]
            .into_iter()
            .map(|labels| {
                let tasks = Arc::clone(&tasks);
                tokio::spawn(async move {
                    tasks
                        .update(id, UpdateTaskRequest::new().with_tags(labels))
                        .await
                })
            })
            .collect();
        for handle in handles {
            handle.await??;
        }

        let mut titles = final_titles(&store, id).await?;
        titles.sort();
        eyre::ensure!(
            titles == ["w", "y"] || titles == ["w", "z"],
            "final tags {titles:?} match neither request"
        );
    }
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn plans_built_from_an_old_read_still_land_exactly(
    context: MemoryContext,
) -> Result<(), eyre::Report> {
    let created = context
        .tasks
        .create(CreateTaskRequest::new("stale").with_tags(["x"]))
        .await?;
    let id = created.task.id();
    let y = context.tags.create("y").await?;
    let z = context.tags.create("z").await?;
    let toward_y = TaggingPlan::toward(id, &[y], &DefaultClock);
    let toward_z = TaggingPlan::toward(id, &[z], &DefaultClock);

    context.store.apply(&toward_y).await?;
    let changes = context.store.apply(&toward_z).await?;

    eyre::ensure!(
        changes == TaggingChanges { removed: 1, added: 1 },
        "unexpected changes {changes:?}"
    );
    eyre::ensure!(final_titles(&context.store, id).await? == ["z"], "only z should remain");
    Ok(())
}
