//! `PostgreSQL` uniqueness and contention tests.

use super::helpers::{BoxError, prepared_store};
use mockable::DefaultClock;
use std::sync::Arc;
use tasktag::{
    tag::{
        domain::{Tag, TagTitle},
        ports::{TagRepository, TagRepositoryError},
        services::TagCatalogueError,
    },
    task::{
        domain::{TaggingChanges, TaggingPlan, TaskId},
        ports::{TaggingRepository, TaggingRepositoryError},
        services::{CreateTaskRequest, UpdateTaskRequest},
    },
};

#[tokio::test(flavor = "multi_thread")]
async fn duplicate_tag_title_is_rejected_but_reused() -> Result<(), BoxError> {
    let Some(ctx) = prepared_store().await? else {
        return Ok(());
    };
    let existing = ctx.tags.create("unique").await?;

    let duplicate = ctx.tags.create("unique").await;
    let created = ctx
        .tasks
        .create(CreateTaskRequest::new("reuse").with_tags(["unique"]))
        .await?;

    assert!(matches!(
        duplicate,
        Err(TagCatalogueError::Repository(TagRepositoryError::DuplicateTitle(_)))
    ));
    let reused: Vec<_> = created.tags.iter().map(Tag::id).collect();
    assert_eq!(reused, vec![existing.id()]);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn renaming_onto_a_taken_title_fails() -> Result<(), BoxError> {
    let Some(ctx) = prepared_store().await? else {
        return Ok(());
    };
    ctx.tags.create("harry").await?;
    let potter = ctx.tags.create("potter").await?;

    let result = ctx.tags.rename(potter.id(), "harry").await;

    assert!(matches!(
        result,
        Err(TagCatalogueError::Repository(TagRepositoryError::DuplicateTitle(_)))
    ));
    assert_eq!(ctx.tag_titles().await?, vec!["harry", "potter"]);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_saves_create_one_tag_per_title() -> Result<(), BoxError> {
    let Some(ctx) = prepared_store().await? else {
        return Ok(());
    };
    let tasks = Arc::new(ctx.tasks);

    let handles: Vec<_> = (0..6)
        .map(|index| {
            let tasks = Arc::clone(&tasks);
            tokio::spawn(async move {
                tasks
                    .create(CreateTaskRequest::new(format!("task {index}")).with_tags(["shared"]))
                    .await
            })
        })
        .collect();
    for handle in handles {
        let created = handle.await??;
        assert_eq!(created.tag_titles(), vec!["shared"]);
    }

    assert_eq!(TagRepository::list(&*ctx.store).await?.len(), 1);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_updates_never_duplicate_taggings() -> Result<(), BoxError> {
    let Some(ctx) = prepared_store().await? else {
        return Ok(());
    };
    let store = Arc::clone(&ctx.store);
    let tasks = Arc::new(ctx.tasks);
    let id = tasks
        .create(CreateTaskRequest::new("contested"))
        .await?
        .task
        .id();

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

    assert_eq!(store.find_for_task(id).await?.len(), 2);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn divergent_concurrent_updates_keep_one_request() -> Result<(), BoxError> {
    let Some(ctx) = prepared_store().await? else {
        return Ok(());
    };
    let store = Arc::clone(&ctx.store);
    let tasks = Arc::new(ctx.tasks);
    let id = tasks
        .create(CreateTaskRequest::new("contested").with_tags(["x"]))
        .await?
        .task
        .id();

    for _ in 0..8 {
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

        let titles: Vec<String> = store
            .tags_for_task(id)
            .await?
            .into_iter()
            .map(|tag| tag.title().as_str().to_owned())
            .collect();
        assert!(
            titles == ["y"] || titles == ["z"],
            "final tags {titles:?} match neither request"
        );
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn plans_built_from_an_old_read_still_land_exactly() -> Result<(), BoxError> {
    let Some(ctx) = prepared_store().await? else {
        return Ok(());
    };
    let id = ctx
        .tasks
        .create(CreateTaskRequest::new("stale").with_tags(["x"]))
        .await?
        .task
        .id();
    let y = ctx.tags.create("y").await?;
    let z = ctx.tags.create("z").await?;
    let toward_y = TaggingPlan::toward(id, &[y], &DefaultClock);
    let toward_z = TaggingPlan::toward(id, std::slice::from_ref(&z), &DefaultClock);

    ctx.store.apply(&toward_y).await?;
    let changes = ctx.store.apply(&toward_z).await?;

    assert_eq!(changes, TaggingChanges { removed: 1, added: 1 });
    let attached: Vec<_> = ctx.store.tags_for_task(id).await?.iter().map(Tag::id).collect();
    assert_eq!(attached, vec![z.id()]);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn plans_for_missing_parents_apply_nothing() -> Result<(), BoxError> {
    let Some(ctx) = prepared_store().await? else {
        return Ok(());
    };
    let task_id = ctx
        .tasks
        .create(CreateTaskRequest::new("orphaned"))
        .await?
        .task
        .id();
    let unsaved = Tag::new(TagTitle::new("ghost")?, &DefaultClock);

    let missing_task =
        TaggingPlan::toward(TaskId::new(), std::slice::from_ref(&unsaved), &DefaultClock);
    let missing_tag = TaggingPlan::toward(task_id, &[unsaved], &DefaultClock);

    assert!(matches!(
        ctx.store.apply(&missing_task).await,
        Err(TaggingRepositoryError::TaskNotFound(_))
    ));
    assert!(matches!(
        ctx.store.apply(&missing_tag).await,
        Err(TaggingRepositoryError::TagNotFound(_))
    ));
    assert!(ctx.store.find_for_task(task_id).await?.is_empty());
    Ok(())
}
