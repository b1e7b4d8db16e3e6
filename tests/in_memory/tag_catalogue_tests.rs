//! In-memory integration tests for explicit tag management.

use super::helpers::{MemoryContext, context};
use rstest::rstest;
use tasktag::{
    tag::{ports::TagRepositoryError, services::TagCatalogueError},
    task::services::CreateTaskRequest,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_titles_are_rejected(context: MemoryContext) -> Result<(), eyre::Report> {
    context.tags.create("unique").await?;

    let result = context.tags.create(" unique ").await;

    eyre::ensure!(
        matches!(
            result,
            Err(TagCatalogueError::Repository(TagRepositoryError::DuplicateTitle(ref title)))
                if title.as_str() == "unique"
        ),
        "expected a duplicate title error, got {result:?}"
    );
    eyre::ensure!(context.tags.list().await?.len() == 1, "only one tag expected");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn renamed_tag_shows_on_tagged_tasks(context: MemoryContext) -> Result<(), eyre::Report> {
    let created = context
        .tasks
        .create(CreateTaskRequest::new("wizards").with_tags(["hary"]))
        .await?;
    let tag_id = created
        .tags
        .first()
        .map(|tag| tag.id())
        .ok_or_else(|| eyre::eyre!("task should carry a tag"))?;

    context.tags.rename(tag_id, "harry").await?;

    let found = context
        .tasks
        .find(created.task.id())
        .await?
        .ok_or_else(|| eyre::eyre!("task should exist"))?;
    eyre::ensure!(found.tag_titles() == ["harry"], "rename should be visible");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_tag_detaches_it_from_tasks(context: MemoryContext) -> Result<(), eyre::Report> {
    let created = context
        .tasks
        .create(CreateTaskRequest::new("wizards").with_tags(["harry", "potter"]))
        .await?;
    let harry = created
        .tags
        .first()
        .map(|tag| tag.id())
        .ok_or_else(|| eyre::eyre!("task should carry tags"))?;

    context.tags.delete(harry).await?;

    let found = context
        .tasks
        .find(created.task.id())
        .await?
        .ok_or_else(|| eyre::eyre!("task should exist"))?;
    eyre::ensure!(found.tag_titles() == ["potter"], "harry should be detached");
    Ok(())
}
