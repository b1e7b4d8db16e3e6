//! Then steps for tag reconciliation BDD scenarios.

use super::world::{TaggingWorld, labels, run_async};
use rstest_bdd_macros::then;
use tasktag::{
    tag::{
        ports::{TagRepository, TagRepositoryError},
        services::TagCatalogueError,
    },
    task::ports::TaggingRepository,
};

#[then(r#"the task has tags "{tags}""#)]
fn task_has_tags(world: &TaggingWorld, tags: String) -> Result<(), eyre::Report> {
    let found = world.current()?.tag_titles();
    let expected = labels(&tags);
    if found != expected {
        return Err(eyre::eyre!("expected tags {expected:?}, found {found:?}"));
    }
    Ok(())
}

#[then("the task has no tags")]
fn task_has_no_tags(world: &TaggingWorld) -> Result<(), eyre::Report> {
    let current = world.current()?;
    let taggings = run_async(world.store.find_for_task(current.task.id()))
        .map_err(|err| eyre::eyre!("tagging lookup failed: {err}"))?;
    if !current.tags.is_empty() || !taggings.is_empty() {
        return Err(eyre::eyre!("expected no tags, found {:?}", current.tag_titles()));
    }
    Ok(())
}

#[then("the task has {count:usize} taggings")]
fn task_tagging_count(world: &TaggingWorld, count: usize) -> Result<(), eyre::Report> {
    let id = world.current()?.task.id();
    let taggings = run_async(world.store.find_for_task(id))
        .map_err(|err| eyre::eyre!("tagging lookup failed: {err}"))?;
    if taggings.len() != count {
        return Err(eyre::eyre!(
            "expected {count} taggings, found {}",
            taggings.len()
        ));
    }
    Ok(())
}

#[then(r#"the store holds tags "{tags}""#)]
fn store_holds_tags(world: &TaggingWorld, tags: String) -> Result<(), eyre::Report> {
    let stored: Vec<String> = run_async(TagRepository::list(&*world.store))
        .map_err(|err| eyre::eyre!("tag listing failed: {err}"))?
        .into_iter()
        .map(|tag| tag.title().as_str().to_owned())
        .collect();
    let expected = labels(&tags);
    if stored != expected {
        return Err(eyre::eyre!("expected stored tags {expected:?}, found {stored:?}"));
    }
    Ok(())
}

#[then(r#"the task title is "{title}""#)]
fn task_title_is(world: &TaggingWorld, title: String) -> Result<(), eyre::Report> {
    let found = world.current()?.task.title().as_str();
    if found != title {
        return Err(eyre::eyre!("expected title {title}, found {found}"));
    }
    Ok(())
}

#[then("the task taggings are unchanged")]
fn taggings_unchanged(world: &TaggingWorld) -> Result<(), eyre::Report> {
    let id = world.current()?.task.id();
    let taggings = run_async(world.store.find_for_task(id))
        .map_err(|err| eyre::eyre!("tagging lookup failed: {err}"))?;
    if taggings != world.taggings_before {
        return Err(eyre::eyre!("taggings changed across a title-only update"));
    }
    Ok(())
}

#[then("tag creation fails with a duplicate title error")]
fn duplicate_tag_error(world: &TaggingWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_tag_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing tag creation result in scenario world"))?;
    if !matches!(
        result,
        Err(TagCatalogueError::Repository(
            TagRepositoryError::DuplicateTitle(_)
        ))
    ) {
        return Err(eyre::eyre!("expected duplicate title error, got {result:?}"));
    }
    Ok(())
}
