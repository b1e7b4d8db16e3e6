//! [`TaggingRepository`] implementation for the in-memory store.

use super::InMemoryStore;
use crate::{
    tag::domain::Tag,
    task::{
        domain::{Tagging, TaggingChanges, TaggingPlan, TaskId},
        ports::{TaggingRepository, TaggingRepositoryError, TaggingRepositoryResult},
    },
};
use async_trait::async_trait;

#[async_trait]
impl TaggingRepository for InMemoryStore {
    async fn find_for_task(&self, task_id: TaskId) -> TaggingRepositoryResult<Vec<Tagging>> {
        let state = self.read(TaggingRepositoryError::persistence)?;
        Ok(state
            .taggings
            .iter()
            .filter(|tagging| tagging.task_id() == task_id)
            .cloned()
            .collect())
    }

    async fn apply(&self, plan: &TaggingPlan) -> TaggingRepositoryResult<TaggingChanges> {
        let mut state = self.write(TaggingRepositoryError::persistence)?;
        let task_id = plan.task_id();
        if !state.tasks.contains_key(&task_id) {
            return Err(TaggingRepositoryError::TaskNotFound(task_id));
        }
        let current: Vec<Tagging> = state
            .taggings
            .iter()
            .filter(|tagging| tagging.task_id() == task_id)
            .cloned()
            .collect();
        let diff = plan.diff(&current);
        if let Some(missing) = diff
            .additions()
            .iter()
            .find(|tagging| !state.tags.contains_key(&tagging.tag_id()))
        {
            return Err(TaggingRepositoryError::TagNotFound(missing.tag_id()));
        }

        let removals = diff.removals();
        let removed = state.remove_taggings(|tagging| removals.contains(&tagging.id()));
        let added = diff
            .additions()
            .iter()
            .filter(|tagging| state.insert_tagging_if_absent(tagging))
            .count();
        Ok(TaggingChanges { removed, added })
    }

    async fn tags_for_task(&self, task_id: TaskId) -> TaggingRepositoryResult<Vec<Tag>> {
        let state = self.read(TaggingRepositoryError::persistence)?;
        Ok(state
            .taggings
            .iter()
            .filter(|tagging| tagging.task_id() == task_id)
            .filter_map(|tagging| state.tags.get(&tagging.tag_id()).cloned())
            .collect())
    }
}
