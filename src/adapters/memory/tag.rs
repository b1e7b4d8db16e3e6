//! [`TagRepository`] implementation for the in-memory store.

use super::InMemoryStore;
use crate::tag::{
    domain::{Tag, TagId, TagTitle},
    ports::{TagRepository, TagRepositoryError, TagRepositoryResult},
};
use async_trait::async_trait;

#[async_trait]
impl TagRepository for InMemoryStore {
    async fn store(&self, tag: &Tag) -> TagRepositoryResult<()> {
        let mut state = self.write(TagRepositoryError::persistence)?;
        if state.tags.contains_key(&tag.id()) {
            return Err(TagRepositoryError::DuplicateTag(tag.id()));
        }
        if state.title_index.contains_key(tag.title()) {
            return Err(TagRepositoryError::DuplicateTitle(tag.title().clone()));
        }
        state.title_index.insert(tag.title().clone(), tag.id());
        state.tag_order.push(tag.id());
        state.tags.insert(tag.id(), tag.clone());
        Ok(())
    }

    async fn update(&self, tag: &Tag) -> TagRepositoryResult<()> {
        let mut state = self.write(TagRepositoryError::persistence)?;
        let old_title = state
            .tags
            .get(&tag.id())
            .ok_or(TagRepositoryError::NotFound(tag.id()))?
            .title()
            .clone();

        if old_title != *tag.title() {
            if state.title_index.contains_key(tag.title()) {
                return Err(TagRepositoryError::DuplicateTitle(tag.title().clone()));
            }
            state.title_index.remove(&old_title);
            state.title_index.insert(tag.title().clone(), tag.id());
        }
        state.tags.insert(tag.id(), tag.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TagId) -> TagRepositoryResult<Option<Tag>> {
        let state = self.read(TagRepositoryError::persistence)?;
        Ok(state.tags.get(&id).cloned())
    }

    async fn find_by_title(&self, title: &TagTitle) -> TagRepositoryResult<Option<Tag>> {
        let state = self.read(TagRepositoryError::persistence)?;
        Ok(state
            .title_index
            .get(title)
            .and_then(|id| state.tags.get(id))
            .cloned())
    }

    async fn list(&self) -> TagRepositoryResult<Vec<Tag>> {
        let state = self.read(TagRepositoryError::persistence)?;
        Ok(state
            .tag_order
            .iter()
            .filter_map(|id| state.tags.get(id).cloned())
            .collect())
    }

    async fn delete(&self, id: TagId) -> TagRepositoryResult<()> {
        let mut state = self.write(TagRepositoryError::persistence)?;
        let tag = state
            .tags
            .remove(&id)
            .ok_or(TagRepositoryError::NotFound(id))?;
        state.title_index.remove(tag.title());
        state.tag_order.retain(|tag_id| *tag_id != id);
        state.remove_taggings(|tagging| tagging.tag_id() == id);
        Ok(())
    }
}
