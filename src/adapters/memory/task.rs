//! [`TaskRepository`] implementation for the in-memory store.

use super::InMemoryStore;
use crate::task::{
    domain::{Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;

#[async_trait]
impl TaskRepository for InMemoryStore {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write(TaskRepositoryError::persistence)?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.task_order.push(task.id());
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write(TaskRepositoryError::persistence)?;
        let existing = state
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        *existing = task.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read(TaskRepositoryError::persistence)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list(&self) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read(TaskRepositoryError::persistence)?;
        Ok(state
            .task_order
            .iter()
            .filter_map(|id| state.tasks.get(id).cloned())
            .collect())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.write(TaskRepositoryError::persistence)?;
        if state.tasks.remove(&id).is_none() {
            return Err(TaskRepositoryError::NotFound(id));
        }
        state.task_order.retain(|task_id| *task_id != id);
        state.remove_taggings(|tagging| tagging.task_id() == id);
        Ok(())
    }
}
