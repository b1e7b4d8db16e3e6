//! In-memory store for tests and embedded use.
//!
//! All three repository ports share one lock, so every operation, including
//! applying a tagging plan, is atomic with respect to concurrent callers.

mod tag;
mod tagging;
mod task;

use crate::{
    tag::domain::{Tag, TagId, TagTitle},
    task::domain::{Tagging, Task, TaskId},
};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Thread-safe in-memory store for tasks, tags and taggings.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<StoreState>>,
}

#[derive(Debug, Default)]
struct StoreState {
    tasks: HashMap<TaskId, Task>,
    task_order: Vec<TaskId>,
    tags: HashMap<TagId, Tag>,
    tag_order: Vec<TagId>,
    title_index: HashMap<TagTitle, TagId>,
    taggings: Vec<Tagging>,
    pair_index: HashSet<(TaskId, TagId)>,
}

impl InMemoryStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read<E>(
        &self,
        map_err: impl FnOnce(std::io::Error) -> E,
    ) -> Result<RwLockReadGuard<'_, StoreState>, E> {
        self.state.read().map_err(|err| map_err(poisoned(&err)))
    }

    fn write<E>(
        &self,
        map_err: impl FnOnce(std::io::Error) -> E,
    ) -> Result<RwLockWriteGuard<'_, StoreState>, E> {
        self.state.write().map_err(|err| map_err(poisoned(&err)))
    }
}

fn poisoned<G>(err: &PoisonError<G>) -> std::io::Error {
    std::io::Error::other(err.to_string())
}

impl StoreState {
    /// Removes every tagging matching the predicate, keeping the pair index
    /// in step. Returns the number removed.
    fn remove_taggings(&mut self, mut predicate: impl FnMut(&Tagging) -> bool) -> usize {
        let before = self.taggings.len();
        let pair_index = &mut self.pair_index;
        self.taggings.retain(|tagging| {
            if predicate(tagging) {
                pair_index.remove(&(tagging.task_id(), tagging.tag_id()));
                false
            } else {
                true
            }
        });
        before - self.taggings.len()
    }

    /// Inserts the tagging unless its pair already exists. Returns whether a
    /// row was created.
    fn insert_tagging_if_absent(&mut self, tagging: &Tagging) -> bool {
        if !self
            .pair_index
            .insert((tagging.task_id(), tagging.tag_id()))
        {
            return false;
        }
        self.taggings.push(tagging.clone());
        true
    }
}
