//! Shared test helpers for in-memory integration tests.

use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;
use tasktag::{
    adapters::memory::InMemoryStore,
    tag::{ports::TagRepository, services::TagCatalogueService},
    task::services::TaskLifecycleService,
};

/// Lifecycle service wired to a single in-memory store.
pub type MemoryLifecycle =
    TaskLifecycleService<InMemoryStore, InMemoryStore, InMemoryStore, DefaultClock>;

/// Catalogue service over the in-memory store.
pub type MemoryCatalogue = TagCatalogueService<InMemoryStore, DefaultClock>;

/// Services sharing one store, plus the store for direct inspection.
pub struct MemoryContext {
    pub store: Arc<InMemoryStore>,
    pub tasks: MemoryLifecycle,
    pub tags: MemoryCatalogue,
}

/// Provides fresh services over an empty store for each test.
#[fixture]
pub fn context() -> MemoryContext {
    let store = Arc::new(InMemoryStore::new());
    let clock = Arc::new(DefaultClock);
    MemoryContext {
        tasks: TaskLifecycleService::new(
            Arc::clone(&store),
            Arc::clone(&store),
            Arc::clone(&store),
            Arc::clone(&clock),
        ),
        tags: TagCatalogueService::new(Arc::clone(&store), clock),
        store,
    }
}

/// Returns the titles of every stored tag in creation order.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub async fn stored_tag_titles(store: &InMemoryStore) -> Result<Vec<String>, eyre::Report> {
    Ok(TagRepository::list(store)
        .await?
        .into_iter()
        .map(|tag| tag.title().as_str().to_owned())
        .collect())
}
