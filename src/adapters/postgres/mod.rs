//! `PostgreSQL` store for tasks, tags and taggings.
//!
//! Diesel work is synchronous and runs on Tokio's blocking pool. The
//! `(task_id, tag_id)` and tag title invariants are enforced by unique
//! indexes; see `migrations/`.

mod models;
mod schema;
mod tag;
mod tagging;
mod task;

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use thiserror::Error;

/// `PostgreSQL` connection pool type used by the store.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed store implementing every repository port.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

/// Failure to reach a connection before any query ran.
#[derive(Debug, Error)]
enum ConnectionError {
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),
    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl PostgresStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut PgConnection) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<ConnectionError> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ConnectionError::from)?;
            f(&mut connection)
        })
        .await
        .map_err(ConnectionError::from)?
    }
}
