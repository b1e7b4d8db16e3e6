//! Tasktag: tasks labelled with free-text tags.
//!
//! This crate manages tasks and the tags attached to them through a
//! many-to-many join. Its core is tag reconciliation: turning a task's
//! desired tag labels into the minimal set of tagging deletions and
//! insertions, creating tags on demand and sharing them across tasks.
//!
//! # Architecture
//!
//! Tasktag follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`tag`]: Tag catalogue and label resolution
//! - [`task`]: Task lifecycle and tag reconciliation
//! - [`adapters`]: In-memory and `PostgreSQL` stores
//! - [`config`]: Store configuration
//! - [`telemetry`]: Tracing subscriber setup

pub mod adapters;
pub mod config;
pub mod tag;
pub mod task;
pub mod telemetry;
