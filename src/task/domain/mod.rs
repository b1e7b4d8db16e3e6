//! Domain model for tasks and their taggings.
//!
//! The task domain models task records, the tagging join entity, and the
//! pure diff that turns a desired tag set into tagging removals and
//! additions. Infrastructure concerns stay outside the domain boundary.

mod error;
mod ids;
mod tagging;
mod task;

pub use error::TaskDomainError;
pub use ids::{TaggingId, TaskId};
pub use tagging::{PersistedTaggingData, Tagging, TaggingChanges, TaggingDiff, TaggingPlan};
pub use task::{PersistedTaskData, Task, TaskTitle, TaskWithTags};
