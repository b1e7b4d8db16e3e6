//! Storage adapters implementing the tag and task ports.
//!
//! Each adapter is a single store type implementing [`TagRepository`],
//! [`TaskRepository`] and [`TaggingRepository`] over shared state, so deleting
//! a task or a tag cascades to its taggings in one place.
//!
//! [`TagRepository`]: crate::tag::ports::TagRepository
//! [`TaskRepository`]: crate::task::ports::TaskRepository
//! [`TaggingRepository`]: crate::task::ports::TaggingRepository

pub mod memory;
pub mod postgres;
