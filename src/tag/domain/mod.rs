//! Domain model for tags.
//!
//! Tags are identified by a UUID and a validated, unique title. Raw client
//! labels are normalized into titles before any lookup happens.

mod error;
mod ids;
mod labels;
mod tag;

pub use error::TagDomainError;
pub use ids::TagId;
pub use labels::normalize_labels;
pub use tag::{PersistedTagData, Tag, TagTitle};
