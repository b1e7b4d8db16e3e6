//! Application services for tag resolution and the tag catalogue.

mod catalogue;
mod resolver;

pub use catalogue::{TagCatalogueError, TagCatalogueResult, TagCatalogueService};
pub use resolver::{TagResolveError, TagResolveResult, TagResolver};
