//! Task lifecycle and tag reconciliation.
//!
//! Tasks carry a set of tags through tagging (join) records. Supplying a tag
//! list on create or update reconciles the task's taggings against it:
//! stale taggings are removed, missing ones are added, and tags are created on
//! demand. Omitting the list leaves taggings untouched. The module follows
//! hexagonal architecture:
//!
//! - Domain types and the reconciliation plan in [`domain`]
//! - Port contracts in [`ports`]
//! - Reconciliation and lifecycle services in [`services`]

pub mod domain;
pub mod ports;
pub mod services;
