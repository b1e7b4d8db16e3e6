//! Tag catalogue and label resolution.
//!
//! Tags are free-text labels shared across tasks. A tag's title is globally
//! unique and matched exactly (case-sensitive). Tags outlive the tasks that
//! reference them. The module follows hexagonal architecture:
//!
//! - Domain types and label normalization in [`domain`]
//! - Port contracts in [`ports`]
//! - Resolution and catalogue services in [`services`]

pub mod domain;
pub mod ports;
pub mod services;
