//! Store configuration.
//!
//! Settings can be deserialized from any serde source or read from
//! environment variables:
//!
//! - `TASKTAG_DATABASE_URL` (required)
//! - `TASKTAG_DB_POOL_SIZE` (default 10)
//! - `TASKTAG_DB_CONNECT_TIMEOUT_SECS` (default 30)

use crate::adapters::postgres::PgPool;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the `PostgreSQL` connection URL.
pub const DATABASE_URL_VAR: &str = "TASKTAG_DATABASE_URL";
/// Environment variable holding the maximum pool size.
pub const POOL_SIZE_VAR: &str = "TASKTAG_DB_POOL_SIZE";
/// Environment variable holding the connection timeout in seconds.
pub const CONNECT_TIMEOUT_VAR: &str = "TASKTAG_DB_CONNECT_TIMEOUT_SECS";

const fn default_pool_size() -> u32 {
    10
}

const fn default_connect_timeout_secs() -> u64 {
    30
}

/// Errors returned while loading or applying configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("missing required setting {0}")]
    Missing(&'static str),

    /// A variable holds a value that cannot be parsed.
    #[error("invalid value '{value}' for {name}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
    },

    /// The database URL is blank.
    #[error("database URL must not be empty")]
    EmptyDatabaseUrl,

    /// The pool size is zero.
    #[error("pool size must be at least 1")]
    ZeroPoolSize,

    /// The connection pool could not be built.
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] PoolError),
}

/// Connection settings for the `PostgreSQL` store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StoreConfig {
    /// `PostgreSQL` connection URL.
    pub database_url: String,
    /// Maximum number of pooled connections.
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
    /// Seconds to wait for a pooled connection.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl StoreConfig {
    /// Creates a configuration with default pool settings.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            pool_size: default_pool_size(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }

    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the URL is missing, a numeric setting
    /// does not parse, or validation fails.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through a variable lookup function.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the URL is missing, a numeric setting
    /// does not parse, or validation fails.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup(DATABASE_URL_VAR).ok_or(ConfigError::Missing(DATABASE_URL_VAR))?;
        let mut config = Self::new(database_url);
        if let Some(pool_size) = parse_var(&lookup, POOL_SIZE_VAR)? {
            config.pool_size = pool_size;
        }
        if let Some(timeout) = parse_var(&lookup, CONNECT_TIMEOUT_VAR)? {
            config.connect_timeout_secs = timeout;
        }
        config.validate()?;
        Ok(config)
    }

    /// Checks the settings for values that cannot work.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyDatabaseUrl`] or
    /// [`ConfigError::ZeroPoolSize`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::EmptyDatabaseUrl);
        }
        if self.pool_size == 0 {
            return Err(ConfigError::ZeroPoolSize);
        }
        Ok(())
    }

    /// Builds an r2d2 connection pool from these settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when validation fails or the pool cannot
    /// establish its initial connections.
    pub fn build_pool(&self) -> Result<PgPool, ConfigError> {
        self.validate()?;
        let manager = ConnectionManager::<PgConnection>::new(self.database_url.as_str());
        let pool = Pool::builder()
            .max_size(self.pool_size)
            .connection_timeout(Duration::from_secs(self.connect_timeout_secs))
            .build(manager)?;
        Ok(pool)
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError> {
    lookup(name)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid { name, value })
        })
        .transpose()
}
