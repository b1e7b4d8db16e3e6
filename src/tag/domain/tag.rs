//! Tag entity and its validated title.

use super::{TagDomainError, TagId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trimmed, non-empty tag title.
///
/// Titles compare by exact value: `"Potter"` and `"potter"` are distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TagTitle(String);

impl TagTitle {
    /// Creates a validated tag title.
    ///
    /// # Errors
    ///
    /// Returns [`TagDomainError::EmptyTitle`] when the value is blank after
    /// trimming surrounding whitespace.
    pub fn new(value: impl AsRef<str>) -> Result<Self, TagDomainError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TagDomainError::EmptyTitle);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TagTitle {
    type Error = TagDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TagTitle> for String {
    fn from(value: TagTitle) -> Self {
        value.0
    }
}

impl AsRef<str> for TagTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TagTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tag entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    id: TagId,
    title: TagTitle,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTagData {
    /// Persisted tag identifier.
    pub id: TagId,
    /// Persisted title.
    pub title: TagTitle,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Tag {
    /// Creates a new tag with a fresh identifier.
    #[must_use]
    pub fn new(title: TagTitle, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TagId::new(),
            title,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a tag from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTagData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the tag identifier.
    #[must_use]
    pub const fn id(&self) -> TagId {
        self.id
    }

    /// Returns the tag title.
    #[must_use]
    pub const fn title(&self) -> &TagTitle {
        &self.title
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the tag title.
    pub fn rename(&mut self, title: TagTitle, clock: &impl Clock) {
        self.title = title;
        self.updated_at = clock.utc();
    }
}
