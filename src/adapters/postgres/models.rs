//! Diesel row models and conversions to domain types.

use super::schema::{taggings, tags, tasks};
use crate::{
    tag::domain::{PersistedTagData, Tag, TagDomainError, TagId, TagTitle},
    task::domain::{
        PersistedTaggingData, PersistedTaskData, Tagging, TaggingId, Task, TaskDomainError,
        TaskId, TaskTitle,
    },
};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

/// Row model for task records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Internal task identifier.
    pub id: Uuid,
    /// Task title.
    pub title: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Row model for tag records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = tags)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TagRow {
    /// Tag identifier.
    pub id: Uuid,
    /// Tag title.
    pub title: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Row model for tagging records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = taggings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaggingRow {
    /// Tagging identifier.
    pub id: Uuid,
    /// Tagged task.
    pub task_id: Uuid,
    /// Attached tag.
    pub tag_id: Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<&Task> for TaskRow {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().into_inner(),
            title: task.title().as_str().to_owned(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}

impl TryFrom<TaskRow> for Task {
    type Error = TaskDomainError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        Ok(Self::from_persisted(PersistedTaskData {
            id: TaskId::from_uuid(row.id),
            title: TaskTitle::new(row.title)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }))
    }
}

impl From<&Tag> for TagRow {
    fn from(tag: &Tag) -> Self {
        Self {
            id: tag.id().into_inner(),
            title: tag.title().as_str().to_owned(),
            created_at: tag.created_at(),
            updated_at: tag.updated_at(),
        }
    }
}

impl TryFrom<TagRow> for Tag {
    type Error = TagDomainError;

    fn try_from(row: TagRow) -> Result<Self, Self::Error> {
        Ok(Self::from_persisted(PersistedTagData {
            id: TagId::from_uuid(row.id),
            title: TagTitle::new(row.title)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }))
    }
}

impl From<&Tagging> for TaggingRow {
    fn from(tagging: &Tagging) -> Self {
        Self {
            id: tagging.id().into_inner(),
            task_id: tagging.task_id().into_inner(),
            tag_id: tagging.tag_id().into_inner(),
            created_at: tagging.created_at(),
        }
    }
}

impl From<TaggingRow> for Tagging {
    fn from(row: TaggingRow) -> Self {
        Self::from_persisted(PersistedTaggingData {
            id: TaggingId::from_uuid(row.id),
            task_id: TaskId::from_uuid(row.task_id),
            tag_id: TagId::from_uuid(row.tag_id),
            created_at: row.created_at,
        })
    }
}
