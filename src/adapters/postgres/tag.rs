//! [`TagRepository`] implementation for the `PostgreSQL` store.

use super::{ConnectionError, PostgresStore, models::TagRow, schema::tags};
use crate::tag::{
    domain::{Tag, TagId, TagTitle},
    ports::{TagRepository, TagRepositoryError, TagRepositoryResult},
};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// Name of the unique index on `tags.title`.
const TITLE_UNIQUE_INDEX: &str = "idx_tags_title_unique";

impl From<ConnectionError> for TagRepositoryError {
    fn from(err: ConnectionError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl TagRepository for PostgresStore {
    async fn store(&self, tag: &Tag) -> TagRepositoryResult<()> {
        let tag_id = tag.id();
        let title = tag.title().clone();
        let row = TagRow::from(tag);
        self.run_blocking(move |connection| {
            diesel::insert_into(tags::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_title_unique_violation(info.as_ref()) =>
                    {
                        TagRepositoryError::DuplicateTitle(title.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TagRepositoryError::DuplicateTag(tag_id)
                    }
                    _ => TagRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, tag: &Tag) -> TagRepositoryResult<()> {
        let tag_id = tag.id();
        let title = tag.title().clone();
        let row = TagRow::from(tag);
        self.run_blocking(move |connection| {
            let updated = diesel::update(tags::table.find(row.id))
                .set((tags::title.eq(&row.title), tags::updated_at.eq(row.updated_at)))
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TagRepositoryError::DuplicateTitle(title.clone())
                    }
                    _ => TagRepositoryError::persistence(err),
                })?;
            if updated == 0 {
                return Err(TagRepositoryError::NotFound(tag_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TagId) -> TagRepositoryResult<Option<Tag>> {
        self.run_blocking(move |connection| {
            let row = tags::table
                .find(id.into_inner())
                .select(TagRow::as_select())
                .first::<TagRow>(connection)
                .optional()
                .map_err(TagRepositoryError::persistence)?;
            row.map(row_to_tag).transpose()
        })
        .await
    }

    async fn find_by_title(&self, title: &TagTitle) -> TagRepositoryResult<Option<Tag>> {
        let lookup_title = title.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = tags::table
                .filter(tags::title.eq(lookup_title))
                .select(TagRow::as_select())
                .first::<TagRow>(connection)
                .optional()
                .map_err(TagRepositoryError::persistence)?;
            row.map(row_to_tag).transpose()
        })
        .await
    }

    async fn list(&self) -> TagRepositoryResult<Vec<Tag>> {
        self.run_blocking(|connection| {
            let rows = tags::table
                .order((tags::created_at.asc(), tags::id.asc()))
                .select(TagRow::as_select())
                .load::<TagRow>(connection)
                .map_err(TagRepositoryError::persistence)?;
            rows.into_iter().map(row_to_tag).collect()
        })
        .await
    }

    async fn delete(&self, id: TagId) -> TagRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(tags::table.find(id.into_inner()))
                .execute(connection)
                .map_err(TagRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(TagRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn row_to_tag(row: TagRow) -> TagRepositoryResult<Tag> {
    Tag::try_from(row).map_err(TagRepositoryError::persistence)
}

fn is_title_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == TITLE_UNIQUE_INDEX)
}
