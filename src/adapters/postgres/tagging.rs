//! [`TaggingRepository`] implementation for the `PostgreSQL` store.

use super::{
    ConnectionError, PostgresStore,
    models::{TagRow, TaggingRow},
    schema::{taggings, tags, tasks},
};
use crate::{
    tag::domain::{Tag, TagId},
    task::{
        domain::{Tagging, TaggingChanges, TaggingPlan, TaskId},
        ports::{TaggingRepository, TaggingRepositoryError, TaggingRepositoryResult},
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use uuid::Uuid;

impl From<ConnectionError> for TaggingRepositoryError {
    fn from(err: ConnectionError) -> Self {
        Self::persistence(err)
    }
}

impl From<DieselError> for TaggingRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl TaggingRepository for PostgresStore {
    async fn find_for_task(&self, task_id: TaskId) -> TaggingRepositoryResult<Vec<Tagging>> {
        self.run_blocking(move |connection| load_taggings(connection, task_id))
            .await
    }

    async fn apply(&self, plan: &TaggingPlan) -> TaggingRepositoryResult<TaggingChanges> {
        let plan = plan.clone();

        self.run_blocking(move |connection| {
            connection.transaction::<_, TaggingRepositoryError, _>(|tx| {
                let task_id = plan.task_id();
                lock_task(tx, task_id)?;
                let current = load_taggings(tx, task_id)?;
                let diff = plan.diff(&current);
                let removals: Vec<Uuid> =
                    diff.removals().iter().map(|id| id.into_inner()).collect();
                let removed = delete_taggings(tx, task_id, &removals)?;
                let mut added = 0;
                for tagging in diff.additions() {
                    added += insert_tagging_if_absent(tx, &TaggingRow::from(*tagging))?;
                }
                Ok(TaggingChanges { removed, added })
            })
        })
        .await
    }

    async fn tags_for_task(&self, task_id: TaskId) -> TaggingRepositoryResult<Vec<Tag>> {
        self.run_blocking(move |connection| {
            let rows = taggings::table
                .inner_join(tags::table)
                .filter(taggings::task_id.eq(task_id.into_inner()))
                .order((taggings::created_at.asc(), taggings::id.asc()))
                .select(TagRow::as_select())
                .load::<TagRow>(connection)?;
            rows.into_iter()
                .map(|row| Tag::try_from(row).map_err(TaggingRepositoryError::persistence))
                .collect()
        })
        .await
    }
}

/// Takes a row lock on the task so concurrent plans for it run one at a time.
/// Statements issued after the lock see the previous plan's committed rows.
fn lock_task(connection: &mut PgConnection, task_id: TaskId) -> TaggingRepositoryResult<()> {
    tasks::table
        .find(task_id.into_inner())
        .select(tasks::id)
        .for_update()
        .first::<Uuid>(connection)
        .optional()?
        .map(|_| ())
        .ok_or(TaggingRepositoryError::TaskNotFound(task_id))
}

fn load_taggings(
    connection: &mut PgConnection,
    task_id: TaskId,
) -> TaggingRepositoryResult<Vec<Tagging>> {
    let rows = taggings::table
        .filter(taggings::task_id.eq(task_id.into_inner()))
        .order((taggings::created_at.asc(), taggings::id.asc()))
        .select(TaggingRow::as_select())
        .load::<TaggingRow>(connection)?;
    Ok(rows.into_iter().map(Tagging::from).collect())
}

fn delete_taggings(
    connection: &mut PgConnection,
    task_id: TaskId,
    ids: &[Uuid],
) -> TaggingRepositoryResult<usize> {
    if ids.is_empty() {
        return Ok(0);
    }
    let deleted = diesel::delete(
        taggings::table
            .filter(taggings::task_id.eq(task_id.into_inner()))
            .filter(taggings::id.eq_any(ids.to_vec())),
    )
    .execute(connection)?;
    Ok(deleted)
}

/// Inserts the tagging, treating an existing `(task_id, tag_id)` pair as
/// already present. Returns the number of rows created.
fn insert_tagging_if_absent(
    connection: &mut PgConnection,
    row: &TaggingRow,
) -> TaggingRepositoryResult<usize> {
    diesel::insert_into(taggings::table)
        .values(row)
        .on_conflict((taggings::task_id, taggings::tag_id))
        .do_nothing()
        .execute(connection)
        .map_err(|err| match err {
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                TaggingRepositoryError::TagNotFound(TagId::from_uuid(row.tag_id))
            }
            _ => TaggingRepositoryError::persistence(err),
        })
}
