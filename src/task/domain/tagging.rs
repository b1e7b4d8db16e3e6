//! Tagging join entity and the reconciliation plan.

use super::{TaggingId, TaskId};
use crate::tag::domain::{Tag, TagId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Join record stating that a task carries a tag.
///
/// At most one tagging exists per `(task_id, tag_id)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tagging {
    id: TaggingId,
    task_id: TaskId,
    tag_id: TagId,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted tagging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaggingData {
    /// Persisted tagging identifier.
    pub id: TaggingId,
    /// Tagged task.
    pub task_id: TaskId,
    /// Attached tag.
    pub tag_id: TagId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Tagging {
    /// Creates a new tagging with a fresh identifier.
    #[must_use]
    pub fn new(task_id: TaskId, tag_id: TagId, clock: &impl Clock) -> Self {
        Self {
            id: TaggingId::new(),
            task_id,
            tag_id,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a tagging from persisted storage.
    #[must_use]
    pub const fn from_persisted(data: PersistedTaggingData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            tag_id: data.tag_id,
            created_at: data.created_at,
        }
    }

    /// Returns the tagging identifier.
    #[must_use]
    pub const fn id(&self) -> TaggingId {
        self.id
    }

    /// Returns the tagged task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the attached tag.
    #[must_use]
    pub const fn tag_id(&self) -> TagId {
        self.tag_id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Target tagging set for one task.
///
/// A plan names the tags the task should carry, not the rows to touch. The
/// store diffs it against the task's taggings while holding the task's lock
/// (see [`TaggingPlan::diff`]), so two plans for the same task never act on
/// each other's stale reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggingPlan {
    task_id: TaskId,
    candidates: Vec<Tagging>,
}

impl TaggingPlan {
    /// Builds the plan that leaves the task tagged with exactly `desired`.
    ///
    /// Each distinct desired tag gets one candidate tagging, in desired
    /// order. An empty desired set clears the task.
    #[must_use]
    pub fn toward(task_id: TaskId, desired: &[Tag], clock: &impl Clock) -> Self {
        let mut seen = HashSet::new();
        let candidates = desired
            .iter()
            .filter(|tag| seen.insert(tag.id()))
            .map(|tag| Tagging::new(task_id, tag.id(), clock))
            .collect();
        Self {
            task_id,
            candidates,
        }
    }

    /// Returns the task the plan applies to.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns one candidate tagging per desired tag.
    #[must_use]
    pub fn candidates(&self) -> &[Tagging] {
        &self.candidates
    }

    /// Returns `true` when the task should carry `tag_id`.
    #[must_use]
    pub fn wants(&self, tag_id: TagId) -> bool {
        self.candidates
            .iter()
            .any(|candidate| candidate.tag_id() == tag_id)
    }

    /// Diffs the task's current taggings against the plan.
    ///
    /// Every current tagging whose tag is not wanted is a removal; every
    /// wanted tag without a tagging is an addition.
    #[must_use]
    pub fn diff<'a>(&'a self, current: &[Tagging]) -> TaggingDiff<'a> {
        let removals = current
            .iter()
            .filter(|tagging| !self.wants(tagging.tag_id()))
            .map(Tagging::id)
            .collect();
        let attached: HashSet<TagId> = current.iter().map(Tagging::tag_id).collect();
        let additions = self
            .candidates
            .iter()
            .filter(|candidate| !attached.contains(&candidate.tag_id()))
            .collect();
        TaggingDiff {
            removals,
            additions,
        }
    }
}

/// Row-level changes moving a task from its current taggings to a plan.
///
/// Removals are applied before additions. Additions are create-if-absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggingDiff<'a> {
    removals: Vec<TaggingId>,
    additions: Vec<&'a Tagging>,
}

impl<'a> TaggingDiff<'a> {
    /// Returns the taggings to delete.
    #[must_use]
    pub fn removals(&self) -> &[TaggingId] {
        &self.removals
    }

    /// Returns the taggings to create when absent.
    #[must_use]
    pub fn additions(&self) -> &[&'a Tagging] {
        &self.additions
    }

    /// Returns `true` when the diff changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.removals.is_empty() && self.additions.is_empty()
    }
}

/// Counts of taggings actually deleted and created by applying a plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaggingChanges {
    /// Taggings deleted.
    pub removed: usize,
    /// Taggings created. Additions that already existed are not counted.
    pub added: usize,
}
