//! Diesel schema for task and tag persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Task title.
        title -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tag records; `title` carries a unique index.
    tags (id) {
        /// Tag identifier.
        id -> Uuid,
        /// Tag title, matched exactly.
        title -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Task/tag join records; `(task_id, tag_id)` carries a unique index.
    taggings (id) {
        /// Tagging identifier.
        id -> Uuid,
        /// Tagged task, cascades on delete.
        task_id -> Uuid,
        /// Attached tag, cascades on delete.
        tag_id -> Uuid,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(taggings -> tasks (task_id));
diesel::joinable!(taggings -> tags (tag_id));
diesel::allow_tables_to_appear_in_same_query!(tasks, tags, taggings);
