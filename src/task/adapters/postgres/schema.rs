//! Diesel schema for task persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Owning project; rows are removed with their project.
        project_id -> Uuid,
        /// Assigned user.
        assigned_to -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional free-form description.
        description -> Nullable<Text>,
        /// Task lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Task priority.
        #[max_length = 10]
        priority -> Varchar,
        /// Calendar due date.
        due_date -> Date,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
