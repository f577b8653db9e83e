//! Diesel schema for user persistence.

diesel::table! {
    /// User accounts.
    users (id) {
        /// User identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Normalised email address.
        #[max_length = 255]
        email -> Varchar,
        /// Argon2id PHC string.
        #[max_length = 255]
        password_hash -> Varchar,
        /// Account role.
        #[max_length = 20]
        role -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
