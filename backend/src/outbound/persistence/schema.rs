//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly.

diesel::table! {
    /// Profile owners mirrored from the identity system.
    users (id) {
        id -> Uuid,
        name -> Varchar,
        avatar -> Nullable<Varchar>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// One developer profile per user.
    ///
    /// `user_id` is unique; the embedded sections are JSONB arrays stored
    /// newest first.
    profiles (id) {
        id -> Uuid,
        user_id -> Uuid,
        company -> Nullable<Varchar>,
        website -> Nullable<Varchar>,
        location -> Nullable<Varchar>,
        bio -> Nullable<Text>,
        status -> Nullable<Varchar>,
        githubusername -> Nullable<Varchar>,
        skills -> Array<Text>,
        social -> Jsonb,
        experience -> Jsonb,
        education -> Jsonb,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, profiles);
