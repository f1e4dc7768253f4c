//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the deployed schema exactly; Diesel uses
//! them for compile-time query validation. Staff and member records live in
//! parallel table pairs with identical shapes, each paired with an
//! append-only history table keyed by the same external identifier.

diesel::table! {
    /// Staff profile records.
    staff_profiles (id) {
        /// Storage primary key, never exposed to callers.
        id -> Uuid,
        /// Stable caller-visible key used for all lookups.
        external_id -> Varchar,
        name -> Nullable<Varchar>,
        phone -> Nullable<Varchar>,
        /// Unique per kind.
        email -> Varchar,
        /// Stored blob key of the current photo.
        photo_path -> Nullable<Varchar>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Member profile records. Same shape as `staff_profiles`.
    member_profiles (id) {
        id -> Uuid,
        external_id -> Varchar,
        name -> Nullable<Varchar>,
        phone -> Nullable<Varchar>,
        email -> Varchar,
        photo_path -> Nullable<Varchar>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only change log for staff profiles.
    staff_profile_history (id) {
        id -> Int8,
        /// External identifier of the owning staff record.
        external_id -> Varchar,
        description -> Text,
        recorded_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only change log for member profiles.
    member_profile_history (id) {
        id -> Int8,
        /// External identifier of the owning member record.
        external_id -> Varchar,
        description -> Text,
        recorded_at -> Timestamptz,
    }
}
