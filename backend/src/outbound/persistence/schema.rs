//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match the migrations exactly; regenerate with
//! `diesel print-schema` after schema changes.

diesel::table! {
    /// User accounts.
    users (id) {
        /// Primary key: UUID v4.
        id -> Uuid,
        /// Display name.
        name -> Varchar,
        /// Unique lowercase login email.
        email -> Varchar,
        /// Argon2id password hash in PHC string format.
        password_hash -> Varchar,
        /// Optional profile image URL.
        image -> Nullable<Varchar>,
        /// Whether the first-run onboarding flow has been completed.
        has_completed_onboarding -> Bool,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Habits, owned by a user.
    habits (id) {
        /// Primary key: UUID v4.
        id -> Uuid,
        /// Owning user; deleting the user cascades here.
        user_id -> Uuid,
        /// Display name.
        name -> Varchar,
        /// Optional free-text description.
        description -> Nullable<Text>,
        /// Advisory cadence: daily, weekly, or monthly.
        frequency -> Varchar,
        /// Denormalized current streak, maintained by the toggle engine.
        streak -> Int4,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Per-day completion logs; at most one row per (habit, day).
    habit_logs (id) {
        /// Primary key: UUID v4.
        id -> Uuid,
        /// Habit the completion belongs to; deleting the habit cascades here.
        habit_id -> Uuid,
        /// Calendar day of the completion (UTC day convention).
        day -> Date,
        /// Optional reflection attached after completion.
        reflection -> Nullable<Text>,
    }
}

diesel::joinable!(habits -> users (user_id));
diesel::joinable!(habit_logs -> habits (habit_id));

diesel::allow_tables_to_appear_in_same_query!(users, habits, habit_logs);
