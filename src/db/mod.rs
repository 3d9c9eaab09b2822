//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    pub const PROFILES: &str = "profiles";
    /// Login credentials (keyed by user id, never exposed via the API)
    pub const CREDENTIALS: &str = "credentials";
    pub const TODOS: &str = "todos";
    /// Daily notes (keyed by `{user_id}_{date}`)
    pub const DAILY_NOTES: &str = "daily_notes";
    /// Directed friendship edges (keyed by `{user_id}_{friend_id}`)
    pub const FRIENDSHIPS: &str = "friendships";
}
