//! Todo model.

use serde::{Deserialize, Serialize};

/// A single todo item, owned by one user and pinned to one date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Todo {
    /// UUID (also used as document ID)
    pub id: String,
    /// Owning principal id
    pub user_id: String,
    /// Task text
    pub title: String,
    /// Date the task is due (`YYYY-MM-DD`); queries match it exactly
    pub due_date: String,
    /// Completion flag
    pub is_done: bool,
    /// Creation timestamp (RFC 3339); lists sort ascending on this
    pub created_at: String,
}
