//! Friendship edge model.

use serde::{Deserialize, Serialize};

/// Directed friendship edge: `user_id` follows `friend_id`.
///
/// The document ID is [`Friendship::doc_id`], so re-adding the same friend
/// overwrites the same document and stays idempotent. No reciprocal edge is
/// ever created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Friendship {
    pub user_id: String,
    pub friend_id: String,
    /// When the edge was created (RFC 3339)
    pub created_at: String,
}

impl Friendship {
    /// Document ID for a `(user_id, friend_id)` pair.
    pub fn doc_id(user_id: &str, friend_id: &str) -> String {
        format!("{}_{}", user_id, friend_id)
    }
}
