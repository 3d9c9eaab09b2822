//! Profile model for storage and API.

use serde::{Deserialize, Serialize};

/// Default heading for the first note section.
pub const DEFAULT_TITLE_1: &str = "Reading Log";
/// Default heading for the second note section.
pub const DEFAULT_TITLE_2: &str = "Dev Log";

/// User profile stored in Firestore (one per principal, keyed by user id).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Principal id (also used as document ID)
    pub id: String,
    /// Display name shown to friends
    pub nickname: String,
    /// Background image URL for the board
    pub bg_url: String,
    /// Heading for the first note section
    pub title_1: String,
    /// Heading for the second note section
    pub title_2: String,
    /// Stable shareable token used for friend lookup
    pub share_code: String,
    /// When the profile was created (RFC 3339)
    pub created_at: String,
}

impl Profile {
    /// A fresh profile with default theming.
    pub fn new(id: String, share_code: String, created_at: String) -> Self {
        Self {
            id,
            nickname: String::new(),
            bg_url: String::new(),
            title_1: DEFAULT_TITLE_1.to_string(),
            title_2: DEFAULT_TITLE_2.to_string(),
            share_code,
            created_at,
        }
    }
}
