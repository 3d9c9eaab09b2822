//! Daily note model.

use serde::{Deserialize, Serialize};

/// Freeform note pair for one user and one date.
///
/// Keyed by the composite `(user_id, date)`; the document ID is
/// [`DailyNote::doc_id`]. Writes always carry both text fields so that
/// saving one section can never blank out the other.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyNote {
    /// Owning principal id
    pub user_id: String,
    /// Date (`YYYY-MM-DD`)
    pub date: String,
    /// First note section (reading log)
    pub reading: String,
    /// Second note section (dev log)
    pub dev: String,
    /// Last write timestamp (RFC 3339)
    pub updated_at: String,
}

impl DailyNote {
    /// Document ID for a `(user_id, date)` pair.
    pub fn doc_id(user_id: &str, date: &str) -> String {
        format!("{}_{}", user_id, date)
    }

    /// An empty note for a pair with no stored row.
    pub fn empty(user_id: &str, date: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            date: date.to_string(),
            reading: String::new(),
            dev: String::new(),
            updated_at: String::new(),
        }
    }
}
