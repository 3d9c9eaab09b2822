// SPDX-License-Identifier: MIT

//! Friendship service: listing friends and adding them by share code.
//!
//! Friendship edges are directed and stay one-way: adding a friend lets the
//! adder view that friend's board, nothing more. No reciprocal edge is
//! created.

use crate::db::FirestoreDb;
use crate::error::{AppError, Result};
use crate::models::{Friendship, Profile};
use crate::time_utils::now_rfc3339;
use serde::Serialize;

/// Friend entry as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct FriendSummary {
    pub id: String,
    pub nickname: String,
    pub bg_url: String,
    pub share_code: String,
}

impl From<Profile> for FriendSummary {
    fn from(p: Profile) -> Self {
        Self {
            id: p.id,
            nickname: p.nickname,
            bg_url: p.bg_url,
            share_code: p.share_code,
        }
    }
}

/// Friendship management.
#[derive(Clone)]
pub struct FriendService {
    db: FirestoreDb,
}

impl FriendService {
    pub fn new(db: FirestoreDb) -> Self {
        Self { db }
    }

    /// List the profiles of everyone the principal follows.
    ///
    /// A principal with no edges gets an empty list. Edges whose friend
    /// profile has disappeared are skipped, not errors.
    pub async fn list_friends(&self, principal_id: &str) -> Result<Vec<FriendSummary>> {
        let friend_ids = self.db.list_friend_ids(principal_id).await?;
        if friend_ids.is_empty() {
            return Ok(vec![]);
        }

        let profiles = self.db.get_profiles_by_ids(&friend_ids).await?;
        Ok(profiles.into_iter().map(FriendSummary::from).collect())
    }

    /// Add a friend by their share code.
    ///
    /// Rejects codes that match no profile and the principal's own code.
    /// Re-adding an existing friend is an idempotent no-op (the edge
    /// document is simply rewritten).
    pub async fn add_friend(&self, principal_id: &str, code: &str) -> Result<FriendSummary> {
        let code = code.trim().to_uppercase();
        if code.is_empty() {
            return Err(AppError::BadRequest("share code is required".to_string()));
        }

        let target = self
            .db
            .find_profile_by_share_code(&code)
            .await?
            .ok_or_else(|| AppError::BadRequest("invalid share code".to_string()))?;

        if target.id == principal_id {
            return Err(AppError::BadRequest(
                "cannot add yourself as a friend".to_string(),
            ));
        }

        let edge = Friendship {
            user_id: principal_id.to_string(),
            friend_id: target.id.clone(),
            created_at: now_rfc3339(),
        };
        self.db.upsert_friendship(&edge).await?;

        tracing::info!(
            principal = %principal_id,
            friend = %target.id,
            "Friendship edge created"
        );

        Ok(FriendSummary::from(target))
    }
}
