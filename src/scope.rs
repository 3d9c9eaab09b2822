// SPDX-License-Identifier: MIT

//! Board scope resolution.
//!
//! Every read of a board is scoped to an effective owner: the authenticated
//! principal, or a friend the principal is currently viewing. Viewing a
//! friend's board is strictly read-only; every mutating operation must pass
//! [`BoardScope::ensure_writable`] before touching the store.
//!
//! Read responses echo the [`ScopeKey`] they were computed for so a client
//! can discard a slow response that arrives after it has already navigated
//! to a different owner or date.

use crate::error::{AppError, Result};
use serde::Serialize;

/// Resolved read/write scope for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardScope {
    principal_id: String,
    target_id: Option<String>,
}

impl BoardScope {
    /// Resolve a scope from the authenticated principal and an optional
    /// viewing target. A target equal to the principal normalizes to a
    /// self scope (viewing your own board is not read-only).
    pub fn new(principal_id: impl Into<String>, target_id: Option<String>) -> Self {
        let principal_id = principal_id.into();
        let target_id = target_id.filter(|t| !t.is_empty() && *t != principal_id);
        Self {
            principal_id,
            target_id,
        }
    }

    /// A scope for the principal's own board. Used by write paths, which
    /// never accept a viewing target.
    pub fn own(principal_id: impl Into<String>) -> Self {
        Self::new(principal_id, None)
    }

    /// The authenticated principal.
    pub fn principal(&self) -> &str {
        &self.principal_id
    }

    /// The friend being viewed, if any.
    pub fn target(&self) -> Option<&str> {
        self.target_id.as_deref()
    }

    /// The id whose rows all reads are scoped to.
    pub fn effective_owner(&self) -> &str {
        self.target_id.as_deref().unwrap_or(&self.principal_id)
    }

    /// True when the principal is looking at their own board.
    pub fn is_self(&self) -> bool {
        self.target_id.is_none()
    }

    /// Reject the operation unless the scope is the principal's own board.
    pub fn ensure_writable(&self) -> Result<()> {
        if self.is_self() {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "a friend's board is read-only".to_string(),
            ))
        }
    }

    /// The key identifying what a read response was computed for.
    pub fn key(&self, date: &str) -> ScopeKey {
        ScopeKey {
            owner_id: self.effective_owner().to_string(),
            date: date.to_string(),
        }
    }
}

/// Scope tag echoed in read responses (stale-response guard).
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ScopeKey {
    pub owner_id: String,
    pub date: String,
}
