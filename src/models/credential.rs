//! Login credential model.

use serde::{Deserialize, Serialize};

/// Email/password credential stored separately from the profile
/// (keyed by user id; never returned by the API).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    /// Principal id (also used as document ID)
    pub user_id: String,
    /// Login email, stored lowercased
    pub email: String,
    /// scrypt hash in "salt_hex:key_hex" format
    pub password_hash: String,
    /// When the account was created (RFC 3339)
    pub created_at: String,
}
