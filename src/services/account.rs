// SPDX-License-Identifier: MIT

//! Account service: signup, login, and share-code generation.
//!
//! Passwords are hashed with scrypt (N=16384, r=16, p=1, dkLen=64) and a
//! random 16-byte salt, stored as `hex(salt):hex(key)`. Verification is
//! constant-time.

use crate::db::FirestoreDb;
use crate::error::{AppError, Result};
use crate::models::{Credential, Profile};
use crate::time_utils::now_rfc3339;
use rand::{Rng, RngCore};
use scrypt::{scrypt, Params};
use subtle::ConstantTimeEq;

/// Share codes use an unambiguous uppercase alphabet (no 0/O, 1/I/L).
const SHARE_CODE_ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";
/// Share code length in characters.
pub const SHARE_CODE_LEN: usize = 6;
/// How many random codes to try before giving up on uniqueness.
const SHARE_CODE_MAX_ATTEMPTS: usize = 8;

/// Account management: signup, login, share codes.
#[derive(Clone)]
pub struct AccountService {
    db: FirestoreDb,
}

impl AccountService {
    pub fn new(db: FirestoreDb) -> Self {
        Self { db }
    }

    /// Register a new account: credential plus a default profile carrying a
    /// fresh unique share code.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Profile> {
        let email = normalize_email(email);

        if self.db.find_credential_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict("email already registered".to_string()));
        }

        let user_id = uuid::Uuid::new_v4().to_string();
        let share_code = self.unique_share_code().await?;
        let now = now_rfc3339();

        let credential = Credential {
            user_id: user_id.clone(),
            email,
            password_hash: hash_password(password)?,
            created_at: now.clone(),
        };
        self.db.set_credential(&credential).await?;

        let profile = Profile::new(user_id.clone(), share_code, now);
        self.db.upsert_profile(&profile).await?;

        tracing::info!(user_id = %user_id, "Account created");

        Ok(profile)
    }

    /// Verify a login and return the principal id.
    ///
    /// An unknown email and a wrong password produce the same error, so the
    /// response does not reveal which emails are registered.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<String> {
        let email = normalize_email(email);

        let credential = self
            .db
            .find_credential_by_email(&email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !verify_password(&credential.password_hash, password)? {
            return Err(AppError::InvalidCredentials);
        }

        Ok(credential.user_id)
    }

    /// Generate a share code not already held by any profile.
    pub async fn unique_share_code(&self) -> Result<String> {
        for _ in 0..SHARE_CODE_MAX_ATTEMPTS {
            let code = generate_share_code(&mut rand::thread_rng());
            if self.db.find_profile_by_share_code(&code).await?.is_none() {
                return Ok(code);
            }
        }
        Err(AppError::Conflict(
            "could not allocate a unique share code".to_string(),
        ))
    }
}

/// Lowercase and trim a login email.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Draw a random share code from the unambiguous alphabet.
pub fn generate_share_code<R: Rng>(rng: &mut R) -> String {
    (0..SHARE_CODE_LEN)
        .map(|_| SHARE_CODE_ALPHABET[rng.gen_range(0..SHARE_CODE_ALPHABET.len())] as char)
        .collect()
}

/// Hash a password using scrypt.
///
/// Returns a string in the format `salt:key` where both are hex-encoded.
pub fn hash_password(password: &str) -> Result<String> {
    let mut salt_bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut salt_bytes);
    let salt_hex = hex::encode(salt_bytes);

    let key = derive_key(password, &salt_hex)?;
    Ok(format!("{}:{}", salt_hex, hex::encode(key)))
}

/// Verify a password against a hash produced by [`hash_password`].
pub fn verify_password(hash: &str, password: &str) -> Result<bool> {
    let (salt, key_hex) = hash
        .split_once(':')
        .ok_or_else(|| AppError::Database("invalid password hash format".to_string()))?;

    let expected_key = hex::decode(key_hex)
        .map_err(|e| AppError::Database(format!("invalid hex in password hash: {}", e)))?;

    let derived_key = derive_key(password, salt)?;

    Ok(derived_key.ct_eq(&expected_key).into())
}

/// Derive a 64-byte key using scrypt (N=16384 → log2=14, r=16, p=1).
fn derive_key(password: &str, salt: &str) -> Result<Vec<u8>> {
    let params = Params::new(14, 16, 1, 64)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("invalid scrypt params: {}", e)))?;

    let mut output = vec![0u8; 64];
    scrypt(password.as_bytes(), salt.as_bytes(), &params, &mut output)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("scrypt failed: {}", e)))?;

    Ok(output)
}
