// SPDX-License-Identifier: MIT

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Profiles (board theming + share codes)
//! - Credentials (email/password login)
//! - Todos (per-owner, per-date task lists)
//! - Daily notes (per-owner, per-date note pairs)
//! - Friendships (directed edges for board sharing)

use crate::db::collections;
use crate::error::AppError;
use crate::models::{Credential, DailyNote, Friendship, Profile, Todo};
use futures_util::{stream, StreamExt};

const MAX_CONCURRENT_DB_OPS: usize = 50;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        // Use ExternalJwtFunctionSource to provide a dummy token without needing
        // a custom TokenSource implementation struct.
        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── Profile Operations ──────────────────────────────────────

    /// Get a profile by user id.
    pub async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::PROFILES)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or update a profile (full-row write keyed by user id).
    pub async fn upsert_profile(&self, profile: &Profile) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::PROFILES)
            .document_id(&profile.id)
            .object(profile)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Find the profile holding a share code, if any (zero-or-one).
    pub async fn find_profile_by_share_code(
        &self,
        share_code: &str,
    ) -> Result<Option<Profile>, AppError> {
        let code = share_code.to_string();
        let matches: Vec<Profile> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::PROFILES)
            .filter(move |q| q.field("share_code").eq(code.clone()))
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(matches.into_iter().next())
    }

    /// Fetch several profiles by id, skipping ids with no profile.
    ///
    /// Uses concurrent point reads with a limit to avoid overloading Firestore.
    pub async fn get_profiles_by_ids(&self, ids: &[String]) -> Result<Vec<Profile>, AppError> {
        let client = self.get_client()?;

        let results: Vec<Result<Option<Profile>, AppError>> = stream::iter(ids.to_vec())
            .map(|id| async move {
                client
                    .fluent()
                    .select()
                    .by_id_in(collections::PROFILES)
                    .obj()
                    .one(&id)
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))
            })
            .buffer_unordered(MAX_CONCURRENT_DB_OPS)
            .collect()
            .await;

        let mut profiles = Vec::with_capacity(ids.len());
        for result in results {
            if let Some(profile) = result? {
                profiles.push(profile);
            }
        }
        Ok(profiles)
    }

    // ─── Credential Operations ───────────────────────────────────

    /// Find a credential by login email (stored lowercased; zero-or-one).
    pub async fn find_credential_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Credential>, AppError> {
        let email = email.to_string();
        let matches: Vec<Credential> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::CREDENTIALS)
            .filter(move |q| q.field("email").eq(email.clone()))
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(matches.into_iter().next())
    }

    /// Store a credential (keyed by user id).
    pub async fn set_credential(&self, credential: &Credential) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::CREDENTIALS)
            .document_id(&credential.user_id)
            .object(credential)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Todo Operations ─────────────────────────────────────────

    /// Get todos for an owner on an exact date, creation order ascending.
    ///
    /// Returns an empty vec (never an error) when the owner has no todos
    /// on that date.
    pub async fn list_todos(&self, owner_id: &str, date: &str) -> Result<Vec<Todo>, AppError> {
        let owner = owner_id.to_string();
        let date = date.to_string();

        self.get_client()?
            .fluent()
            .select()
            .from(collections::TODOS)
            .filter(move |q| {
                q.for_all([
                    q.field("user_id").eq(owner.clone()),
                    q.field("due_date").eq(date.clone()),
                ])
            })
            .order_by([(
                "created_at",
                firestore::FirestoreQueryDirection::Ascending,
            )])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a single todo by id.
    pub async fn get_todo(&self, id: &str) -> Result<Option<Todo>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::TODOS)
            .obj()
            .one(id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Store a todo (keyed by its id; insert and update share this path).
    pub async fn set_todo(&self, todo: &Todo) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::TODOS)
            .document_id(&todo.id)
            .object(todo)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete a todo by id. Irreversible.
    pub async fn delete_todo(&self, id: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::TODOS)
            .document_id(id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Daily Note Operations ───────────────────────────────────

    /// Get the note for `(owner_id, date)`, if one exists (zero-or-one).
    pub async fn get_daily_note(
        &self,
        owner_id: &str,
        date: &str,
    ) -> Result<Option<DailyNote>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::DAILY_NOTES)
            .obj()
            .one(&DailyNote::doc_id(owner_id, date))
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Upsert a note, keyed by its `(user_id, date)` document id.
    ///
    /// The caller always supplies both text fields; a partial write would
    /// risk blanking the sibling field.
    pub async fn upsert_daily_note(&self, note: &DailyNote) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::DAILY_NOTES)
            .document_id(DailyNote::doc_id(&note.user_id, &note.date))
            .object(note)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Friendship Operations ───────────────────────────────────

    /// List the friend ids the given user follows.
    pub async fn list_friend_ids(&self, user_id: &str) -> Result<Vec<String>, AppError> {
        let user = user_id.to_string();

        let edges: Vec<Friendship> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::FRIENDSHIPS)
            .filter(move |q| q.field("user_id").eq(user.clone()))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(edges.into_iter().map(|e| e.friend_id).collect())
    }

    /// Check whether the edge `(user_id, friend_id)` exists.
    pub async fn has_friendship(
        &self,
        user_id: &str,
        friend_id: &str,
    ) -> Result<bool, AppError> {
        let edge: Option<Friendship> = self
            .get_client()?
            .fluent()
            .select()
            .by_id_in(collections::FRIENDSHIPS)
            .obj()
            .one(&Friendship::doc_id(user_id, friend_id))
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(edge.is_some())
    }

    /// Upsert the directed edge `(user_id, friend_id)`.
    ///
    /// The composite document id makes repeated adds idempotent.
    pub async fn upsert_friendship(&self, edge: &Friendship) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::FRIENDSHIPS)
            .document_id(Friendship::doc_id(&edge.user_id, &edge.friend_id))
            .object(edge)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
