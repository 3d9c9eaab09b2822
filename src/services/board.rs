// SPDX-License-Identifier: MIT

//! Board service: scoped reads and self-only writes for todos, daily notes,
//! and profile theming.
//!
//! Reads resolve the effective owner through [`BoardScope`] and, for a
//! foreign target, require an existing friendship edge from the principal.
//! Every mutation is gated on the scope being the principal's own board and
//! returns the reloaded todo list for the affected date instead of patching
//! in place (reload-after-mutation is the only consistency mechanism here).

use crate::db::FirestoreDb;
use crate::error::{AppError, Result};
use crate::models::{DailyNote, Profile, Todo};
use crate::scope::BoardScope;
use crate::time_utils::now_rfc3339;

/// Upper bound on todo titles and note section lengths.
const MAX_TITLE_LEN: usize = 500;
const MAX_NOTE_LEN: usize = 20_000;

/// Everything needed to render one board for one date.
#[derive(Debug, Clone)]
pub struct BoardData {
    pub profile: Profile,
    pub todos: Vec<Todo>,
    pub note: DailyNote,
}

/// A reloaded todo list together with the date it was loaded for.
#[derive(Debug, Clone)]
pub struct TodoList {
    pub date: String,
    pub todos: Vec<Todo>,
}

/// Caller-writable profile fields. `id` and `share_code` are not among them.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub nickname: Option<String>,
    pub bg_url: Option<String>,
    pub title_1: Option<String>,
    pub title_2: Option<String>,
}

/// Scoped data access for boards.
#[derive(Clone)]
pub struct BoardService {
    db: FirestoreDb,
}

impl BoardService {
    pub fn new(db: FirestoreDb) -> Self {
        Self { db }
    }

    // ─── Reads ───────────────────────────────────────────────────

    /// Load the board for the scope's effective owner on one date.
    ///
    /// Viewing a foreign target requires the edge `(principal, target)`;
    /// without it the read is rejected before any row is touched. An absent
    /// profile renders with defaults and an absent note as empty strings;
    /// neither is an error.
    pub async fn load_board(&self, scope: &BoardScope, date: &str) -> Result<BoardData> {
        if let Some(target) = scope.target() {
            if !self.db.has_friendship(scope.principal(), target).await? {
                return Err(AppError::Forbidden(
                    "not friends with this user".to_string(),
                ));
            }
        }

        let owner = scope.effective_owner();

        let profile = self
            .db
            .get_profile(owner)
            .await?
            .unwrap_or_else(|| Profile::new(owner.to_string(), String::new(), String::new()));

        let todos = self.db.list_todos(owner, date).await?;

        let note = self
            .db
            .get_daily_note(owner, date)
            .await?
            .unwrap_or_else(|| DailyNote::empty(owner, date));

        Ok(BoardData {
            profile,
            todos,
            note,
        })
    }

    // ─── Todo writes ─────────────────────────────────────────────

    /// Create a todo on the principal's own board and reload the list.
    pub async fn add_todo(&self, scope: &BoardScope, date: &str, title: &str) -> Result<TodoList> {
        scope.ensure_writable()?;

        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::BadRequest("title is required".to_string()));
        }
        if title.len() > MAX_TITLE_LEN {
            return Err(AppError::BadRequest(format!(
                "title must be at most {} characters",
                MAX_TITLE_LEN
            )));
        }

        let todo = Todo {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: scope.principal().to_string(),
            title: title.to_string(),
            due_date: date.to_string(),
            is_done: false,
            created_at: now_rfc3339(),
        };
        self.db.set_todo(&todo).await?;

        self.reload_todos(scope.principal(), date).await
    }

    /// Flip a todo's completion flag and reload the list for its date.
    pub async fn toggle_todo(&self, scope: &BoardScope, id: &str) -> Result<TodoList> {
        scope.ensure_writable()?;

        let mut todo = self.owned_todo(scope, id).await?;
        todo.is_done = !todo.is_done;
        self.db.set_todo(&todo).await?;

        self.reload_todos(scope.principal(), &todo.due_date).await
    }

    /// Delete a todo. The caller must have confirmed; deletion is
    /// irreversible. Returns the reloaded list for the todo's date.
    pub async fn delete_todo(
        &self,
        scope: &BoardScope,
        id: &str,
        confirmed: bool,
    ) -> Result<TodoList> {
        scope.ensure_writable()?;

        if !confirmed {
            return Err(AppError::BadRequest(
                "deletion requires confirmation".to_string(),
            ));
        }

        let todo = self.owned_todo(scope, id).await?;
        self.db.delete_todo(&todo.id).await?;

        self.reload_todos(scope.principal(), &todo.due_date).await
    }

    /// Re-fetch the list for a date after a mutation.
    async fn reload_todos(&self, owner_id: &str, date: &str) -> Result<TodoList> {
        let todos = self.db.list_todos(owner_id, date).await?;
        Ok(TodoList {
            date: date.to_string(),
            todos,
        })
    }

    /// Fetch a todo and check it belongs to the principal.
    async fn owned_todo(&self, scope: &BoardScope, id: &str) -> Result<Todo> {
        let todo = self
            .db
            .get_todo(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("todo {} not found", id)))?;

        if todo.user_id != scope.principal() {
            return Err(AppError::Forbidden(
                "todo belongs to another user".to_string(),
            ));
        }
        Ok(todo)
    }

    // ─── Note writes ─────────────────────────────────────────────

    /// Upsert the note for `(principal, date)`.
    ///
    /// Both fields are always written together; saving one section with the
    /// other omitted would blank it, so the API never accepts a partial pair.
    pub async fn save_note(
        &self,
        scope: &BoardScope,
        date: &str,
        reading: &str,
        dev: &str,
    ) -> Result<DailyNote> {
        scope.ensure_writable()?;

        if reading.len() > MAX_NOTE_LEN || dev.len() > MAX_NOTE_LEN {
            return Err(AppError::BadRequest(format!(
                "note sections must be at most {} characters",
                MAX_NOTE_LEN
            )));
        }

        let note = DailyNote {
            user_id: scope.principal().to_string(),
            date: date.to_string(),
            reading: reading.to_string(),
            dev: dev.to_string(),
            updated_at: now_rfc3339(),
        };
        self.db.upsert_daily_note(&note).await?;

        Ok(note)
    }

    // ─── Profile writes ──────────────────────────────────────────

    /// Apply partial profile changes over a fetch-modify-write.
    ///
    /// A missing profile is materialized with defaults and a fresh share
    /// code before the changes apply (explicit create-if-absent at this
    /// boundary), so theming a brand-new account never loses fields.
    pub async fn update_profile(
        &self,
        scope: &BoardScope,
        accounts: &crate::services::AccountService,
        changes: ProfileChanges,
    ) -> Result<Profile> {
        scope.ensure_writable()?;

        let mut profile = match self.db.get_profile(scope.principal()).await? {
            Some(profile) => profile,
            None => {
                let share_code = accounts.unique_share_code().await?;
                Profile::new(scope.principal().to_string(), share_code, now_rfc3339())
            }
        };

        if let Some(nickname) = changes.nickname {
            profile.nickname = nickname.trim().to_string();
        }
        if let Some(bg_url) = changes.bg_url {
            profile.bg_url = bg_url.trim().to_string();
        }
        if let Some(title_1) = changes.title_1 {
            profile.title_1 = title_1.trim().to_string();
        }
        if let Some(title_2) = changes.title_2 {
            profile.title_2 = title_2.trim().to_string();
        }

        self.db.upsert_profile(&profile).await?;
        Ok(profile)
    }
}
