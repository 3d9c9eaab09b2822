// SPDX-License-Identifier: MIT

//! API routes for authenticated users.
//!
//! Read endpoints accept an optional `viewing` target and resolve the
//! effective owner through [`BoardScope`]; write endpoints never accept a
//! target, so every mutation is structurally scoped to the principal's own
//! rows on top of the scope gate inside the services.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{DailyNote, Profile, Todo};
use crate::scope::{BoardScope, ScopeKey};
use crate::services::friends::FriendSummary;
use crate::services::{ProfileChanges, TodoList};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, patch, post, put},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/board", get(get_board))
        .route("/api/profile", patch(update_profile))
        .route("/api/todos", post(add_todo))
        .route("/api/todos/{id}/toggle", post(toggle_todo))
        .route("/api/todos/{id}", delete(delete_todo))
        .route("/api/notes/{date}", put(save_note))
        .route("/api/friends", get(list_friends).post(add_friend))
}

/// Validate a `YYYY-MM-DD` date parameter.
fn parse_date(raw: &str) -> Result<String> {
    chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest("date must be YYYY-MM-DD".to_string()))?;
    Ok(raw.to_string())
}

// ─── Views ───────────────────────────────────────────────────

/// Profile as rendered on a board.
#[derive(Serialize)]
pub struct ProfileView {
    pub id: String,
    pub nickname: String,
    pub bg_url: String,
    pub title_1: String,
    pub title_2: String,
}

impl From<Profile> for ProfileView {
    fn from(p: Profile) -> Self {
        Self {
            id: p.id,
            nickname: p.nickname,
            bg_url: p.bg_url,
            title_1: p.title_1,
            title_2: p.title_2,
        }
    }
}

#[derive(Serialize)]
pub struct TodoView {
    pub id: String,
    pub title: String,
    pub due_date: String,
    pub is_done: bool,
}

impl From<Todo> for TodoView {
    fn from(t: Todo) -> Self {
        Self {
            id: t.id,
            title: t.title,
            due_date: t.due_date,
            is_done: t.is_done,
        }
    }
}

#[derive(Serialize)]
pub struct NoteView {
    pub reading: String,
    pub dev: String,
}

impl From<DailyNote> for NoteView {
    fn from(n: DailyNote) -> Self {
        Self {
            reading: n.reading,
            dev: n.dev,
        }
    }
}

/// Reloaded todo list after a mutation, tagged with its scope.
#[derive(Serialize)]
pub struct TodoListResponse {
    pub scope: ScopeKey,
    pub todos: Vec<TodoView>,
}

impl TodoListResponse {
    fn new(scope: &BoardScope, list: TodoList) -> Self {
        Self {
            scope: scope.key(&list.date),
            todos: list.todos.into_iter().map(TodoView::from).collect(),
        }
    }
}

// ─── Current User ────────────────────────────────────────────

#[derive(Serialize)]
pub struct MeResponse {
    pub id: String,
    pub nickname: String,
    pub bg_url: String,
    pub title_1: String,
    pub title_2: String,
    pub share_code: String,
}

/// Get the principal's own profile, including their share code.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<MeResponse>> {
    let profile = state
        .db
        .get_profile(&user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("profile {} not found", user.user_id)))?;

    Ok(Json(MeResponse {
        id: profile.id,
        nickname: profile.nickname,
        bg_url: profile.bg_url,
        title_1: profile.title_1,
        title_2: profile.title_2,
        share_code: profile.share_code,
    }))
}

// ─── Board ───────────────────────────────────────────────────

#[derive(Deserialize)]
struct BoardQuery {
    /// Date to load (`YYYY-MM-DD`)
    date: String,
    /// Friend whose board to view; absent means the principal's own
    viewing: Option<String>,
}

/// One board for one date, merged from profile, todos, and the daily note.
///
/// `share_code` and `friends` are present only when the principal is
/// looking at their own board. `scope` echoes the owner and date the
/// response was computed for so a stale response can be discarded
/// client-side.
#[derive(Serialize)]
pub struct BoardResponse {
    pub scope: ScopeKey,
    pub read_only: bool,
    pub profile: ProfileView,
    pub todos: Vec<TodoView>,
    pub note: NoteView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friends: Option<Vec<FriendSummary>>,
}

/// Load the board for the principal or a friend being viewed.
async fn get_board(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<BoardQuery>,
) -> Result<Json<BoardResponse>> {
    let date = parse_date(&params.date)?;
    let scope = BoardScope::new(user.user_id, params.viewing);

    tracing::debug!(
        principal = %scope.principal(),
        owner = %scope.effective_owner(),
        date = %date,
        "Loading board"
    );

    let board = state.board.load_board(&scope, &date).await?;

    // Share code and friend list are resolved only for the principal's own
    // board; a friend's board never exposes them.
    let (share_code, friends) = if scope.is_self() {
        let friends = state.friends.list_friends(scope.principal()).await?;
        let code = board.profile.share_code.clone();
        (
            (!code.is_empty()).then_some(code),
            Some(friends),
        )
    } else {
        (None, None)
    };

    Ok(Json(BoardResponse {
        scope: scope.key(&date),
        read_only: !scope.is_self(),
        profile: ProfileView::from(board.profile),
        todos: board.todos.into_iter().map(TodoView::from).collect(),
        note: NoteView::from(board.note),
        share_code,
        friends,
    }))
}

// ─── Profile ─────────────────────────────────────────────────

#[derive(Deserialize)]
struct UpdateProfileRequest {
    nickname: Option<String>,
    bg_url: Option<String>,
    title_1: Option<String>,
    title_2: Option<String>,
}

/// Update theming fields on the principal's own profile.
async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileView>> {
    let scope = BoardScope::own(user.user_id);

    let changes = ProfileChanges {
        nickname: payload.nickname,
        bg_url: payload.bg_url,
        title_1: payload.title_1,
        title_2: payload.title_2,
    };

    let profile = state
        .board
        .update_profile(&scope, &state.accounts, changes)
        .await?;

    Ok(Json(ProfileView::from(profile)))
}

// ─── Todos ───────────────────────────────────────────────────

#[derive(Deserialize)]
struct AddTodoRequest {
    date: String,
    title: String,
}

/// Add a todo to the principal's own board.
async fn add_todo(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<AddTodoRequest>,
) -> Result<Json<TodoListResponse>> {
    let date = parse_date(&payload.date)?;
    let scope = BoardScope::own(user.user_id);

    let list = state.board.add_todo(&scope, &date, &payload.title).await?;
    Ok(Json(TodoListResponse::new(&scope, list)))
}

/// Flip a todo's completion flag.
async fn toggle_todo(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<TodoListResponse>> {
    let scope = BoardScope::own(user.user_id);

    let list = state.board.toggle_todo(&scope, &id).await?;
    Ok(Json(TodoListResponse::new(&scope, list)))
}

#[derive(Deserialize)]
struct DeleteTodoQuery {
    /// The client's confirmation dialog must set this.
    #[serde(default)]
    confirm: bool,
}

/// Delete a todo. Requires `?confirm=true`; irreversible.
async fn delete_todo(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Query(params): Query<DeleteTodoQuery>,
) -> Result<Json<TodoListResponse>> {
    let scope = BoardScope::own(user.user_id);

    let list = state.board.delete_todo(&scope, &id, params.confirm).await?;
    Ok(Json(TodoListResponse::new(&scope, list)))
}

// ─── Notes ───────────────────────────────────────────────────

#[derive(Deserialize)]
struct SaveNoteRequest {
    /// Both sections are mandatory on every save so neither can be blanked
    /// by a partial write.
    reading: String,
    dev: String,
}

#[derive(Serialize)]
pub struct NoteResponse {
    pub scope: ScopeKey,
    pub reading: String,
    pub dev: String,
}

/// Upsert the daily note for one date on the principal's own board.
async fn save_note(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(date): Path<String>,
    Json(payload): Json<SaveNoteRequest>,
) -> Result<Json<NoteResponse>> {
    let date = parse_date(&date)?;
    let scope = BoardScope::own(user.user_id);

    let note = state
        .board
        .save_note(&scope, &date, &payload.reading, &payload.dev)
        .await?;

    Ok(Json(NoteResponse {
        scope: scope.key(&date),
        reading: note.reading,
        dev: note.dev,
    }))
}

// ─── Friends ─────────────────────────────────────────────────

#[derive(Serialize)]
pub struct FriendListResponse {
    pub friends: Vec<FriendSummary>,
}

/// List everyone the principal follows.
async fn list_friends(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<FriendListResponse>> {
    let friends = state.friends.list_friends(&user.user_id).await?;
    Ok(Json(FriendListResponse { friends }))
}

#[derive(Deserialize)]
struct AddFriendRequest {
    code: String,
}

/// Add a friend by share code. Idempotent; own code is rejected.
async fn add_friend(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<AddFriendRequest>,
) -> Result<Json<FriendSummary>> {
    let friend = state.friends.add_friend(&user.user_id, &payload.code).await?;
    Ok(Json(friend))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_accepts_iso_dates() {
        assert_eq!(parse_date("2024-05-01").unwrap(), "2024-05-01");
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(matches!(
            parse_date("05/01/2024").unwrap_err(),
            AppError::BadRequest(_)
        ));
        assert!(matches!(
            parse_date("2024-13-40").unwrap_err(),
            AppError::BadRequest(_)
        ));
    }
}
