// SPDX-License-Identifier: MIT

//! Dayboard: backend API for a personal daily dashboard.
//!
//! This crate provides the backend API for per-day todos and notes,
//! profile theming, and the friend-sharing model that lets a user view
//! another user's board read-only.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod scope;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;
use services::{AccountService, BoardService, FriendService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub accounts: AccountService,
    pub friends: FriendService,
    pub board: BoardService,
}
