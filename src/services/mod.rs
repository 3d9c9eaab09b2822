// SPDX-License-Identifier: MIT

//! Services module - business logic layer.

pub mod account;
pub mod board;
pub mod friends;

pub use account::AccountService;
pub use board::{BoardData, BoardService, ProfileChanges, TodoList};
pub use friends::{FriendService, FriendSummary};
