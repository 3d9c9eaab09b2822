// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod credential;
pub mod friendship;
pub mod note;
pub mod profile;
pub mod todo;

pub use credential::Credential;
pub use friendship::Friendship;
pub use note::DailyNote;
pub use profile::Profile;
pub use todo::Todo;
