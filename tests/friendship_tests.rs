// SPDX-License-Identifier: MIT

//! Friendship integration tests (require the Firestore emulator).
//!
//! Cover the add-by-share-code flow: unknown codes, self-adds, idempotent
//! re-adds, and the one-way nature of the edge.

use dayboard_api::error::AppError;
use dayboard_api::models::Profile;
use dayboard_api::services::{AccountService, FriendService};

mod common;

/// Fresh account with a unique email.
async fn signup(accounts: &AccountService) -> Profile {
    let email = format!("{}@example.com", uuid::Uuid::new_v4());
    accounts
        .sign_up(&email, "test-password-123")
        .await
        .expect("signup should succeed")
}

#[tokio::test]
async fn test_add_friend_by_share_code() {
    require_emulator!();

    let db = common::test_db().await;
    let accounts = AccountService::new(db.clone());
    let friends = FriendService::new(db);

    let p = signup(&accounts).await;
    let q = signup(&accounts).await;

    let added = friends
        .add_friend(&q.id, &p.share_code)
        .await
        .expect("adding a valid code should succeed");
    assert_eq!(added.id, p.id);

    // Q now sees P...
    let q_friends = friends.list_friends(&q.id).await.unwrap();
    assert!(q_friends.iter().any(|f| f.id == p.id));

    // ...but the edge is directed: P's list is unaffected.
    let p_friends = friends.list_friends(&p.id).await.unwrap();
    assert!(p_friends.is_empty());
}

#[tokio::test]
async fn test_add_friend_is_idempotent() {
    require_emulator!();

    let db = common::test_db().await;
    let accounts = AccountService::new(db.clone());
    let friends = FriendService::new(db);

    let p = signup(&accounts).await;
    let q = signup(&accounts).await;

    friends.add_friend(&q.id, &p.share_code).await.unwrap();
    friends.add_friend(&q.id, &p.share_code).await.unwrap();

    let q_friends = friends.list_friends(&q.id).await.unwrap();
    assert_eq!(
        q_friends.iter().filter(|f| f.id == p.id).count(),
        1,
        "re-adding the same code must leave exactly one edge"
    );
}

#[tokio::test]
async fn test_add_friend_rejects_own_code() {
    require_emulator!();

    let db = common::test_db().await;
    let accounts = AccountService::new(db.clone());
    let friends = FriendService::new(db);

    let p = signup(&accounts).await;

    let err = friends.add_friend(&p.id, &p.share_code).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let p_friends = friends.list_friends(&p.id).await.unwrap();
    assert!(p_friends.is_empty());
}

#[tokio::test]
async fn test_add_friend_rejects_unknown_code() {
    require_emulator!();

    let db = common::test_db().await;
    let accounts = AccountService::new(db.clone());
    let friends = FriendService::new(db);

    let p = signup(&accounts).await;

    // '?' is not in the share-code alphabet, so this can never match
    let err = friends.add_friend(&p.id, "??????").await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
}

#[tokio::test]
async fn test_add_friend_code_is_case_insensitive() {
    require_emulator!();

    let db = common::test_db().await;
    let accounts = AccountService::new(db.clone());
    let friends = FriendService::new(db);

    let p = signup(&accounts).await;
    let q = signup(&accounts).await;

    let added = friends
        .add_friend(&q.id, &p.share_code.to_lowercase())
        .await
        .unwrap();
    assert_eq!(added.id, p.id);
}

#[tokio::test]
async fn test_signup_rejects_duplicate_email() {
    require_emulator!();

    let db = common::test_db().await;
    let accounts = AccountService::new(db);

    let email = format!("{}@example.com", uuid::Uuid::new_v4());
    accounts.sign_up(&email, "test-password-123").await.unwrap();

    let err = accounts
        .sign_up(&email, "another-password")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_sign_in_roundtrip() {
    require_emulator!();

    let db = common::test_db().await;
    let accounts = AccountService::new(db);

    let email = format!("{}@example.com", uuid::Uuid::new_v4());
    let profile = accounts.sign_up(&email, "test-password-123").await.unwrap();

    let user_id = accounts.sign_in(&email, "test-password-123").await.unwrap();
    assert_eq!(user_id, profile.id);

    let err = accounts.sign_in(&email, "wrong-password").await.unwrap_err();
    assert!(matches!(err, AppError::InvalidCredentials));

    let err = accounts
        .sign_in("nobody@example.com", "test-password-123")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidCredentials));
}
