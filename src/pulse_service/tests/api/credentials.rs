use serde_json::Value;
use uuid::Uuid;

use crate::helpers::{register_account, spawn_app};

#[tokio::test]
async fn credential_lookup_reports_attempts_without_the_hash() {
    let app = spawn_app().await;
    register_account(&app, "12345678901").await;
    app.post_login("12345678901", "wrong").await;
    app.post_login("12345678901", "wrong").await;

    let response = app.get_credential_by_tax_id("12345678901").await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["failed_attempts"], 2);
    assert_eq!(body["locked"], false);
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn unlock_reopens_a_locked_account() {
    let app = spawn_app().await;
    let account = register_account(&app, "12345678901").await;
    let credential_id: Uuid = account["credential_id"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();

    for _ in 0..5 {
        app.post_login("12345678901", "wrong").await;
    }
    assert_eq!(
        app.post_login("12345678901", "hunter2!").await.status().as_u16(),
        423
    );

    let response = app.post_unlock(credential_id).await;
    assert_eq!(response.status().as_u16(), 204);

    let response = app.post_login("12345678901", "hunter2!").await;
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn changed_password_replaces_the_old_one() {
    let app = spawn_app().await;
    let account = register_account(&app, "12345678901").await;
    let credential_id: Uuid = account["credential_id"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();

    let response = app.put_password(credential_id, "new-pass-9").await;
    assert_eq!(response.status().as_u16(), 204);

    assert_eq!(
        app.post_login("12345678901", "hunter2!").await.status().as_u16(),
        401
    );
    assert_eq!(
        app.post_login("12345678901", "new-pass-9").await.status().as_u16(),
        200
    );
}

#[tokio::test]
async fn blank_replacement_password_is_rejected() {
    let app = spawn_app().await;
    let account = register_account(&app, "12345678901").await;
    let credential_id: Uuid = account["credential_id"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();

    let response = app.put_password(credential_id, "   ").await;
    assert_eq!(response.status().as_u16(), 422);

    // The old password still works.
    assert_eq!(
        app.post_login("12345678901", "hunter2!").await.status().as_u16(),
        200
    );
}

#[tokio::test]
async fn unknown_credential_is_404() {
    let app = spawn_app().await;

    assert_eq!(app.post_unlock(Uuid::new_v4()).await.status().as_u16(), 404);
    assert_eq!(
        app.put_password(Uuid::new_v4(), "whatever").await.status().as_u16(),
        404
    );
    assert_eq!(
        app.get_credential_by_tax_id("98765432109")
            .await
            .status()
            .as_u16(),
        404
    );
}
