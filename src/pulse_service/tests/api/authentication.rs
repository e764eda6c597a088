use serde_json::Value;

use crate::helpers::{register_account, spawn_app};

#[tokio::test]
async fn correct_credentials_yield_a_session_token() {
    let app = spawn_app().await;
    register_account(&app, "12345678901").await;

    let response = app.post_login("12345678901", "hunter2!").await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    let token = body["token"].as_str().unwrap();
    assert_eq!(token.split('.').count(), 3);
}

#[tokio::test]
async fn wrong_password_and_unknown_tax_id_fail_the_same_way() {
    let app = spawn_app().await;
    register_account(&app, "12345678901").await;

    let wrong_password = app.post_login("12345678901", "wrong").await;
    let unknown_tax_id = app.post_login("98765432109", "hunter2!").await;

    assert_eq!(wrong_password.status().as_u16(), 401);
    assert_eq!(unknown_tax_id.status().as_u16(), 401);
    let a: Value = wrong_password.json().await.unwrap();
    let b: Value = unknown_tax_id.json().await.unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn malformed_tax_id_gets_the_uniform_401() {
    let app = spawn_app().await;

    let response = app.post_login("123", "hunter2!").await;

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn fifth_failure_locks_the_account() {
    let app = spawn_app().await;
    register_account(&app, "12345678901").await;

    for _ in 0..4 {
        let response = app.post_login("12345678901", "wrong").await;
        assert_eq!(response.status().as_u16(), 401);
    }
    let response = app.post_login("12345678901", "wrong").await;
    assert_eq!(response.status().as_u16(), 401);

    // Locked now, even with the correct password.
    let response = app.post_login("12345678901", "hunter2!").await;
    assert_eq!(response.status().as_u16(), 423);
}

#[tokio::test]
async fn successful_login_resets_the_failure_counter() {
    let app = spawn_app().await;
    register_account(&app, "12345678901").await;

    for _ in 0..4 {
        app.post_login("12345678901", "wrong").await;
    }
    let response = app.post_login("12345678901", "hunter2!").await;
    assert_eq!(response.status().as_u16(), 200);

    // Four fresh attempts are available again.
    for _ in 0..4 {
        app.post_login("12345678901", "wrong").await;
    }
    let response = app.post_login("12345678901", "hunter2!").await;
    assert_eq!(response.status().as_u16(), 200);
}
