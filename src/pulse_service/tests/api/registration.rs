use serde_json::Value;

use crate::helpers::{account_payload, register_account, spawn_app};

#[tokio::test]
async fn registering_a_valid_account_returns_201_with_a_credential() {
    let app = spawn_app().await;

    let body = register_account(&app, "12345678901").await;

    assert_eq!(body["name"], "Ana Souza");
    assert_eq!(body["tax_id"], "12345678901");
    assert_eq!(body["role"], "courier");
    assert!(body["id"].is_string());
    assert!(body["credential_id"].is_string());
    assert_eq!(body["address"]["postal_code"], "01310100");
    // The hash never shows up in any response.
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn duplicate_tax_id_is_rejected_with_409() {
    let app = spawn_app().await;
    register_account(&app, "12345678901").await;

    let response = app.post_account(&account_payload("12345678901")).await;

    assert_eq!(response.status().as_u16(), 409);
}

#[tokio::test]
async fn invalid_profile_is_rejected_with_every_violation_reported() {
    let app = spawn_app().await;
    let mut payload = account_payload("12345678901");
    payload["name"] = Value::from("   ");
    payload["email"] = Value::from("not-an-email");
    payload["birth_date"] = Value::from("2015-01-01");

    let response = app.post_account(&payload).await;

    assert_eq!(response.status().as_u16(), 422);
    let body: Value = response.json().await.unwrap();
    let fields: Vec<&str> = body["violations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["name", "email", "birth_date"]);
}

#[tokio::test]
async fn malformed_tax_id_is_rejected() {
    let app = spawn_app().await;

    let response = app.post_account(&account_payload("123")).await;

    assert_eq!(response.status().as_u16(), 422);
}

#[tokio::test]
async fn malformed_postal_code_is_rejected() {
    let app = spawn_app().await;
    let mut payload = account_payload("12345678901");
    payload["address"]["postal_code"] = Value::from("01310-100");

    let response = app.post_account(&payload).await;

    assert_eq!(response.status().as_u16(), 422);
}

#[tokio::test]
async fn blank_password_is_rejected_before_any_write() {
    let app = spawn_app().await;
    let mut payload = account_payload("12345678901");
    payload["password"] = Value::from("   ");

    let response = app.post_account(&payload).await;
    assert_eq!(response.status().as_u16(), 422);

    // The tax id is still free.
    let response = app.post_account(&account_payload("12345678901")).await;
    assert_eq!(response.status().as_u16(), 201);
}
