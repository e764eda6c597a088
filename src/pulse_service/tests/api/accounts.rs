use serde_json::{Value, json};
use uuid::Uuid;

use crate::helpers::{register_account, spawn_app};

fn update_payload() -> Value {
    json!({
        "name": "Ana S. Lima",
        "birth_date": "1990-03-14",
        "address": {
            "street": "Rua Nova, 200",
            "complement": null,
            "neighborhood": "Jardins",
            "postal_code": "04500100",
            "city": "São Paulo",
            "state": "SP"
        },
        "email": "ana.lima@example.com",
        "role": "manager"
    })
}

#[tokio::test]
async fn stored_account_can_be_fetched_and_listed() {
    let app = spawn_app().await;
    let account = register_account(&app, "12345678901").await;
    let id: Uuid = account["id"].as_str().unwrap().parse().unwrap();

    let response = app.get_account(id).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["tax_id"], "12345678901");

    let response = app
        .client
        .get(format!("{}/accounts", app.address))
        .send()
        .await
        .unwrap();
    let list: Vec<Value> = response.json().await.unwrap();
    assert_eq!(list.len(), 1);
}

#[tokio::test]
async fn update_replaces_the_profile_but_not_the_tax_id() {
    let app = spawn_app().await;
    let account = register_account(&app, "12345678901").await;
    let id: Uuid = account["id"].as_str().unwrap().parse().unwrap();

    let response = app
        .client
        .put(format!("{}/accounts/{id}", app.address))
        .json(&update_payload())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["name"], "Ana S. Lima");
    assert_eq!(body["role"], "manager");
    assert_eq!(body["address"]["neighborhood"], "Jardins");
    assert_eq!(body["tax_id"], "12345678901");
}

#[tokio::test]
async fn invalid_update_is_rejected_and_nothing_changes() {
    let app = spawn_app().await;
    let account = register_account(&app, "12345678901").await;
    let id: Uuid = account["id"].as_str().unwrap().parse().unwrap();

    let mut payload = update_payload();
    payload["email"] = Value::from("broken");
    let response = app
        .client
        .put(format!("{}/accounts/{id}", app.address))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 422);

    let body: Value = app.get_account(id).await.json().await.unwrap();
    assert_eq!(body["email"], "ana@example.com");
}

#[tokio::test]
async fn deleting_an_account_cascades_to_its_credential() {
    let app = spawn_app().await;
    let account = register_account(&app, "12345678901").await;
    let id: Uuid = account["id"].as_str().unwrap().parse().unwrap();

    let response = app
        .client
        .delete(format!("{}/accounts/{id}", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 204);

    assert_eq!(app.get_account(id).await.status().as_u16(), 404);
    assert_eq!(
        app.get_credential_by_tax_id("12345678901")
            .await
            .status()
            .as_u16(),
        404
    );
    // Login for the deleted account fails uniformly.
    assert_eq!(
        app.post_login("12345678901", "hunter2!").await.status().as_u16(),
        401
    );
}

#[tokio::test]
async fn unknown_account_is_404() {
    let app = spawn_app().await;
    assert_eq!(app.get_account(Uuid::new_v4()).await.status().as_u16(), 404);
}
