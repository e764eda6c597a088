use secrecy::Secret;
use serde_json::{Value, json};
use uuid::Uuid;

use pulse_adapters::{
    Argon2PasswordHasher, InMemoryAccountStore, InMemoryCredentialStore, JwtConfig, SystemClock,
    TokenIssuer,
};
use pulse_axum::AppState;
use pulse_core::LockoutPolicy;
use pulse_service::RegistrationService;

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
}

/// Spin the service up on an ephemeral port, backed by in-memory stores.
pub async fn spawn_app() -> TestApp {
    let state = AppState {
        accounts: InMemoryAccountStore::new(),
        credentials: InMemoryCredentialStore::new(),
        hasher: Argon2PasswordHasher::new(),
        clock: SystemClock,
        tokens: TokenIssuer::new(JwtConfig {
            jwt_secret: Secret::from("test-secret".to_owned()),
            token_ttl_in_seconds: 600,
        }),
        lockout: LockoutPolicy::default(),
    };

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind ephemeral port");
    let address = format!("http://{}", listener.local_addr().unwrap());

    let service = RegistrationService::new(state);
    tokio::spawn(service.run_standalone(listener, None));

    TestApp {
        address,
        client: reqwest::Client::new(),
    }
}

impl TestApp {
    pub async fn post_account(&self, body: &Value) -> reqwest::Response {
        self.client
            .post(format!("{}/accounts", self.address))
            .json(body)
            .send()
            .await
            .expect("request failed")
    }

    pub async fn post_login(&self, tax_id: &str, password: &str) -> reqwest::Response {
        self.client
            .post(format!("{}/login", self.address))
            .json(&json!({ "tax_id": tax_id, "password": password }))
            .send()
            .await
            .expect("request failed")
    }

    pub async fn get_account(&self, id: Uuid) -> reqwest::Response {
        self.client
            .get(format!("{}/accounts/{id}", self.address))
            .send()
            .await
            .expect("request failed")
    }

    pub async fn get_credential_by_tax_id(&self, tax_id: &str) -> reqwest::Response {
        self.client
            .get(format!("{}/credentials/by-tax-id/{tax_id}", self.address))
            .send()
            .await
            .expect("request failed")
    }

    pub async fn put_password(&self, credential_id: Uuid, new_password: &str) -> reqwest::Response {
        self.client
            .put(format!(
                "{}/credentials/{credential_id}/password",
                self.address
            ))
            .json(&json!({ "new_password": new_password }))
            .send()
            .await
            .expect("request failed")
    }

    pub async fn post_unlock(&self, credential_id: Uuid) -> reqwest::Response {
        self.client
            .post(format!("{}/credentials/{credential_id}/unlock", self.address))
            .send()
            .await
            .expect("request failed")
    }
}

/// A complete valid registration payload. Override fields per test.
pub fn account_payload(tax_id: &str) -> Value {
    json!({
        "name": "Ana Souza",
        "tax_id": tax_id,
        "birth_date": "1990-03-14",
        "address": {
            "street": "Rua das Flores, 100",
            "complement": "ap 12",
            "neighborhood": "Centro",
            "postal_code": "01310100",
            "city": "São Paulo",
            "state": "SP"
        },
        "email": "ana@example.com",
        "role": "courier",
        "password": "hunter2!"
    })
}

/// Register an account and return the response body.
pub async fn register_account(app: &TestApp, tax_id: &str) -> Value {
    let response = app.post_account(&account_payload(tax_id)).await;
    assert_eq!(response.status().as_u16(), 201);
    response.json().await.expect("invalid response body")
}
