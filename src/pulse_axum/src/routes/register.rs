use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, NaiveDate, Utc};
use secrecy::Secret;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pulse_application::{NewAccount, NewAddress, RegisterUseCase};
use pulse_core::{AccountStore, Address, Clock, CredentialStore, PasswordHasher, Role, UserAccount};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AddressPayload {
    pub street: String,
    pub complement: Option<String>,
    pub neighborhood: String,
    pub postal_code: String,
    pub city: String,
    pub state: String,
}

impl From<AddressPayload> for NewAddress {
    fn from(payload: AddressPayload) -> Self {
        NewAddress {
            street: payload.street,
            complement: payload.complement,
            neighborhood: payload.neighborhood,
            postal_code: payload.postal_code,
            city: payload.city,
            state: payload.state,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub tax_id: String,
    pub birth_date: NaiveDate,
    pub address: AddressPayload,
    pub email: String,
    pub role: Role,
    pub password: Secret<String>,
}

#[derive(Debug, Serialize)]
pub struct AddressResponse {
    pub street: String,
    pub complement: Option<String>,
    pub neighborhood: String,
    pub postal_code: String,
    pub city: String,
    pub state: String,
}

impl From<&Address> for AddressResponse {
    fn from(address: &Address) -> Self {
        Self {
            street: address.street().to_owned(),
            complement: address.complement().map(str::to_owned),
            neighborhood: address.neighborhood().to_owned(),
            postal_code: address.postal_code().to_owned(),
            city: address.city().to_owned(),
            state: address.state().to_owned(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: Uuid,
    pub name: String,
    pub tax_id: String,
    pub birth_date: NaiveDate,
    pub address: AddressResponse,
    pub email: String,
    pub role: Role,
    pub registered_at: DateTime<Utc>,
    pub credential_id: Option<Uuid>,
}

impl From<&UserAccount> for AccountResponse {
    fn from(account: &UserAccount) -> Self {
        Self {
            id: account.id(),
            name: account.name().to_owned(),
            tax_id: account.tax_id().as_str().to_owned(),
            birth_date: account.birth_date(),
            address: AddressResponse::from(account.address()),
            email: account.email().to_owned(),
            role: account.role(),
            registered_at: account.registered_at(),
            credential_id: account.credential_id(),
        }
    }
}

#[tracing::instrument(name = "Register", skip(state, request))]
pub async fn register<A, C, H, K>(
    State(state): State<AppState<A, C, H, K>>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    A: AccountStore + Clone,
    C: CredentialStore + Clone,
    H: PasswordHasher + Clone,
    K: Clock + Clone,
{
    let password = pulse_core::Password::try_from(request.password)
        .map_err(ApiError::Validation)?;

    let data = NewAccount {
        name: request.name,
        tax_id: request.tax_id,
        birth_date: request.birth_date,
        address: request.address.into(),
        email: request.email,
        role: request.role,
    };

    let account = RegisterUseCase::new(
        state.accounts,
        state.credentials,
        state.hasher,
        state.clock,
    )
    .execute(data, password)
    .await?;

    Ok((StatusCode::CREATED, Json(AccountResponse::from(&account))))
}
