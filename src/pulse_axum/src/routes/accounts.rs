use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use pulse_application::{
    AccountUpdateRequest, DeleteAccountUseCase, GetAccountUseCase, UpdateAccountUseCase,
};
use pulse_core::{AccountStore, Clock, CredentialStore, PasswordHasher, Role};

use crate::error::ApiError;
use crate::routes::register::{AccountResponse, AddressPayload};
use crate::state::AppState;

#[tracing::instrument(name = "Get account", skip(state))]
pub async fn get_account<A, C, H, K>(
    State(state): State<AppState<A, C, H, K>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError>
where
    A: AccountStore + Clone,
    C: CredentialStore + Clone,
    H: PasswordHasher + Clone,
    K: Clock + Clone,
{
    let account = GetAccountUseCase::new(state.accounts).by_id(id).await?;
    Ok(Json(AccountResponse::from(&account)))
}

#[tracing::instrument(name = "List accounts", skip(state))]
pub async fn list_accounts<A, C, H, K>(
    State(state): State<AppState<A, C, H, K>>,
) -> Result<impl IntoResponse, ApiError>
where
    A: AccountStore + Clone,
    C: CredentialStore + Clone,
    H: PasswordHasher + Clone,
    K: Clock + Clone,
{
    let accounts = GetAccountUseCase::new(state.accounts).list().await?;
    let response: Vec<AccountResponse> = accounts.iter().map(AccountResponse::from).collect();
    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
pub struct UpdateAccountPayload {
    pub name: String,
    pub birth_date: NaiveDate,
    pub address: AddressPayload,
    pub email: String,
    pub role: Role,
}

#[tracing::instrument(name = "Update account", skip(state, request))]
pub async fn update_account<A, C, H, K>(
    State(state): State<AppState<A, C, H, K>>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateAccountPayload>,
) -> Result<impl IntoResponse, ApiError>
where
    A: AccountStore + Clone,
    C: CredentialStore + Clone,
    H: PasswordHasher + Clone,
    K: Clock + Clone,
{
    let account = UpdateAccountUseCase::new(state.accounts, state.clock)
        .execute(
            id,
            AccountUpdateRequest {
                name: request.name,
                birth_date: request.birth_date,
                address: request.address.into(),
                email: request.email,
                role: request.role,
            },
        )
        .await?;
    Ok(Json(AccountResponse::from(&account)))
}

#[tracing::instrument(name = "Delete account", skip(state))]
pub async fn delete_account<A, C, H, K>(
    State(state): State<AppState<A, C, H, K>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError>
where
    A: AccountStore + Clone,
    C: CredentialStore + Clone,
    H: PasswordHasher + Clone,
    K: Clock + Clone,
{
    DeleteAccountUseCase::new(state.accounts, state.credentials)
        .execute(id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
