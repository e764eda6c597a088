use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use secrecy::Secret;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pulse_application::{
    ChangePasswordUseCase, CredentialQueryUseCase, CredentialSummary, UnlockUseCase,
};
use pulse_core::{AccountStore, Clock, CredentialStore, Password, PasswordHasher, TaxId};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CredentialResponse {
    pub id: Uuid,
    pub tax_id: String,
    pub account_id: Uuid,
    pub failed_attempts: u32,
    pub locked: bool,
}

impl From<CredentialSummary> for CredentialResponse {
    fn from(summary: CredentialSummary) -> Self {
        Self {
            id: summary.id,
            tax_id: summary.tax_id.as_str().to_owned(),
            account_id: summary.account_id,
            failed_attempts: summary.failed_attempts,
            locked: summary.locked,
        }
    }
}

#[tracing::instrument(name = "Get credential", skip(state))]
pub async fn get_credential<A, C, H, K>(
    State(state): State<AppState<A, C, H, K>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError>
where
    A: AccountStore + Clone,
    C: CredentialStore + Clone,
    H: PasswordHasher + Clone,
    K: Clock + Clone,
{
    let summary = CredentialQueryUseCase::new(state.credentials)
        .by_id(id)
        .await?;
    Ok(Json(CredentialResponse::from(summary)))
}

#[tracing::instrument(name = "Get credential by tax id", skip_all)]
pub async fn get_credential_by_tax_id<A, C, H, K>(
    State(state): State<AppState<A, C, H, K>>,
    Path(tax_id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    A: AccountStore + Clone,
    C: CredentialStore + Clone,
    H: PasswordHasher + Clone,
    K: Clock + Clone,
{
    let tax_id = TaxId::parse(&tax_id).map_err(ApiError::Validation)?;
    let summary = CredentialQueryUseCase::new(state.credentials)
        .by_tax_id(&tax_id)
        .await?;
    Ok(Json(CredentialResponse::from(summary)))
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub new_password: Secret<String>,
}

#[tracing::instrument(name = "Change password", skip(state, request))]
pub async fn change_password<A, C, H, K>(
    State(state): State<AppState<A, C, H, K>>,
    Path(id): Path<Uuid>,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    A: AccountStore + Clone,
    C: CredentialStore + Clone,
    H: PasswordHasher + Clone,
    K: Clock + Clone,
{
    let password = Password::try_from(request.new_password).map_err(ApiError::Validation)?;
    ChangePasswordUseCase::new(state.credentials, state.hasher)
        .execute(id, password)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[tracing::instrument(name = "Unlock credential", skip(state))]
pub async fn unlock<A, C, H, K>(
    State(state): State<AppState<A, C, H, K>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError>
where
    A: AccountStore + Clone,
    C: CredentialStore + Clone,
    H: PasswordHasher + Clone,
    K: Clock + Clone,
{
    UnlockUseCase::new(state.credentials).execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
