use axum::{Json, extract::State, response::IntoResponse};
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use pulse_application::AuthenticateUseCase;
use pulse_core::{AccountStore, Clock, CredentialStore, Password, PasswordHasher, TaxId};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub tax_id: String,
    pub password: Secret<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Login route. A malformed tax id or blank password gets the same 401 as a
/// wrong password, so responses never reveal which part was off.
#[tracing::instrument(name = "Login", skip(state, request))]
pub async fn login<A, C, H, K>(
    State(state): State<AppState<A, C, H, K>>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    A: AccountStore + Clone,
    C: CredentialStore + Clone,
    H: PasswordHasher + Clone,
    K: Clock + Clone,
{
    let tax_id = TaxId::parse(&request.tax_id).map_err(|_| ApiError::InvalidCredentials)?;
    let password =
        Password::try_from(request.password).map_err(|_| ApiError::InvalidCredentials)?;

    let authenticated =
        AuthenticateUseCase::new(state.credentials, state.hasher, state.lockout)
            .execute(tax_id, password)
            .await?;

    let token = state.tokens.issue(&authenticated)?;

    Ok(Json(LoginResponse { token }))
}
