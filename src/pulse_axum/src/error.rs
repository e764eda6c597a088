use axum::{Json, http::StatusCode, response::IntoResponse};
use thiserror::Error;

use pulse_adapters::TokenError;
use pulse_application::{
    AccountQueryError, AuthenticationError, ChangePasswordError, CredentialQueryError,
    DeleteAccountError, RegisterError, UnlockError, UpdateAccountError,
};
use pulse_core::ValidationError;

/// One error type for every route, so status mapping lives in one place.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(ValidationError),

    #[error("{0}")]
    NotFound(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account locked after repeated failed login attempts")]
    AccountLocked,

    #[error("An account with this tax id already exists")]
    AlreadyExists,

    #[error("Internal error")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::AccountLocked => StatusCode::LOCKED,
            ApiError::AlreadyExists => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = match &self {
            ApiError::Validation(err) => serde_json::json!({
                "error": err.to_string(),
                "violations": err.violations(),
            }),
            // The detail stays in the logs.
            ApiError::Internal(detail) => {
                tracing::error!(%detail, "request failed");
                serde_json::json!({ "error": "Internal error" })
            }
            other => serde_json::json!({ "error": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<RegisterError> for ApiError {
    fn from(e: RegisterError) -> Self {
        match e {
            RegisterError::Validation(err) => ApiError::Validation(err),
            RegisterError::AlreadyExists => ApiError::AlreadyExists,
            RegisterError::Infrastructure(detail) => ApiError::Internal(detail),
        }
    }
}

impl From<AuthenticationError> for ApiError {
    fn from(e: AuthenticationError) -> Self {
        match e {
            AuthenticationError::InvalidCredentials => ApiError::InvalidCredentials,
            AuthenticationError::AccountLocked => ApiError::AccountLocked,
            AuthenticationError::Infrastructure(detail) => ApiError::Internal(detail),
        }
    }
}

impl From<AccountQueryError> for ApiError {
    fn from(e: AccountQueryError) -> Self {
        match e {
            AccountQueryError::NotFound => ApiError::NotFound("Account not found".into()),
            AccountQueryError::Infrastructure(detail) => ApiError::Internal(detail),
        }
    }
}

impl From<UpdateAccountError> for ApiError {
    fn from(e: UpdateAccountError) -> Self {
        match e {
            UpdateAccountError::NotFound => ApiError::NotFound("Account not found".into()),
            UpdateAccountError::Validation(err) => ApiError::Validation(err),
            UpdateAccountError::Infrastructure(detail) => ApiError::Internal(detail),
        }
    }
}

impl From<DeleteAccountError> for ApiError {
    fn from(e: DeleteAccountError) -> Self {
        match e {
            DeleteAccountError::NotFound => ApiError::NotFound("Account not found".into()),
            DeleteAccountError::Infrastructure(detail) => ApiError::Internal(detail),
        }
    }
}

impl From<ChangePasswordError> for ApiError {
    fn from(e: ChangePasswordError) -> Self {
        match e {
            ChangePasswordError::NotFound => ApiError::NotFound("Login record not found".into()),
            ChangePasswordError::Validation(err) => ApiError::Validation(err),
            ChangePasswordError::Infrastructure(detail) => ApiError::Internal(detail),
        }
    }
}

impl From<UnlockError> for ApiError {
    fn from(e: UnlockError) -> Self {
        match e {
            UnlockError::NotFound => ApiError::NotFound("Login record not found".into()),
            UnlockError::Infrastructure(detail) => ApiError::Internal(detail),
        }
    }
}

impl From<CredentialQueryError> for ApiError {
    fn from(e: CredentialQueryError) -> Self {
        match e {
            CredentialQueryError::NotFound => ApiError::NotFound("Login record not found".into()),
            CredentialQueryError::Infrastructure(detail) => ApiError::Internal(detail),
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(e: TokenError) -> Self {
        ApiError::Internal(e.to_string())
    }
}
