use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use pulse_application::AuthenticatedAccount;

#[derive(Clone)]
pub struct JwtConfig {
    pub jwt_secret: Secret<String>,
    pub token_ttl_in_seconds: i64,
}

impl JwtConfig {
    pub fn as_bytes(&self) -> &[u8] {
        self.jwt_secret.expose_secret().as_bytes()
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token error: {0}")]
    TokenError(jsonwebtoken::errors::Error),
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,
    pub account_id: Uuid,
    pub tax_id: String,
    pub exp: usize,
}

/// Signs session tokens for authenticated accounts. The subject is the
/// credential id; the owning account and tax id ride along as claims.
#[derive(Clone)]
pub struct TokenIssuer {
    config: JwtConfig,
}

impl TokenIssuer {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }

    pub fn issue(&self, account: &AuthenticatedAccount) -> Result<String, TokenError> {
        let delta = chrono::Duration::try_seconds(self.config.token_ttl_in_seconds).ok_or(
            TokenError::UnexpectedError("Failed to create token duration".to_string()),
        )?;

        let exp = Utc::now()
            .checked_add_signed(delta)
            .ok_or(TokenError::UnexpectedError(
                "Duration out of range".to_string(),
            ))?
            .timestamp();

        let exp: usize = exp
            .try_into()
            .map_err(|_| TokenError::UnexpectedError("Failed to cast i64 to usize".to_string()))?;

        let claims = Claims {
            sub: account.credential_id,
            account_id: account.account_id,
            tax_id: account.tax_id.as_str().to_owned(),
            exp,
        };

        encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.as_bytes()),
        )
        .map_err(TokenError::TokenError)
    }

    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(TokenError::TokenError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_core::TaxId;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(JwtConfig {
            jwt_secret: Secret::from("secret".to_owned()),
            token_ttl_in_seconds: 600,
        })
    }

    fn authenticated() -> AuthenticatedAccount {
        AuthenticatedAccount {
            credential_id: Uuid::new_v4(),
            account_id: Uuid::new_v4(),
            tax_id: TaxId::parse("12345678901").unwrap(),
        }
    }

    #[test]
    fn issued_token_round_trips() {
        let issuer = issuer();
        let account = authenticated();

        let token = issuer.issue(&account).unwrap();
        assert_eq!(token.split('.').count(), 3);

        let claims = issuer.decode(&token).unwrap();
        assert_eq!(claims.sub, account.credential_id);
        assert_eq!(claims.account_id, account.account_id);
        assert_eq!(claims.tax_id, "12345678901");

        let soon = Utc::now()
            .checked_add_signed(chrono::Duration::try_minutes(9).expect("valid duration"))
            .expect("valid timestamp")
            .timestamp();
        assert!(claims.exp > soon as usize);
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(matches!(
            issuer().decode("invalid_token"),
            Err(TokenError::TokenError(_))
        ));
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let other = TokenIssuer::new(JwtConfig {
            jwt_secret: Secret::from("another secret".to_owned()),
            token_ttl_in_seconds: 600,
        });
        let token = other.issue(&authenticated()).unwrap();
        assert!(issuer().decode(&token).is_err());
    }
}
