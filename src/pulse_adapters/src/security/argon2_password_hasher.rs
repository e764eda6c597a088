use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{PasswordHasher as _, SaltString, rand_core},
};
use secrecy::{ExposeSecret, Secret};

use pulse_core::{HasherError, Password, PasswordHasher};

/// Argon2id hasher. Salting happens per call, so hashing the same password
/// twice yields two different digests that both verify.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self
    }
}

fn argon2() -> Result<Argon2<'static>, String> {
    Ok(Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(15000, 2, 1, None).map_err(|e| e.to_string())?,
    ))
}

#[async_trait::async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    #[tracing::instrument(name = "Computing password hash", skip_all)]
    async fn hash(&self, password: &Password) -> Result<Secret<String>, HasherError> {
        let password = password.as_ref().expose_secret().clone();
        let current_span: tracing::Span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(move || {
                let salt: SaltString = SaltString::generate(rand_core::OsRng);
                argon2()?
                    .hash_password(password.as_bytes(), &salt)
                    .map(|h| Secret::from(h.to_string()))
                    .map_err(|e| e.to_string())
            })
        })
        .await
        .map_err(|e| HasherError::Unexpected(e.to_string()))?
        .map_err(HasherError::Unexpected)
    }

    #[tracing::instrument(name = "Verifying password hash", skip_all)]
    async fn verify(
        &self,
        password: &Password,
        digest: &Secret<String>,
    ) -> Result<bool, HasherError> {
        let password = password.as_ref().expose_secret().clone();
        let digest = digest.expose_secret().clone();
        let current_span: tracing::Span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(|| {
                // A digest that does not parse cannot match any password.
                let Ok(expected) = PasswordHash::new(&digest) else {
                    return Ok(false);
                };
                let hasher = argon2().map_err(HasherError::Unexpected)?;
                Ok(hasher
                    .verify_password(password.as_bytes(), &expected)
                    .is_ok())
            })
        })
        .await
        .map_err(|e| HasherError::Unexpected(e.to_string()))?
    }
}
