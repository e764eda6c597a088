use secrecy::{ExposeSecret, Secret};

use crate::domain::validation::ValidationError;

/// Plaintext password, kept behind `secrecy` so it never leaks through
/// `Debug` output or tracing spans. Only the hasher ever reads it.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl TryFrom<Secret<String>> for Password {
    type Error = ValidationError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        if value.expose_secret().trim().is_empty() {
            return Err(ValidationError::single("password", "must not be empty"));
        }
        Ok(Self(value))
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}
