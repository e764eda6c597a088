use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use secrecy::Secret;
use thiserror::Error;

use crate::domain::password::Password;

#[derive(Debug, Error)]
pub enum HasherError {
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// One-way password hashing. Implementations must salt per call (two hashes
/// of the same password differ) and must be deliberately expensive.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &Password) -> Result<Secret<String>, HasherError>;

    /// A malformed digest verifies as `false`, never as an error.
    async fn verify(
        &self,
        password: &Password,
        digest: &Secret<String>,
    ) -> Result<bool, HasherError>;
}

/// Source of "now" for registration timestamps and age validation.
/// Injectable so tests run against a fixed date.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}
