use uuid::Uuid;

use pulse_core::{CredentialStore, CredentialStoreError};

use crate::use_cases::authenticate::MAX_CONFLICT_RETRIES;

#[derive(Debug, thiserror::Error)]
pub enum UnlockError {
    #[error("Login record not found")]
    NotFound,
    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

/// Unlock use case - administrative reset of the failed-attempt counter,
/// with no password check. Callers authorize this differently from a login.
pub struct UnlockUseCase<C>
where
    C: CredentialStore,
{
    credential_store: C,
}

impl<C> UnlockUseCase<C>
where
    C: CredentialStore,
{
    pub fn new(credential_store: C) -> Self {
        Self { credential_store }
    }

    #[tracing::instrument(name = "UnlockUseCase::execute", skip(self))]
    pub async fn execute(&self, credential_id: Uuid) -> Result<(), UnlockError> {
        for _ in 0..MAX_CONFLICT_RETRIES {
            let mut credential = match self.credential_store.find_by_id(credential_id).await {
                Ok(credential) => credential,
                Err(CredentialStoreError::NotFound) => return Err(UnlockError::NotFound),
                Err(e) => return Err(UnlockError::Infrastructure(e.to_string())),
            };

            credential.unlock();

            match self.credential_store.update(credential).await {
                Ok(()) => return Ok(()),
                Err(CredentialStoreError::VersionConflict) => continue,
                Err(e) => return Err(UnlockError::Infrastructure(e.to_string())),
            }
        }

        Err(UnlockError::Infrastructure(
            "unlock kept conflicting with concurrent updates".to_string(),
        ))
    }
}
