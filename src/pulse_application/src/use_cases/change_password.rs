use uuid::Uuid;

use pulse_core::{
    CredentialStore, CredentialStoreError, Password, PasswordHasher, ValidationError,
};

use crate::use_cases::authenticate::MAX_CONFLICT_RETRIES;

#[derive(Debug, thiserror::Error)]
pub enum ChangePasswordError {
    #[error("Login record not found")]
    NotFound,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

/// Change password use case - replaces the stored hash. Deliberately leaves
/// the attempt counter alone; unlocking is a separate, separately authorized
/// operation.
pub struct ChangePasswordUseCase<C, H>
where
    C: CredentialStore,
    H: PasswordHasher,
{
    credential_store: C,
    hasher: H,
}

impl<C, H> ChangePasswordUseCase<C, H>
where
    C: CredentialStore,
    H: PasswordHasher,
{
    pub fn new(credential_store: C, hasher: H) -> Self {
        Self {
            credential_store,
            hasher,
        }
    }

    #[tracing::instrument(name = "ChangePasswordUseCase::execute", skip(self, new_password))]
    pub async fn execute(
        &self,
        credential_id: Uuid,
        new_password: Password,
    ) -> Result<(), ChangePasswordError> {
        let digest = self
            .hasher
            .hash(&new_password)
            .await
            .map_err(|e| ChangePasswordError::Infrastructure(e.to_string()))?;

        for _ in 0..MAX_CONFLICT_RETRIES {
            let mut credential = match self.credential_store.find_by_id(credential_id).await {
                Ok(credential) => credential,
                Err(CredentialStoreError::NotFound) => return Err(ChangePasswordError::NotFound),
                Err(e) => return Err(ChangePasswordError::Infrastructure(e.to_string())),
            };

            credential.set_password_hash(digest.clone())?;

            match self.credential_store.update(credential).await {
                Ok(()) => return Ok(()),
                Err(CredentialStoreError::VersionConflict) => continue,
                Err(e) => return Err(ChangePasswordError::Infrastructure(e.to_string())),
            }
        }

        Err(ChangePasswordError::Infrastructure(
            "password update kept conflicting with concurrent updates".to_string(),
        ))
    }
}
