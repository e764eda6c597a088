use uuid::Uuid;

use pulse_core::{AccountStore, AccountStoreError, CredentialStore, CredentialStoreError};

#[derive(Debug, thiserror::Error)]
pub enum DeleteAccountError {
    #[error("Account not found")]
    NotFound,
    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

/// Delete account use case - removes the account and cascades to its login
/// record. A credential is never deleted on its own.
pub struct DeleteAccountUseCase<A, C>
where
    A: AccountStore,
    C: CredentialStore,
{
    account_store: A,
    credential_store: C,
}

impl<A, C> DeleteAccountUseCase<A, C>
where
    A: AccountStore,
    C: CredentialStore,
{
    pub fn new(account_store: A, credential_store: C) -> Self {
        Self {
            account_store,
            credential_store,
        }
    }

    #[tracing::instrument(name = "DeleteAccountUseCase::execute", skip(self))]
    pub async fn execute(&self, id: Uuid) -> Result<(), DeleteAccountError> {
        let account = match self.account_store.find_by_id(id).await {
            Ok(account) => account,
            Err(AccountStoreError::NotFound) => return Err(DeleteAccountError::NotFound),
            Err(e) => return Err(DeleteAccountError::Infrastructure(e.to_string())),
        };

        self.account_store.delete(id).await.map_err(|e| match e {
            AccountStoreError::NotFound => DeleteAccountError::NotFound,
            e => DeleteAccountError::Infrastructure(e.to_string()),
        })?;

        // Cascade. A store with native cascade semantics (foreign key) may
        // already have removed the credential; that is not an error here.
        if let Some(credential_id) = account.credential_id() {
            match self.credential_store.delete(credential_id).await {
                Ok(()) | Err(CredentialStoreError::NotFound) => {}
                Err(e) => return Err(DeleteAccountError::Infrastructure(e.to_string())),
            }
        }

        Ok(())
    }
}
