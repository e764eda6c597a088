use uuid::Uuid;

use pulse_core::{Credential, CredentialStore, CredentialStoreError, TaxId};

/// Read projection of a login record. The hash never leaves the store layer
/// through a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialSummary {
    pub id: Uuid,
    pub tax_id: TaxId,
    pub account_id: Uuid,
    pub failed_attempts: u32,
    pub locked: bool,
}

impl From<&Credential> for CredentialSummary {
    fn from(credential: &Credential) -> Self {
        Self {
            id: credential.id(),
            tax_id: credential.tax_id().clone(),
            account_id: credential.account_id(),
            failed_attempts: credential.failed_attempts(),
            locked: credential.is_locked(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CredentialQueryError {
    #[error("Login record not found")]
    NotFound,
    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl From<CredentialStoreError> for CredentialQueryError {
    fn from(e: CredentialStoreError) -> Self {
        match e {
            CredentialStoreError::NotFound => CredentialQueryError::NotFound,
            e => CredentialQueryError::Infrastructure(e.to_string()),
        }
    }
}

/// Credential lookups by id or tax id, as safe projections.
pub struct CredentialQueryUseCase<C>
where
    C: CredentialStore,
{
    credential_store: C,
}

impl<C> CredentialQueryUseCase<C>
where
    C: CredentialStore,
{
    pub fn new(credential_store: C) -> Self {
        Self { credential_store }
    }

    #[tracing::instrument(name = "CredentialQueryUseCase::by_id", skip(self))]
    pub async fn by_id(&self, id: Uuid) -> Result<CredentialSummary, CredentialQueryError> {
        let credential = self.credential_store.find_by_id(id).await?;
        Ok(CredentialSummary::from(&credential))
    }

    #[tracing::instrument(name = "CredentialQueryUseCase::by_tax_id", skip_all)]
    pub async fn by_tax_id(
        &self,
        tax_id: &TaxId,
    ) -> Result<CredentialSummary, CredentialQueryError> {
        let credential = self.credential_store.find_by_tax_id(tax_id).await?;
        Ok(CredentialSummary::from(&credential))
    }
}
