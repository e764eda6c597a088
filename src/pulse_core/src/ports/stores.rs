use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{credential::Credential, tax_id::TaxId, user_account::UserAccount};

// AccountStore port trait and errors
#[derive(Debug, Error)]
pub enum AccountStoreError {
    #[error("Account already exists")]
    AlreadyExists,
    #[error("Account not found")]
    NotFound,
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl PartialEq for AccountStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::AlreadyExists, Self::AlreadyExists)
                | (Self::NotFound, Self::NotFound)
                | (Self::Unexpected(_), Self::Unexpected(_))
        )
    }
}

#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn insert(&self, account: UserAccount) -> Result<(), AccountStoreError>;
    async fn update(&self, account: UserAccount) -> Result<(), AccountStoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<UserAccount, AccountStoreError>;
    async fn find_all(&self) -> Result<Vec<UserAccount>, AccountStoreError>;
    async fn delete(&self, id: Uuid) -> Result<(), AccountStoreError>;
}

// CredentialStore port trait and errors
#[derive(Debug, Error)]
pub enum CredentialStoreError {
    #[error("Login record already exists")]
    AlreadyExists,
    #[error("Login record not found")]
    NotFound,
    #[error("Login record was updated concurrently")]
    VersionConflict,
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl PartialEq for CredentialStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::AlreadyExists, Self::AlreadyExists)
                | (Self::NotFound, Self::NotFound)
                | (Self::VersionConflict, Self::VersionConflict)
                | (Self::Unexpected(_), Self::Unexpected(_))
        )
    }
}

#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn insert(&self, credential: Credential) -> Result<(), CredentialStoreError>;
    /// Version-checked write: rejected with [`CredentialStoreError::VersionConflict`]
    /// when the caller read a stale record.
    async fn update(&self, credential: Credential) -> Result<(), CredentialStoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Credential, CredentialStoreError>;
    async fn find_by_tax_id(&self, tax_id: &TaxId) -> Result<Credential, CredentialStoreError>;
    async fn find_all(&self) -> Result<Vec<Credential>, CredentialStoreError>;
    async fn delete(&self, id: Uuid) -> Result<(), CredentialStoreError>;
}
