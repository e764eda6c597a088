use uuid::Uuid;

use pulse_core::{AccountStore, AccountStoreError, UserAccount};

#[derive(Debug, thiserror::Error)]
pub enum AccountQueryError {
    #[error("Account not found")]
    NotFound,
    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl From<AccountStoreError> for AccountQueryError {
    fn from(e: AccountStoreError) -> Self {
        match e {
            AccountStoreError::NotFound => AccountQueryError::NotFound,
            e => AccountQueryError::Infrastructure(e.to_string()),
        }
    }
}

/// Account lookups: single account by id, or the full listing.
pub struct GetAccountUseCase<A>
where
    A: AccountStore,
{
    account_store: A,
}

impl<A> GetAccountUseCase<A>
where
    A: AccountStore,
{
    pub fn new(account_store: A) -> Self {
        Self { account_store }
    }

    #[tracing::instrument(name = "GetAccountUseCase::by_id", skip(self))]
    pub async fn by_id(&self, id: Uuid) -> Result<UserAccount, AccountQueryError> {
        Ok(self.account_store.find_by_id(id).await?)
    }

    #[tracing::instrument(name = "GetAccountUseCase::list", skip(self))]
    pub async fn list(&self) -> Result<Vec<UserAccount>, AccountQueryError> {
        Ok(self.account_store.find_all().await?)
    }
}
