use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use pulse_core::{AccountStore, AccountStoreError, UserAccount};

/// In-memory account store for tests and single-instance deployments.
/// Clone shares the underlying map.
#[derive(Default, Clone)]
pub struct InMemoryAccountStore {
    accounts: Arc<RwLock<HashMap<Uuid, UserAccount>>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait::async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn insert(&self, account: UserAccount) -> Result<(), AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&account.id())
            || accounts.values().any(|a| a.tax_id() == account.tax_id())
        {
            return Err(AccountStoreError::AlreadyExists);
        }
        accounts.insert(account.id(), account);
        Ok(())
    }

    async fn update(&self, account: UserAccount) -> Result<(), AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        if !accounts.contains_key(&account.id()) {
            return Err(AccountStoreError::NotFound);
        }
        accounts.insert(account.id(), account);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<UserAccount, AccountStoreError> {
        self.accounts
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(AccountStoreError::NotFound)
    }

    async fn find_all(&self) -> Result<Vec<UserAccount>, AccountStoreError> {
        Ok(self.accounts.read().await.values().cloned().collect())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AccountStoreError> {
        self.accounts
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(AccountStoreError::NotFound)
    }
}
