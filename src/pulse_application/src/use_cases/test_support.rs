//! Shared mocks for use case tests: in-memory stores with real version
//! semantics plus hooks for injecting failures, a spy hasher, and a fixed
//! clock.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};

use chrono::{DateTime, TimeZone, Utc};
use secrecy::{ExposeSecret, Secret};
use tokio::sync::RwLock;
use uuid::Uuid;

use pulse_core::{
    AccountStore, AccountStoreError, Address, Clock, Credential, CredentialStore,
    CredentialStoreError, HasherError, Password, PasswordHasher, Role, TaxId, UserAccount,
};

#[derive(Default, Clone)]
pub struct MockAccountStore {
    pub accounts: Arc<RwLock<HashMap<Uuid, UserAccount>>>,
    pub deletes: Arc<AtomicUsize>,
}

#[async_trait::async_trait]
impl AccountStore for MockAccountStore {
    async fn insert(&self, account: UserAccount) -> Result<(), AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&account.id()) {
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
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.accounts
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(AccountStoreError::NotFound)
    }
}

#[derive(Default, Clone)]
pub struct MockCredentialStore {
    pub credentials: Arc<RwLock<HashMap<Uuid, Credential>>>,
    pub fail_next_insert: Arc<AtomicBool>,
    pub forced_conflicts: Arc<AtomicU32>,
}

impl MockCredentialStore {
    pub async fn seed(&self, credential: Credential) {
        self.credentials
            .write()
            .await
            .insert(credential.id(), credential);
    }

    pub async fn get(&self, id: Uuid) -> Credential {
        self.credentials.read().await.get(&id).cloned().unwrap()
    }
}

#[async_trait::async_trait]
impl CredentialStore for MockCredentialStore {
    async fn insert(&self, credential: Credential) -> Result<(), CredentialStoreError> {
        if self.fail_next_insert.swap(false, Ordering::SeqCst) {
            return Err(CredentialStoreError::Unexpected("injected failure".into()));
        }
        let mut credentials = self.credentials.write().await;
        if credentials.contains_key(&credential.id())
            || credentials
                .values()
                .any(|c| c.tax_id() == credential.tax_id())
        {
            return Err(CredentialStoreError::AlreadyExists);
        }
        credentials.insert(credential.id(), credential);
        Ok(())
    }

    async fn update(&self, credential: Credential) -> Result<(), CredentialStoreError> {
        if self
            .forced_conflicts
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(CredentialStoreError::VersionConflict);
        }
        let mut credentials = self.credentials.write().await;
        let existing = credentials
            .get(&credential.id())
            .ok_or(CredentialStoreError::NotFound)?;
        if existing.version() != credential.version() {
            return Err(CredentialStoreError::VersionConflict);
        }
        let next_version = credential.version() + 1;
        credentials.insert(credential.id(), credential.with_version(next_version));
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Credential, CredentialStoreError> {
        self.credentials
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(CredentialStoreError::NotFound)
    }

    async fn find_by_tax_id(&self, tax_id: &TaxId) -> Result<Credential, CredentialStoreError> {
        self.credentials
            .read()
            .await
            .values()
            .find(|c| c.tax_id() == tax_id)
            .cloned()
            .ok_or(CredentialStoreError::NotFound)
    }

    async fn find_all(&self) -> Result<Vec<Credential>, CredentialStoreError> {
        Ok(self.credentials.read().await.values().cloned().collect())
    }

    async fn delete(&self, id: Uuid) -> Result<(), CredentialStoreError> {
        self.credentials
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(CredentialStoreError::NotFound)
    }
}

/// Hasher double that records how often `verify` runs, so tests can assert
/// that locked or unknown credentials never reach the expensive hash step.
#[derive(Default, Clone)]
pub struct SpyHasher {
    pub verify_calls: Arc<AtomicUsize>,
}

impl SpyHasher {
    pub fn verify_count(&self) -> usize {
        self.verify_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl PasswordHasher for SpyHasher {
    async fn hash(&self, password: &Password) -> Result<Secret<String>, HasherError> {
        Ok(Secret::from(format!(
            "hashed:{}",
            password.as_ref().expose_secret()
        )))
    }

    async fn verify(
        &self,
        password: &Password,
        digest: &Secret<String>,
    ) -> Result<bool, HasherError> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        Ok(digest.expose_secret() == &format!("hashed:{}", password.as_ref().expose_secret()))
    }
}

#[derive(Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Default for FixedClock {
    fn default() -> Self {
        Self(Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn tax_id() -> TaxId {
    TaxId::parse("12345678901").unwrap()
}

pub fn password(raw: &str) -> Password {
    Password::try_from(Secret::from(raw.to_string())).unwrap()
}

pub fn address() -> Address {
    Address::new("Rua A", None, "Centro", "01310100", "São Paulo", "SP").unwrap()
}

pub async fn seed_credential(store: &MockCredentialStore, raw_password: &str) -> Credential {
    let credential = Credential::new(
        tax_id(),
        Secret::from(format!("hashed:{raw_password}")),
        Uuid::new_v4(),
    )
    .unwrap();
    store.seed(credential.clone()).await;
    credential
}

pub fn account(clock: &FixedClock) -> UserAccount {
    UserAccount::new(
        "Ana Souza",
        tax_id(),
        chrono::NaiveDate::from_ymd_opt(1990, 3, 14).unwrap(),
        address(),
        "ana@example.com",
        Role::Courier,
        None,
        clock.now(),
    )
    .unwrap()
}
