use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use pulse_core::{Credential, CredentialStore, CredentialStoreError, TaxId};

/// In-memory credential store with the same optimistic-concurrency contract
/// as the Postgres store: updates carrying a stale version are rejected.
/// A secondary index serves the tax-id lookup on the login path.
#[derive(Default, Clone)]
pub struct InMemoryCredentialStore {
    credentials: Arc<DashMap<Uuid, Credential>>,
    by_tax_id: Arc<DashMap<TaxId, Uuid>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn insert(&self, credential: Credential) -> Result<(), CredentialStoreError> {
        if self.credentials.contains_key(&credential.id()) {
            return Err(CredentialStoreError::AlreadyExists);
        }
        // The index entry guard keeps a second insert for the same tax id
        // out until the record is in place.
        match self.by_tax_id.entry(credential.tax_id().clone()) {
            Entry::Occupied(_) => Err(CredentialStoreError::AlreadyExists),
            Entry::Vacant(vacant) => {
                let id = credential.id();
                self.credentials.insert(id, credential);
                vacant.insert(id);
                Ok(())
            }
        }
    }

    async fn update(&self, credential: Credential) -> Result<(), CredentialStoreError> {
        let mut entry = self
            .credentials
            .get_mut(&credential.id())
            .ok_or(CredentialStoreError::NotFound)?;
        if entry.version() != credential.version() {
            return Err(CredentialStoreError::VersionConflict);
        }
        let next_version = credential.version() + 1;
        *entry = credential.with_version(next_version);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Credential, CredentialStoreError> {
        self.credentials
            .get(&id)
            .map(|c| c.clone())
            .ok_or(CredentialStoreError::NotFound)
    }

    async fn find_by_tax_id(&self, tax_id: &TaxId) -> Result<Credential, CredentialStoreError> {
        let id = *self
            .by_tax_id
            .get(tax_id)
            .ok_or(CredentialStoreError::NotFound)?;
        self.find_by_id(id).await
    }

    async fn find_all(&self) -> Result<Vec<Credential>, CredentialStoreError> {
        Ok(self
            .credentials
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn delete(&self, id: Uuid) -> Result<(), CredentialStoreError> {
        let (_, credential) = self
            .credentials
            .remove(&id)
            .ok_or(CredentialStoreError::NotFound)?;
        self.by_tax_id.remove(credential.tax_id());
        Ok(())
    }
}
