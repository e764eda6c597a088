use chrono::NaiveDate;

use pulse_core::{
    AccountStore, AccountStoreError, Address, Clock, Credential, CredentialStore,
    CredentialStoreError, Password, PasswordHasher, Role, TaxId, UserAccount, ValidationError,
};

/// Address fields as submitted at registration, before validation.
#[derive(Debug, Clone)]
pub struct NewAddress {
    pub street: String,
    pub complement: Option<String>,
    pub neighborhood: String,
    pub postal_code: String,
    pub city: String,
    pub state: String,
}

/// Profile fields as submitted at registration, before validation.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub tax_id: String,
    pub birth_date: NaiveDate,
    pub address: NewAddress,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("An account with this tax id already exists")]
    AlreadyExists,
    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

/// Register use case - creates the account and its login record together.
/// Validation runs before any write; the two inserts either both stick or
/// the account insert is compensated, so no durable account exists without
/// exactly one credential.
pub struct RegisterUseCase<A, C, H, K>
where
    A: AccountStore,
    C: CredentialStore,
    H: PasswordHasher,
    K: Clock,
{
    account_store: A,
    credential_store: C,
    hasher: H,
    clock: K,
}

impl<A, C, H, K> RegisterUseCase<A, C, H, K>
where
    A: AccountStore,
    C: CredentialStore,
    H: PasswordHasher,
    K: Clock,
{
    pub fn new(account_store: A, credential_store: C, hasher: H, clock: K) -> Self {
        Self {
            account_store,
            credential_store,
            hasher,
            clock,
        }
    }

    #[tracing::instrument(name = "RegisterUseCase::execute", skip(self, data, password), fields(tax_id))]
    pub async fn execute(
        &self,
        data: NewAccount,
        password: Password,
    ) -> Result<UserAccount, RegisterError> {
        let address = Address::new(
            data.address.street,
            data.address.complement,
            data.address.neighborhood,
            data.address.postal_code,
            data.address.city,
            data.address.state,
        )?;
        let tax_id = TaxId::parse(&data.tax_id)?;

        // Profile validation happens before the expensive hash computation
        // and before any write.
        let now = self.clock.now();
        let mut account = UserAccount::new(
            data.name,
            tax_id.clone(),
            data.birth_date,
            address,
            data.email,
            data.role,
            None,
            now,
        )?;

        let digest = self
            .hasher
            .hash(&password)
            .await
            .map_err(|e| RegisterError::Infrastructure(e.to_string()))?;
        let credential = Credential::new(tax_id, digest, account.id())?;
        account.attach_credential(credential.id());

        self.account_store
            .insert(account.clone())
            .await
            .map_err(|e| match e {
                AccountStoreError::AlreadyExists => RegisterError::AlreadyExists,
                e => RegisterError::Infrastructure(e.to_string()),
            })?;

        if let Err(e) = self.credential_store.insert(credential).await {
            // Compensate the first write so no account survives without a
            // login record.
            let _ = self.account_store.delete(account.id()).await;
            return Err(match e {
                CredentialStoreError::AlreadyExists => RegisterError::AlreadyExists,
                e => RegisterError::Infrastructure(e.to_string()),
            });
        }

        Ok(account)
    }
}
