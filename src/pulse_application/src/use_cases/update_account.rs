use chrono::NaiveDate;
use uuid::Uuid;

use pulse_core::{
    AccountStore, AccountStoreError, AccountUpdate, Address, Clock, Role, UserAccount,
    ValidationError,
};

use crate::use_cases::register::NewAddress;

/// Profile update as submitted by the caller. The tax id stays immutable:
/// the credential record duplicates it as its lookup key.
#[derive(Debug, Clone)]
pub struct AccountUpdateRequest {
    pub name: String,
    pub birth_date: NaiveDate,
    pub address: NewAddress,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateAccountError {
    #[error("Account not found")]
    NotFound,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

/// Update account use case - replace-and-revalidate. The stored record is
/// only overwritten once the updated entity passes the full invariant check.
pub struct UpdateAccountUseCase<A, K>
where
    A: AccountStore,
    K: Clock,
{
    account_store: A,
    clock: K,
}

impl<A, K> UpdateAccountUseCase<A, K>
where
    A: AccountStore,
    K: Clock,
{
    pub fn new(account_store: A, clock: K) -> Self {
        Self {
            account_store,
            clock,
        }
    }

    #[tracing::instrument(name = "UpdateAccountUseCase::execute", skip(self, update))]
    pub async fn execute(
        &self,
        id: Uuid,
        update: AccountUpdateRequest,
    ) -> Result<UserAccount, UpdateAccountError> {
        let mut account = match self.account_store.find_by_id(id).await {
            Ok(account) => account,
            Err(AccountStoreError::NotFound) => return Err(UpdateAccountError::NotFound),
            Err(e) => return Err(UpdateAccountError::Infrastructure(e.to_string())),
        };

        let address = Address::new(
            update.address.street,
            update.address.complement,
            update.address.neighborhood,
            update.address.postal_code,
            update.address.city,
            update.address.state,
        )?;
        account.apply_update(
            AccountUpdate {
                name: update.name,
                birth_date: update.birth_date,
                address,
                email: update.email,
                role: update.role,
            },
            self.clock.today(),
        )?;

        self.account_store
            .update(account.clone())
            .await
            .map_err(|e| UpdateAccountError::Infrastructure(e.to_string()))?;

        Ok(account)
    }
}
