use uuid::Uuid;

use pulse_core::{
    CredentialStore, CredentialStoreError, LockoutPolicy, Password, PasswordHasher, TaxId,
};

/// How many times a stale read is retried before the attempt is surfaced as
/// an infrastructure error.
pub const MAX_CONFLICT_RETRIES: u32 = 3;

/// Safe projection of a successfully authenticated account. Never carries
/// the password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedAccount {
    pub credential_id: Uuid,
    pub account_id: Uuid,
    pub tax_id: TaxId,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum AuthenticationError {
    /// Unknown tax id and wrong password deliberately collapse into one
    /// outcome so callers cannot enumerate registered users.
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Account locked after repeated failed login attempts")]
    AccountLocked,
    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

/// Authenticate use case - the lock-check -> verify -> mutate -> persist
/// protocol. The ordering is binding: a locked credential is rejected before
/// any hashing, and counter changes only count once persisted.
pub struct AuthenticateUseCase<C, H>
where
    C: CredentialStore,
    H: PasswordHasher,
{
    credential_store: C,
    hasher: H,
    policy: LockoutPolicy,
}

impl<C, H> AuthenticateUseCase<C, H>
where
    C: CredentialStore,
    H: PasswordHasher,
{
    pub fn new(credential_store: C, hasher: H, policy: LockoutPolicy) -> Self {
        Self {
            credential_store,
            hasher,
            policy,
        }
    }

    /// Execute the authentication protocol for one (tax id, password) pair.
    ///
    /// A `VersionConflict` on the persist step means a concurrent attempt
    /// won the write; the whole sequence re-runs against the fresh record so
    /// no increment is lost.
    #[tracing::instrument(name = "AuthenticateUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        tax_id: TaxId,
        password: Password,
    ) -> Result<AuthenticatedAccount, AuthenticationError> {
        for _ in 0..MAX_CONFLICT_RETRIES {
            let mut credential = match self.credential_store.find_by_tax_id(&tax_id).await {
                Ok(credential) => credential,
                Err(CredentialStoreError::NotFound) => {
                    return Err(AuthenticationError::InvalidCredentials);
                }
                Err(e) => return Err(AuthenticationError::Infrastructure(e.to_string())),
            };

            if credential.is_locked_by(&self.policy) {
                return Err(AuthenticationError::AccountLocked);
            }

            let password_matches = self
                .hasher
                .verify(&password, credential.password_hash())
                .await
                .map_err(|e| AuthenticationError::Infrastructure(e.to_string()))?;

            if password_matches {
                credential.record_success();
            } else {
                credential.record_failure();
            }

            match self.credential_store.update(credential.clone()).await {
                Ok(()) => {
                    return if password_matches {
                        Ok(AuthenticatedAccount {
                            credential_id: credential.id(),
                            account_id: credential.account_id(),
                            tax_id,
                        })
                    } else {
                        Err(AuthenticationError::InvalidCredentials)
                    };
                }
                Err(CredentialStoreError::VersionConflict) => continue,
                Err(e) => return Err(AuthenticationError::Infrastructure(e.to_string())),
            }
        }

        Err(AuthenticationError::Infrastructure(
            "login attempt kept conflicting with concurrent updates".to_string(),
        ))
    }
}
