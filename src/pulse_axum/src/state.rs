use pulse_adapters::TokenIssuer;
use pulse_core::{AccountStore, Clock, CredentialStore, LockoutPolicy, PasswordHasher};

/// Shared state handed to every route. Stores implement `Clone` via internal
/// `Arc`s, so cloning the state per request is cheap.
pub struct AppState<A, C, H, K>
where
    A: AccountStore + Clone,
    C: CredentialStore + Clone,
    H: PasswordHasher + Clone,
    K: Clock + Clone,
{
    pub accounts: A,
    pub credentials: C,
    pub hasher: H,
    pub clock: K,
    pub tokens: TokenIssuer,
    pub lockout: LockoutPolicy,
}

impl<A, C, H, K> Clone for AppState<A, C, H, K>
where
    A: AccountStore + Clone,
    C: CredentialStore + Clone,
    H: PasswordHasher + Clone,
    K: Clock + Clone,
{
    fn clone(&self) -> Self {
        Self {
            accounts: self.accounts.clone(),
            credentials: self.credentials.clone(),
            hasher: self.hasher.clone(),
            clock: self.clock.clone(),
            tokens: self.tokens.clone(),
            lockout: self.lockout.clone(),
        }
    }
}
