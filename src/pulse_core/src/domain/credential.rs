use secrecy::{ExposeSecret, Secret};
use uuid::Uuid;

use crate::domain::tax_id::TaxId;
use crate::domain::validation::ValidationError;

/// Failed attempts at which authentication is refused.
pub const LOCKOUT_THRESHOLD: u32 = 5;

/// Lockout threshold as configured at the boundary. The core default stays
/// [`LOCKOUT_THRESHOLD`]; deployments and tests may tighten or loosen it.
#[derive(Debug, Clone)]
pub struct LockoutPolicy {
    pub max_failed_attempts: u32,
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self {
            max_failed_attempts: LOCKOUT_THRESHOLD,
        }
    }
}

/// Login record: password hash plus the failed-attempt counter, linked 1:1
/// to its owning account. Created at registration, deleted with the account.
///
/// The `version` field is the optimistic-concurrency token: stores accept an
/// update only when it matches the persisted value and bump it on success,
/// so concurrent failed attempts cannot lose an increment.
#[derive(Debug, Clone)]
pub struct Credential {
    id: Uuid,
    tax_id: TaxId,
    password_hash: Secret<String>,
    account_id: Uuid,
    failed_attempts: u32,
    version: u64,
}

impl Credential {
    pub fn new(
        tax_id: TaxId,
        password_hash: Secret<String>,
        account_id: Uuid,
    ) -> Result<Self, ValidationError> {
        require_usable_hash(&password_hash)?;
        Ok(Self {
            id: Uuid::new_v4(),
            tax_id,
            password_hash,
            account_id,
            failed_attempts: 0,
            version: 0,
        })
    }

    /// Rehydrate a credential from its stored record. Skips validation:
    /// the data was validated when it was written.
    pub fn from_record(
        id: Uuid,
        tax_id: TaxId,
        password_hash: Secret<String>,
        account_id: Uuid,
        failed_attempts: u32,
        version: u64,
    ) -> Self {
        Self {
            id,
            tax_id,
            password_hash,
            account_id,
            failed_attempts,
            version,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn tax_id(&self) -> &TaxId {
        &self.tax_id
    }

    pub fn password_hash(&self) -> &Secret<String> {
        &self.password_hash
    }

    pub fn account_id(&self) -> Uuid {
        self.account_id
    }

    pub fn failed_attempts(&self) -> u32 {
        self.failed_attempts
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// For store implementations: the copy persisted after a successful
    /// version-checked write carries the next version.
    pub fn with_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    pub fn is_locked(&self) -> bool {
        self.failed_attempts >= LOCKOUT_THRESHOLD
    }

    pub fn is_locked_by(&self, policy: &LockoutPolicy) -> bool {
        self.failed_attempts >= policy.max_failed_attempts
    }

    /// Counter keeps incrementing past the threshold; lockout is derived,
    /// not stored, and the count is never capped.
    pub fn record_failure(&mut self) {
        self.failed_attempts += 1;
    }

    /// Only called after the password was verified correct.
    pub fn record_success(&mut self) {
        self.failed_attempts = 0;
    }

    /// Administrative reset. Same effect as `record_success`, kept as a
    /// distinct operation because callers authorize it differently.
    pub fn unlock(&mut self) {
        self.failed_attempts = 0;
    }

    /// Replace the stored hash. Leaves the attempt counter untouched.
    pub fn set_password_hash(&mut self, new_hash: Secret<String>) -> Result<(), ValidationError> {
        require_usable_hash(&new_hash)?;
        self.password_hash = new_hash;
        Ok(())
    }
}

fn require_usable_hash(hash: &Secret<String>) -> Result<(), ValidationError> {
    if hash.expose_secret().trim().is_empty() {
        return Err(ValidationError::single(
            "password_hash",
            "must not be empty",
        ));
    }
    Ok(())
}
