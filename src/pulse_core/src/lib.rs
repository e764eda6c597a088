pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    address::Address,
    credential::{Credential, LOCKOUT_THRESHOLD, LockoutPolicy},
    password::Password,
    role::Role,
    tax_id::TaxId,
    user_account::{AccountUpdate, UserAccount},
    validation::{FieldViolation, ValidationError, Violations},
};

pub use ports::{
    services::{Clock, HasherError, PasswordHasher},
    stores::{AccountStore, AccountStoreError, CredentialStore, CredentialStoreError},
};
