pub mod in_memory_account_store;
pub mod in_memory_credential_store;
pub mod postgres_account_store;
pub mod postgres_credential_store;

pub use in_memory_account_store::InMemoryAccountStore;
pub use in_memory_credential_store::InMemoryCredentialStore;
pub use postgres_account_store::PostgresAccountStore;
pub use postgres_credential_store::PostgresCredentialStore;
