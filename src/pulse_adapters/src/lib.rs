pub mod clock;
pub mod config;
pub mod persistence;
pub mod security;

pub use clock::SystemClock;
pub use config::{DatabaseSettings, JwtSettings, ListenSettings, LockoutSettings, Settings};
pub use persistence::{
    InMemoryAccountStore, InMemoryCredentialStore, PostgresAccountStore, PostgresCredentialStore,
};
pub use security::{Argon2PasswordHasher, Claims, JwtConfig, TokenError, TokenIssuer};
