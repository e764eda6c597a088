pub mod argon2_password_hasher;
pub mod token_issuer;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use token_issuer::{Claims, JwtConfig, TokenError, TokenIssuer};
