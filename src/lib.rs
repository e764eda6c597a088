//! # Pulse - User Registration Service Library
//!
//! This is a facade crate that re-exports all public APIs from the
//! registration service components. Use this crate to get access to the
//! whole registration and authentication functionality in one place.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! pulse = { path = "../pulse" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `UserAccount`, `Credential`, `Address`, `TaxId`, etc.
//! - **Repository traits**: `AccountStore`, `CredentialStore`
//! - **Use cases**: `RegisterUseCase`, `AuthenticateUseCase`, etc.
//! - **Adapters**: `PostgresAccountStore`, `Argon2PasswordHasher`, `TokenIssuer`, etc.
//! - **Service**: `RegistrationService` - The main entry point

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use pulse_core::*;
}

// Re-export most commonly used core types at the root level
pub use pulse_core::{
    Address, Credential, LockoutPolicy, Password, Role, TaxId, UserAccount, ValidationError,
};

// ============================================================================
// Repository Traits (Ports)
// ============================================================================

/// Repository trait definitions
pub mod repositories {
    pub use pulse_core::{AccountStore, AccountStoreError, CredentialStore, CredentialStoreError};
}

// Re-export repository traits at root level
pub use pulse_core::{
    AccountStore, AccountStoreError, Clock, CredentialStore, CredentialStoreError, PasswordHasher,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use pulse_application::*;
}

// Re-export use cases at root level
pub use pulse_application::{
    AuthenticateUseCase, ChangePasswordUseCase, CredentialQueryUseCase, DeleteAccountUseCase,
    GetAccountUseCase, RegisterUseCase, UnlockUseCase, UpdateAccountUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// Persistence implementations
    pub mod persistence {
        pub use pulse_adapters::persistence::*;
    }

    /// Password hashing and token issuance
    pub mod security {
        pub use pulse_adapters::security::*;
    }

    /// Configuration
    pub mod config {
        pub use pulse_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use pulse_adapters::{
    Argon2PasswordHasher, InMemoryAccountStore, InMemoryCredentialStore, PostgresAccountStore,
    PostgresCredentialStore, Settings, SystemClock, TokenIssuer,
};

// ============================================================================
// HTTP Layer
// ============================================================================

/// Axum routes and shared state
pub mod http {
    pub use pulse_axum::*;
}

pub use pulse_axum::AppState;

// ============================================================================
// Registration Service (Main Entry Point)
// ============================================================================

/// Main registration service
pub use pulse_service::{RegistrationService, configure_postgres, init_tracing};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

pub use async_trait::async_trait;
pub use axum;
pub use secrecy::{ExposeSecret, Secret};
pub use tokio;
