//! Axum routes for the registration service.
//!
//! Each route is a thin extractor shell: it deserializes the request, parses
//! the domain values, runs the matching use case from `pulse_application`,
//! and maps the outcome onto an HTTP status through [`error::ApiError`].

pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use state::AppState;
