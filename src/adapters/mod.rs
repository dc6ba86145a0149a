//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `registration_store` - In-memory registration store
//! - `postgres` - PostgreSQL registration store and migrations
//! - `verification` - HTTP client for the remote verification service
//! - `http` - Axum routes exposing the registration API

pub mod http;
pub mod postgres;
pub mod registration_store;
pub mod verification;

pub use http::{build_app, RegistrationAppState};
pub use postgres::PostgresRegistrationStore;
pub use registration_store::InMemoryRegistrationStore;
pub use verification::HttpVerificationClient;
