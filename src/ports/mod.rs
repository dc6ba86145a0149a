//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `RegistrationStore` - Persistence of users and accepted preferences
//! - `VerificationClient` - The remote service that verifies registrations

mod registration_store;
mod verification_client;

pub use registration_store::RegistrationStore;
pub use verification_client::{
    VerificationClient, VerificationError, VerificationRequest, VerificationResult,
};
