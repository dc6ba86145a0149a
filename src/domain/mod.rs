//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, errors)
//! - `registration` - Users, preferences, and the preference parity rule
//!
//! The domain layer has no I/O. Persistence and the verification service
//! are reached through the traits in `crate::ports`.

pub mod foundation;
pub mod registration;
