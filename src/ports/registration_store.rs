//! Registration store port.
//!
//! Defines the contract for persisting users and the preferences the
//! verification service accepted for them.
//!
//! # Design
//!
//! - **Uniqueness**: `name` and `email` are each unique; the store, not the
//!   caller, decides conflicts so that racing registrations are resolved
//!   by a single authority
//! - **Ordering**: `list_all` reports users and their preferences in
//!   insertion order
//! - **Errors**: conflicts surface as `ErrorCode::UserAlreadyExists`; every
//!   other failure is `ErrorCode::DatabaseError` and is fatal to the request
//!
//! # Example
//!
//! ```ignore
//! let user = store.create_user(&new_user).await?;
//! for key in &accepted_keys {
//!     store.add_preference(&user, key).await?;
//! }
//! ```

use crate::domain::foundation::DomainError;
use crate::domain::registration::{NewUser, Preference, RegisteredUser, User};
use async_trait::async_trait;

/// Repository port for users and their preferences.
#[async_trait]
pub trait RegistrationStore: Send + Sync {
    /// Lists every user with its preferences, in insertion order.
    async fn list_all(&self) -> Result<Vec<RegisteredUser>, DomainError>;

    /// Creates a user.
    ///
    /// # Errors
    ///
    /// - `UserAlreadyExists` if the name or the email is already stored
    /// - `DatabaseError` on persistence failure
    async fn create_user(&self, new_user: &NewUser) -> Result<User, DomainError>;

    /// Appends a preference owned by `user`.
    ///
    /// Keys are not deduplicated.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn add_preference(&self, user: &User, key: &str) -> Result<Preference, DomainError>;
}
