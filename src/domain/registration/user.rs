//! Registered users and their accepted preferences.

use crate::domain::foundation::UserId;

use super::values::{EmailAddress, UserName};

/// A user as persisted by a registration store.
///
/// Created once by a successful registration and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: UserName,
    pub email: EmailAddress,
    pub affiliate: bool,
}

/// The fields needed to create a user; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: UserName,
    pub email: EmailAddress,
    pub affiliate: bool,
}

impl NewUser {
    pub fn new(name: UserName, email: EmailAddress, affiliate: bool) -> Self {
        Self {
            name,
            email,
            affiliate,
        }
    }

    /// Materializes the user once the store has issued an id.
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            affiliate: self.affiliate,
        }
    }
}

/// A preference label accepted by the verification service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preference {
    pub key: String,
}

impl Preference {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

/// A user together with its preferences, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredUser {
    pub user: User,
    pub preferences: Vec<Preference>,
}

impl RegisteredUser {
    /// Preference keys in insertion order.
    pub fn preference_keys(&self) -> Vec<&str> {
        self.preferences.iter().map(|p| p.key.as_str()).collect()
    }
}
