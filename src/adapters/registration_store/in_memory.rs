//! In-memory registration store for testing and development.
//!
//! A single write lock serializes `create_user`, which makes the uniqueness
//! check and the insert one atomic step. Data is lost on restart.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::registration::{NewUser, Preference, RegisteredUser, User};
use crate::ports::RegistrationStore;

/// In-memory registration store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistrationStore {
    state: Arc<RwLock<StoreState>>,
}

#[derive(Debug, Default)]
struct StoreState {
    /// Users in insertion order.
    users: Vec<User>,
    /// Preferences in insertion order, tagged with their owner.
    preferences: Vec<(UserId, Preference)>,
    /// Last issued user id.
    last_id: i64,
}

impl InMemoryRegistrationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub async fn user_count(&self) -> usize {
        self.state.read().await.users.len()
    }
}

#[async_trait]
impl RegistrationStore for InMemoryRegistrationStore {
    async fn list_all(&self) -> Result<Vec<RegisteredUser>, DomainError> {
        let state = self.state.read().await;

        let registered = state
            .users
            .iter()
            .map(|user| RegisteredUser {
                user: user.clone(),
                preferences: state
                    .preferences
                    .iter()
                    .filter(|(owner, _)| *owner == user.id)
                    .map(|(_, preference)| preference.clone())
                    .collect(),
            })
            .collect();

        Ok(registered)
    }

    async fn create_user(&self, new_user: &NewUser) -> Result<User, DomainError> {
        let mut state = self.state.write().await;

        let conflict = state
            .users
            .iter()
            .any(|u| u.name == new_user.name || u.email == new_user.email);
        if conflict {
            return Err(DomainError::new(
                ErrorCode::UserAlreadyExists,
                "A user with this name or email already exists",
            ));
        }

        state.last_id += 1;
        let user = new_user.clone().into_user(UserId::from_raw(state.last_id));
        state.users.push(user.clone());

        Ok(user)
    }

    async fn add_preference(&self, user: &User, key: &str) -> Result<Preference, DomainError> {
        let mut state = self.state.write().await;

        if !state.users.iter().any(|u| u.id == user.id) {
            return Err(DomainError::database(format!(
                "Cannot add preference: user {} does not exist",
                user.id
            )));
        }

        let preference = Preference::new(key);
        state.preferences.push((user.id, preference.clone()));

        Ok(preference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::registration::{EmailAddress, UserName};

    fn new_user(name: &str, email: &str) -> NewUser {
        NewUser::new(
            UserName::try_new(name).unwrap(),
            EmailAddress::try_new(email).unwrap(),
            false,
        )
    }

    #[tokio::test]
    async fn create_user_assigns_increasing_ids() {
        let store = InMemoryRegistrationStore::new();

        let first = store.create_user(&new_user("ada", "ada@example.com")).await.unwrap();
        let second = store.create_user(&new_user("bob", "bob@example.com")).await.unwrap();

        assert!(first.id < second.id);
    }

    #[tokio::test]
    async fn duplicate_name_is_rejected() {
        let store = InMemoryRegistrationStore::new();
        store.create_user(&new_user("ada", "ada@example.com")).await.unwrap();

        let err = store
            .create_user(&new_user("ada", "other@example.com"))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::UserAlreadyExists);
        assert_eq!(store.user_count().await, 1);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let store = InMemoryRegistrationStore::new();
        store.create_user(&new_user("ada", "ada@example.com")).await.unwrap();

        let err = store
            .create_user(&new_user("someone", "ada@example.com"))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::UserAlreadyExists);
    }

    #[tokio::test]
    async fn list_all_groups_preferences_in_insertion_order() {
        let store = InMemoryRegistrationStore::new();
        let ada = store.create_user(&new_user("ada", "ada@example.com")).await.unwrap();
        let bob = store.create_user(&new_user("bob", "bob@example.com")).await.unwrap();

        store.add_preference(&ada, "water").await.unwrap();
        store.add_preference(&bob, "tea").await.unwrap();
        store.add_preference(&ada, "coffee").await.unwrap();
        store.add_preference(&ada, "water").await.unwrap();

        let all = store.list_all().await.unwrap();

        assert_eq!(all.len(), 2);
        assert_eq!(all[0].user.name.as_str(), "ada");
        assert_eq!(all[0].preference_keys(), vec!["water", "coffee", "water"]);
        assert_eq!(all[1].user.name.as_str(), "bob");
        assert_eq!(all[1].preference_keys(), vec!["tea"]);
    }

    #[tokio::test]
    async fn add_preference_for_unknown_user_is_a_database_error() {
        let store = InMemoryRegistrationStore::new();
        let ghost = new_user("ghost", "ghost@example.com").into_user(UserId::from_raw(99));

        let err = store.add_preference(&ghost, "water").await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::DatabaseError);
    }

    #[tokio::test]
    async fn concurrent_registrations_of_same_identity_admit_one() {
        let store = InMemoryRegistrationStore::new();

        let attempts: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move {
                    store.create_user(&new_user("ada", "ada@example.com")).await
                })
            })
            .collect();

        let mut created = 0;
        for attempt in attempts {
            if attempt.await.unwrap().is_ok() {
                created += 1;
            }
        }

        assert_eq!(created, 1);
        assert_eq!(store.user_count().await, 1);
    }
}
