//! ListUsersHandler - Query handler for the read path.
//!
//! Reads straight from the store; no validation and no remote call.

use std::sync::Arc;

use crate::domain::registration::{RegisteredUser, RegistrationError};
use crate::ports::RegistrationStore;

/// Query to list every registered user.
#[derive(Debug, Clone, Default)]
pub struct ListUsersQuery;

/// Handler for listing users with their preferences.
pub struct ListUsersHandler {
    store: Arc<dyn RegistrationStore>,
}

impl ListUsersHandler {
    pub fn new(store: Arc<dyn RegistrationStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        _query: ListUsersQuery,
    ) -> Result<Vec<RegisteredUser>, RegistrationError> {
        self.store.list_all().await.map_err(|e| {
            tracing::error!("Failed to list users: {}", e);
            RegistrationError::from(e)
        })
    }
}
