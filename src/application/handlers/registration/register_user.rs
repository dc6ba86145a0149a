//! RegisterUserHandler - Command handler for the create-user flow.
//!
//! Order of operations:
//!
//! 1. Validate the preference list, then the identity fields, locally
//! 2. Submit the registration to the verification service
//! 3. Create the user, then store each preference key the service accepted
//!
//! The service is consulted before anything is written so that a stored
//! user always corresponds to an accepted verification. The converse does
//! not hold: when the service accepts but the store reports a duplicate
//! name or email, the service keeps its record and nothing is rolled back.

use std::sync::Arc;

use crate::domain::foundation::ErrorCode;
use crate::domain::registration::{
    validate_preferences, EmailAddress, NewUser, RegistrationError, User, UserName,
};
use crate::ports::{RegistrationStore, VerificationClient, VerificationRequest, VerificationResult};

/// Command to register a user with already-coerced input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserCommand {
    pub name: String,
    pub email: String,
    pub preferences: Vec<i64>,
    pub affiliate: bool,
}

/// Result of a successful registration.
#[derive(Debug, Clone)]
pub struct RegisterUserResult {
    pub user: User,
    pub verification: VerificationResult,
}

/// Handler for registering users.
pub struct RegisterUserHandler {
    store: Arc<dyn RegistrationStore>,
    verifier: Arc<dyn VerificationClient>,
}

impl RegisterUserHandler {
    pub fn new(store: Arc<dyn RegistrationStore>, verifier: Arc<dyn VerificationClient>) -> Self {
        Self { store, verifier }
    }

    pub async fn handle(
        &self,
        cmd: RegisterUserCommand,
    ) -> Result<RegisterUserResult, RegistrationError> {
        // 1. Local validation; preference errors take precedence
        validate_preferences(&cmd.preferences)?;
        let name = UserName::try_new(cmd.name)?;
        let email = EmailAddress::try_new(cmd.email)?;

        // 2. Remote verification
        let request = VerificationRequest {
            name: name.as_str().to_string(),
            email: email.as_str().to_string(),
            preferences: cmd.preferences,
            affiliate: cmd.affiliate,
        };

        let verification = self.verifier.verify(&request).await.map_err(|e| {
            tracing::warn!("Verification failed for {}: {}", name, e);
            RegistrationError::verification_failed(e.to_string())
        })?;

        // 3. Persist what the service accepted
        let new_user = NewUser::new(name, email, cmd.affiliate);
        let user = self.store.create_user(&new_user).await.map_err(|e| {
            if e.code() == ErrorCode::UserAlreadyExists {
                tracing::warn!(
                    "Verification accepted {} but the name or email is already stored; \
                     the verification service is not notified",
                    new_user.name
                );
            } else {
                tracing::error!("Failed to create user {}: {}", new_user.name, e);
            }
            RegistrationError::from(e)
        })?;

        for key in &verification.preferences {
            self.store.add_preference(&user, key).await.map_err(|e| {
                tracing::error!("Failed to store preference for user {}: {}", user.id, e);
                RegistrationError::from(e)
            })?;
        }

        tracing::info!(
            "Registered user {} with {} preferences",
            user.id,
            verification.preferences.len()
        );

        Ok(RegisterUserResult { user, verification })
    }
}
