//! HTTP handlers for user registration endpoints.
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::registration::{
    ListUsersHandler, ListUsersQuery, RegisterUserHandler,
};
use crate::domain::foundation::ErrorCode;
use crate::domain::registration::RegistrationError;
use crate::ports::{RegistrationStore, VerificationClient};

use super::dto::{CreateUserRequest, ErrorResponse, UserResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the registration endpoints.
#[derive(Clone)]
pub struct RegistrationAppState {
    pub store: Arc<dyn RegistrationStore>,
    pub verifier: Arc<dyn VerificationClient>,
}

impl RegistrationAppState {
    pub fn new(store: Arc<dyn RegistrationStore>, verifier: Arc<dyn VerificationClient>) -> Self {
        Self { store, verifier }
    }

    pub fn register_user_handler(&self) -> RegisterUserHandler {
        RegisterUserHandler::new(self.store.clone(), self.verifier.clone())
    }

    pub fn list_users_handler(&self) -> ListUsersHandler {
        ListUsersHandler::new(self.store.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/users/ - List all users with their preferences
pub async fn list_users(
    State(state): State<RegistrationAppState>,
) -> Result<impl IntoResponse, RegistrationApiError> {
    let users = state.list_users_handler().handle(ListUsersQuery).await?;

    let response: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(response))
}

/// POST /api/users/ - Register a user
///
/// Responds with the verification service's body on success.
pub async fn create_user(
    State(state): State<RegistrationAppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<impl IntoResponse, RegistrationApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!("Rejected registration body: {}", rejection);
        RegistrationApiError::BadRequest(rejection.body_text())
    })?;

    let cmd = request
        .into_command()
        .map_err(RegistrationApiError::BadRequest)?;

    let result = state.register_user_handler().handle(cmd).await?;

    Ok((StatusCode::CREATED, Json(result.verification.body)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts registration errors to HTTP responses.
#[derive(Debug)]
pub enum RegistrationApiError {
    /// Body could not be parsed or coerced.
    BadRequest(String),
    Registration(RegistrationError),
}

impl From<RegistrationError> for RegistrationApiError {
    fn from(err: RegistrationError) -> Self {
        Self::Registration(err)
    }
}

impl IntoResponse for RegistrationApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            RegistrationApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            RegistrationApiError::Registration(err) => {
                let status = match err.code() {
                    ErrorCode::ValidationFailed | ErrorCode::UserAlreadyExists => {
                        StatusCode::BAD_REQUEST
                    }
                    ErrorCode::ExternalServiceError => StatusCode::BAD_GATEWAY,
                    ErrorCode::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, err.message())
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
