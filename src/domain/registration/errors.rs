//! Registration-specific error types.
//!
//! Every failure of the create flow is terminal and maps to exactly one
//! HTTP response.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status | Body `error` |
//! |-------|-------------|--------------|
//! | InvalidField | 400 | `Invalid <field>` |
//! | DuplicatedPreferences | 400 | `Duplicated preferences` |
//! | InvalidPreferences | 400 | `Invalid preferences` |
//! | VerificationFailed | 502 | `Test server error` |
//! | UserAlreadyExists | 400 | `User already exists` |
//! | Infrastructure | 500 | `Internal server error` |

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

use super::preferences::PreferenceError;

/// Registration-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// An identity field failed value-object validation.
    InvalidField { field: String, reason: String },

    /// The submitted preference list repeats a value.
    DuplicatedPreferences,

    /// The submitted preference list lacks an even or an odd value.
    InvalidPreferences,

    /// The verification service was unreachable, timed out, or rejected the request.
    VerificationFailed(String),

    /// A user with the same name or email is already stored.
    UserAlreadyExists,

    /// Storage failure.
    Infrastructure(String),
}

impl RegistrationError {
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        RegistrationError::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn verification_failed(reason: impl Into<String>) -> Self {
        RegistrationError::VerificationFailed(reason.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        RegistrationError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            RegistrationError::InvalidField { .. }
            | RegistrationError::DuplicatedPreferences
            | RegistrationError::InvalidPreferences => ErrorCode::ValidationFailed,
            RegistrationError::VerificationFailed(_) => ErrorCode::ExternalServiceError,
            RegistrationError::UserAlreadyExists => ErrorCode::UserAlreadyExists,
            RegistrationError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns the message reported to API clients.
    ///
    /// Causes of verification and storage failures are not exposed.
    pub fn message(&self) -> String {
        match self {
            RegistrationError::InvalidField { field, .. } => format!("Invalid {}", field),
            RegistrationError::DuplicatedPreferences => "Duplicated preferences".to_string(),
            RegistrationError::InvalidPreferences => "Invalid preferences".to_string(),
            RegistrationError::VerificationFailed(_) => "Test server error".to_string(),
            RegistrationError::UserAlreadyExists => "User already exists".to_string(),
            RegistrationError::Infrastructure(_) => "Internal server error".to_string(),
        }
    }
}

impl std::fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for RegistrationError {}

impl From<PreferenceError> for RegistrationError {
    fn from(err: PreferenceError) -> Self {
        match err {
            PreferenceError::DuplicatePreference => RegistrationError::DuplicatedPreferences,
            PreferenceError::MissingParity => RegistrationError::InvalidPreferences,
        }
    }
}

impl From<ValidationError> for RegistrationError {
    fn from(err: ValidationError) -> Self {
        RegistrationError::InvalidField {
            field: err.field().to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<DomainError> for RegistrationError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::UserAlreadyExists => RegistrationError::UserAlreadyExists,
            _ => RegistrationError::Infrastructure(err.to_string()),
        }
    }
}
