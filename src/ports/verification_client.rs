//! Verification client port.
//!
//! The verification service is the authority on which named preferences a
//! registration ends up with. It receives the validated registration and
//! answers with a JSON body whose `preferences` field lists the accepted
//! preference keys.
//!
//! # Wire format
//!
//! ```json
//! { "name": "ada", "email": "ada@example.com", "preferences": [2, 3], "affiliate": "true" }
//! ```
//!
//! `affiliate` travels as the lowercase string `"true"` or `"false"`.

use async_trait::async_trait;
use serde::{Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

/// Registration payload sent to the verification service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationRequest {
    pub name: String,
    pub email: String,
    pub preferences: Vec<i64>,
    #[serde(serialize_with = "serialize_flag")]
    pub affiliate: bool,
}

fn serialize_flag<S: Serializer>(flag: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(if *flag { "true" } else { "false" })
}

/// The verification service's answer.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationResult {
    /// Response body as received; returned verbatim to the API client.
    pub body: Value,
    /// Accepted preference keys, in the order the service listed them.
    pub preferences: Vec<String>,
}

impl VerificationResult {
    /// Interprets a success body.
    ///
    /// A missing or `null` `preferences` field means no preferences were
    /// accepted.
    ///
    /// # Errors
    ///
    /// Returns `MalformedResponse` if the body is not a JSON object or if
    /// `preferences` is not an array of strings.
    pub fn from_body(body: Value) -> Result<Self, VerificationError> {
        let object = body.as_object().ok_or_else(|| {
            VerificationError::MalformedResponse("response body is not a JSON object".to_string())
        })?;

        let preferences = match object.get("preferences") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_str().map(str::to_string).ok_or_else(|| {
                        VerificationError::MalformedResponse(format!(
                            "preference key is not a string: {}",
                            item
                        ))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
            Some(other) => {
                return Err(VerificationError::MalformedResponse(format!(
                    "preferences is not an array: {}",
                    other
                )))
            }
        };

        Ok(Self { body, preferences })
    }
}

/// Transport-level failures talking to the verification service.
///
/// Callers treat every variant the same way; the variants exist for logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    #[error("verification request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("verification service unreachable: {0}")]
    Connection(String),

    #[error("verification service responded with status {0}")]
    Status(u16),

    #[error("verification service returned a malformed response: {0}")]
    MalformedResponse(String),

    #[error("verification request failed: {0}")]
    Request(String),
}

/// Port for the remote verification service.
///
/// Implementations make a single attempt; retrying is the caller's choice.
#[async_trait]
pub trait VerificationClient: Send + Sync {
    /// Submits a registration for verification.
    async fn verify(
        &self,
        request: &VerificationRequest,
    ) -> Result<VerificationResult, VerificationError>;
}
