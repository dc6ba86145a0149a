//! Request and response DTOs for the user registration API.
//!
//! Request fields are deliberately loose: clients send preferences as
//! numbers or numeric strings and `affiliate` as a bool or a string, so
//! coercion happens here before anything reaches the handlers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::handlers::registration::RegisterUserCommand;
use crate::domain::registration::RegisteredUser;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `POST /api/users/`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub preferences: Option<Vec<RawPreference>>,
    #[serde(default)]
    pub affiliate: Option<Value>,
}

/// A single preference as submitted, before integer coercion.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawPreference {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl RawPreference {
    /// Coerces to an integer.
    ///
    /// Booleans count as 1 and 0. Floats are truncated toward zero.
    /// Strings are trimmed and must then parse as a base-10 integer.
    pub fn to_integer(&self) -> Result<i64, String> {
        match self {
            RawPreference::Bool(b) => Ok(i64::from(*b)),
            RawPreference::Integer(n) => Ok(*n),
            RawPreference::Float(f) => {
                let truncated = f.trunc();
                if !truncated.is_finite()
                    || truncated < i64::MIN as f64
                    || truncated >= i64::MAX as f64
                {
                    return Err(format!("Invalid preference value: {}", f));
                }
                Ok(truncated as i64)
            }
            RawPreference::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| format!("Invalid preference value: '{}'", s)),
        }
    }
}

/// Only JSON `true` and the string `"true"` count as affiliate.
pub fn coerce_affiliate(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s == "true",
        _ => false,
    }
}

impl CreateUserRequest {
    /// Converts the loose request into a typed command.
    ///
    /// Errors carry the message returned to the client.
    pub fn into_command(self) -> Result<RegisterUserCommand, String> {
        let name = self.name.ok_or_else(|| missing_field("name"))?;
        let email = self.email.ok_or_else(|| missing_field("email"))?;
        let preferences = self
            .preferences
            .ok_or_else(|| missing_field("preferences"))?
            .iter()
            .map(RawPreference::to_integer)
            .collect::<Result<Vec<_>, _>>()?;
        let affiliate = coerce_affiliate(self.affiliate.as_ref());

        Ok(RegisterUserCommand {
            name,
            email,
            preferences,
            affiliate,
        })
    }
}

fn missing_field(field: &str) -> String {
    format!("Missing field: {}", field)
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// A stored preference as listed by `GET /api/users/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceResponse {
    pub key: String,
}

/// A stored user as listed by `GET /api/users/`. The id is not exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub name: String,
    pub email: String,
    pub preferences: Vec<PreferenceResponse>,
    pub affiliate: bool,
}

impl From<RegisteredUser> for UserResponse {
    fn from(registered: RegisteredUser) -> Self {
        Self {
            name: registered.user.name.as_str().to_string(),
            email: registered.user.email.as_str().to_string(),
            preferences: registered
                .preferences
                .into_iter()
                .map(|p| PreferenceResponse { key: p.key })
                .collect(),
            affiliate: registered.user.affiliate,
        }
    }
}

/// Error body shared by every failing response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
