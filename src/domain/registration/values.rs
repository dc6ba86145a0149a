//! Identity value objects for a registration.
//!
//! # Validation Rules
//!
//! - Name: not blank, at most 100 characters, stored as given
//! - Email: single `@`, local part up to 64 characters without whitespace,
//!   domain of at least two dot-separated labels, at most 254 characters total

use crate::domain::foundation::ValidationError;

const MAX_NAME_CHARS: usize = 100;
const MAX_EMAIL_CHARS: usize = 254;
const MAX_LOCAL_PART_CHARS: usize = 64;
const MAX_LABEL_CHARS: usize = 63;

/// A validated user name. Unique across registrations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserName(String);

impl UserName {
    /// Creates a UserName, rejecting blank or over-long values.
    pub fn try_new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }

        let chars = name.chars().count();
        if chars > MAX_NAME_CHARS {
            return Err(ValidationError::too_long("name", MAX_NAME_CHARS, chars));
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A syntactically valid email address. Unique across registrations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates an EmailAddress after checking its syntax.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if:
    /// - The address is empty
    /// - It is longer than 254 characters
    /// - It does not contain exactly one `@`
    /// - The local part is empty, too long, or contains whitespace
    /// - The domain is not a dotted hostname with an alphabetic-ish top label
    pub fn try_new(email: impl Into<String>) -> Result<Self, ValidationError> {
        let email = email.into();
        if email.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }

        let chars = email.chars().count();
        if chars > MAX_EMAIL_CHARS {
            return Err(ValidationError::too_long("email", MAX_EMAIL_CHARS, chars));
        }

        let (local, domain) = match email.split_once('@') {
            Some((local, domain)) if !domain.contains('@') => (local, domain),
            _ => {
                return Err(ValidationError::invalid_format(
                    "email",
                    "expected exactly one '@'",
                ))
            }
        };

        if local.is_empty() || local.chars().count() > MAX_LOCAL_PART_CHARS {
            return Err(ValidationError::invalid_format(
                "email",
                "local part must be 1-64 characters",
            ));
        }
        if local.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(ValidationError::invalid_format(
                "email",
                "local part contains whitespace",
            ));
        }

        validate_domain(domain)?;

        Ok(Self(email))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn validate_domain(domain: &str) -> Result<(), ValidationError> {
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return Err(ValidationError::invalid_format(
            "email",
            "domain must contain a dot",
        ));
    }

    for label in &labels {
        let well_formed = !label.is_empty()
            && label.len() <= MAX_LABEL_CHARS
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
            && !label.starts_with('-')
            && !label.ends_with('-');
        if !well_formed {
            return Err(ValidationError::invalid_format(
                "email",
                format!("invalid domain label '{}'", label),
            ));
        }
    }

    // split always yields at least one element
    let tld = labels.last().copied().unwrap_or_default();
    if tld.len() < 2 || tld.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::invalid_format(
            "email",
            "invalid top-level domain",
        ));
    }

    Ok(())
}
