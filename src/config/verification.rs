//! Verification service configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Remote verification service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct VerificationConfig {
    /// Endpoint that receives registrations
    #[serde(default = "default_endpoint_url")]
    pub endpoint_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl VerificationConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate verification configuration
    ///
    /// In production, requires HTTPS for the endpoint.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.endpoint_url.is_empty() {
            return Err(ValidationError::MissingRequired("VERIFICATION_ENDPOINT_URL"));
        }
        let is_https = self.endpoint_url.starts_with("https://");
        if !is_https && !self.endpoint_url.starts_with("http://") {
            return Err(ValidationError::InvalidVerificationUrl);
        }
        if *environment == Environment::Production && !is_https {
            return Err(ValidationError::VerificationUrlMustBeHttps);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 60 {
            return Err(ValidationError::InvalidVerificationTimeout);
        }
        Ok(())
    }
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            endpoint_url: default_endpoint_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_endpoint_url() -> String {
    "https://invelonjobinterview.herokuapp.com/api/post_test".to_string()
}

fn default_timeout() -> u64 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_config_defaults() {
        let config = VerificationConfig::default();
        assert!(config.endpoint_url.starts_with("https://"));
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert!(config.validate(&Environment::Production).is_ok());
    }

    #[test]
    fn test_http_endpoint_allowed_outside_production() {
        let config = VerificationConfig {
            endpoint_url: "http://localhost:9000/api/post_test".to_string(),
            ..Default::default()
        };
        assert!(config.validate(&Environment::Development).is_ok());
        assert!(matches!(
            config.validate(&Environment::Production),
            Err(ValidationError::VerificationUrlMustBeHttps)
        ));
    }

    #[test]
    fn test_non_http_endpoint_rejected() {
        let config = VerificationConfig {
            endpoint_url: "ftp://example.com/verify".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(&Environment::Development),
            Err(ValidationError::InvalidVerificationUrl)
        ));
    }

    #[test]
    fn test_timeout_bounds() {
        for timeout_secs in [0, 61] {
            let config = VerificationConfig {
                timeout_secs,
                ..Default::default()
            };
            assert!(config.validate(&Environment::Development).is_err());
        }
    }
}
