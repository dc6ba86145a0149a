//! HTTP verification client - Implementation of VerificationClient over HTTPS.
//!
//! Posts the registration as JSON to a configured endpoint and treats any
//! non-2xx status, connection failure, timeout, or unreadable body as a
//! transport error. One attempt per call.
//!
//! # Configuration
//!
//! ```ignore
//! let config = VerificationConfig {
//!     endpoint_url: "https://verifier.example.com/api/post_test".to_string(),
//!     timeout_secs: 5,
//! };
//! let client = HttpVerificationClient::new(&config)?;
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::config::VerificationConfig;
use crate::ports::{
    VerificationClient, VerificationError, VerificationRequest, VerificationResult,
};

/// Verification client backed by `reqwest`.
pub struct HttpVerificationClient {
    endpoint_url: String,
    timeout: Duration,
    client: Client,
}

impl HttpVerificationClient {
    /// Creates a client for the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns `Request` if the underlying HTTP client cannot be built
    /// (for example when no TLS backend is available).
    pub fn new(config: &VerificationConfig) -> Result<Self, VerificationError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| VerificationError::Request(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            endpoint_url: config.endpoint_url.clone(),
            timeout: config.timeout(),
            client,
        })
    }

    fn map_send_error(&self, e: reqwest::Error) -> VerificationError {
        if e.is_timeout() {
            VerificationError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else if e.is_connect() {
            VerificationError::Connection(e.to_string())
        } else {
            VerificationError::Request(e.to_string())
        }
    }
}

#[async_trait]
impl VerificationClient for HttpVerificationClient {
    async fn verify(
        &self,
        request: &VerificationRequest,
    ) -> Result<VerificationResult, VerificationError> {
        tracing::debug!(
            "Submitting registration for {} to {}",
            request.name,
            self.endpoint_url
        );

        let response = self
            .client
            .post(&self.endpoint_url)
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Verification service responded with {}", status);
            return Err(VerificationError::Status(status.as_u16()));
        }

        let body: Value = response.json().await.map_err(|e| {
            if e.is_timeout() {
                VerificationError::Timeout {
                    timeout_secs: self.timeout.as_secs(),
                }
            } else {
                VerificationError::MalformedResponse(e.to_string())
            }
        })?;

        VerificationResult::from_body(body)
    }
}
