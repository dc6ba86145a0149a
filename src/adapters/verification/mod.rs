//! Verification service adapters.

mod http_client;

pub use http_client::HttpVerificationClient;
