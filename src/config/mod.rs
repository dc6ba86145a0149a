//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `PREFERENCE_REGISTRY` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use preference_registry::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod database;
mod error;
mod server;
mod verification;

pub use database::{DatabaseConfig, StorageBackend};
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use verification::VerificationConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Registration store configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Remote verification service configuration
    #[serde(default)]
    pub verification: VerificationConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PREFERENCE_REGISTRY` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `PREFERENCE_REGISTRY__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `PREFERENCE_REGISTRY__DATABASE__URL=...` -> `database.url = ...`
    /// - `PREFERENCE_REGISTRY__VERIFICATION__TIMEOUT_SECS=5` -> `verification.timeout_secs = 5`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PREFERENCE_REGISTRY")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.verification.validate(&self.server.environment)?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Helper to set environment variables for testing
    /// Uses double underscores to separate nested config values
    fn set_minimal_env() {
        env::set_var(
            "PREFERENCE_REGISTRY__DATABASE__URL",
            "postgresql://test@localhost/test",
        );
    }

    /// Helper to clear environment variables after testing
    fn clear_env() {
        env::remove_var("PREFERENCE_REGISTRY__DATABASE__URL");
        env::remove_var("PREFERENCE_REGISTRY__DATABASE__BACKEND");
        env::remove_var("PREFERENCE_REGISTRY__SERVER__PORT");
        env::remove_var("PREFERENCE_REGISTRY__SERVER__ENVIRONMENT");
        env::remove_var("PREFERENCE_REGISTRY__VERIFICATION__ENDPOINT_URL");
        env::remove_var("PREFERENCE_REGISTRY__VERIFICATION__TIMEOUT_SECS");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.database.url, "postgresql://test@localhost/test");
        assert_eq!(config.database.backend, StorageBackend::Postgres);
    }

    #[test]
    fn test_validate_full_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_server_and_verification_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.verification.timeout_secs, 5);
    }

    #[test]
    fn test_memory_backend_without_url() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("PREFERENCE_REGISTRY__DATABASE__BACKEND", "memory");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.database.backend, StorageBackend::Memory);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_verification_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var(
            "PREFERENCE_REGISTRY__VERIFICATION__ENDPOINT_URL",
            "http://localhost:9000/verify",
        );
        env::set_var("PREFERENCE_REGISTRY__VERIFICATION__TIMEOUT_SECS", "2");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.verification.endpoint_url, "http://localhost:9000/verify");
        assert_eq!(config.verification.timeout_secs, 2);
    }

    #[test]
    fn test_production_requires_https_verification() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("PREFERENCE_REGISTRY__SERVER__ENVIRONMENT", "production");
        env::set_var(
            "PREFERENCE_REGISTRY__VERIFICATION__ENDPOINT_URL",
            "http://verifier.internal/api",
        );
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_custom_server_port() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("PREFERENCE_REGISTRY__SERVER__PORT", "3000");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
    }
}
