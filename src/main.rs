//! Preference Registry server entrypoint.

use std::error::Error;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use preference_registry::adapters::{
    build_app, postgres, HttpVerificationClient, InMemoryRegistrationStore,
    PostgresRegistrationStore, RegistrationAppState,
};
use preference_registry::config::{AppConfig, StorageBackend};
use preference_registry::ports::RegistrationStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let store = build_store(&config).await?;
    let verifier = Arc::new(HttpVerificationClient::new(&config.verification)?);
    tracing::info!(
        "Verification service at {} (timeout {}s)",
        config.verification.endpoint_url,
        config.verification.timeout_secs
    );

    let state = RegistrationAppState::new(store, verifier);
    let app = build_app(state, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// JSON output in production, human-readable otherwise. `RUST_LOG` wins
/// over the configured level.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn build_store(
    config: &AppConfig,
) -> Result<Arc<dyn RegistrationStore>, Box<dyn Error + Send + Sync>> {
    match config.database.backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory store; registrations are lost on restart");
            Ok(Arc::new(InMemoryRegistrationStore::new()))
        }
        StorageBackend::Postgres => {
            let pool = postgres::connect(&config.database).await?;
            tracing::info!("Database pool created");

            if config.database.run_migrations {
                postgres::run_migrations(&pool).await?;
                tracing::info!("Database migrations applied");
            }

            Ok(Arc::new(PostgresRegistrationStore::new(pool)))
        }
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
