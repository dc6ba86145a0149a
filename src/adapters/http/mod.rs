//! HTTP adapters - REST API implementations.
//!
//! [`build_app`] assembles the registration routes, the health probe, and
//! the tower-http middleware stack.

pub mod registration;

pub use registration::{registration_router, RegistrationApiError, RegistrationAppState};

use axum::routing::get;
use axum::{Json, Router};
use http::{header, HeaderValue, Method};
use serde_json::{json, Value};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use tracing::Level;

use crate::config::ServerConfig;

/// GET /health - Liveness probe
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Routes without middleware; used directly by router tests.
pub fn api_router(state: RegistrationAppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(registration_router())
        .with_state(state)
}

/// Full application router with tracing, CORS, and request timeout layers.
pub fn build_app(state: RegistrationAppState, server: &ServerConfig) -> Router {
    api_router(state)
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors_layer(server))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
}

/// Explicit origins when configured; otherwise permissive in development
/// and same-origin only in production.
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    if !origins.is_empty() {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE])
    } else if server.is_production() {
        CorsLayer::new()
    } else {
        CorsLayer::permissive()
    }
}
