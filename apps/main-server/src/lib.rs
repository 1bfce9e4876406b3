//! DinePass Server
//!
//! The server is the hub of a DinePass deployment. It owns the visit
//! log and the cooldown state derived from it, and it carries the
//! supporting surface for the restaurant group: employee approval,
//! traffic reports, and maintenance tickets.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod state;

use std::sync::Arc;

use auth::{JwtConfig, JwtManager};
use axum::{
    Router,
    routing::{get, post},
};
use dine_store::DineStore;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::Config;
use crate::state::{AppState, create_shared_state};

/// Creates the application router with all routes configured.
pub fn create_app<S: DineStore + 'static>(state: Arc<AppState<S>>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let protected = api::create_router().route_layer(axum::middleware::from_fn_with_state(
        Arc::clone(&state),
        middleware::auth::auth_middleware::<S>,
    ));

    Router::new()
        .merge(protected)
        // Login must stay reachable without a token; it is how one is
        // obtained.
        .route("/api/auth/login", post(api::auth::login))
        .route("/health", get(api::health_check))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Creates the application state with the given configuration and store.
pub fn create_state<S: DineStore + 'static>(config: Config, store: S) -> Arc<AppState<S>> {
    let jwt_manager = if config.auth_enabled() {
        config.jwt_secret.as_ref().map(|secret| {
            let jwt_config =
                JwtConfig::new(secret).with_expiration_hours(config.jwt_expiration_hours);
            JwtManager::new(jwt_config)
        })
    } else {
        None
    };

    create_shared_state(config, store, jwt_manager)
}

/// Initializes tracing with the given log level.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
