//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: the service facade composing auth, ledger and storage
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs and JSON mapping
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, routing::post, Extension, Router};

use ledgerkeep_auth::AuthConfig;
use ledgerkeep_infra::StoreHandle;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: AuthConfig, store: StoreHandle) -> Router {
    let services = Arc::new(services::AppServices::new(config, store));
    let auth_state = middleware::AuthState {
        services: services.clone(),
    };

    // Protected routes: everything except login and health requires a
    // resolved principal.
    let protected = routes::router()
        .layer(Extension(services.clone()))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .route("/token", post(routes::auth::login))
        .layer(Extension(services))
        .merge(protected)
}
