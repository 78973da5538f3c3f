//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: one service per entity over a single storage backend
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `errors.rs`: `{"data": ...}` success bodies and `{"status", "message"}` errors

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use crate::middleware;

pub mod errors;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(services: Arc<AppServices>) -> Router {
    let api = routes::router().layer(Extension(services));

    Router::new()
        .merge(routes::system_router())
        .nest("/api/v1", api)
        .layer(ServiceBuilder::new().layer(axum::middleware::from_fn(middleware::trace_request)))
}
