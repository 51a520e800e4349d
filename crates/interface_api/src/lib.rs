//! HTTP API Layer
//!
//! HTTP ingress for form submissions using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: the submission endpoint and health checks
//! - **Dispatch**: form-name tag to business operation mapping
//! - **Wiring**: assembly of the services over the in-memory adapters
//! - **Error Handling**: consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, wiring::build_in_memory_state};
//!
//! let (state, _backends) = build_in_memory_state(report_fields);
//! let app = create_router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod wiring;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::dispatch::FormDispatcher;
use crate::handlers::{health, submissions};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<FormDispatcher>,
}

/// Creates the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/submissions", post(submissions::submit))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
