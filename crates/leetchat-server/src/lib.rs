//! Leetchat Server
//!
//! Thin HTTP adapter over [`leetchat_core::Orchestrator`]: extracts the
//! message, history and caller credentials from a request and maps the
//! result to a `{status, message}` envelope.

mod error;
mod routes;

pub use error::ApiError;
pub use routes::{AskRequest, AskResponse, WelcomeResponse};

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use leetchat_core::Orchestrator;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared state for every handler
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
}

impl AppState {
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
        }
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::root))
        .route("/chat/ask", post(routes::ask))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
