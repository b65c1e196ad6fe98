//! HTTP API module
//!
//! The bridge the game host talks to: chat forwarding, player presence,
//! display labels, status, and the world event stream.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{delete, get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/chat", post(chat_handler))
        .route("/players", post(join_handler))
        .route("/players/:name", delete(leave_handler))
        .route("/players/:name/display", get(display_handler))
        .route("/status", get(status_handler))
        .route("/events", get(events_handler))
        .route("/health", get(health_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
