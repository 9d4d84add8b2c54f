//! Route table for the booking API

use crate::server::handlers::{
    AppState, create_booking, delete_booking, get_booking, index, issue_token, list_bookings,
};
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build all routes:
/// - GET    /                    - Banner
/// - GET    /health, /healthz    - Health check
/// - POST   /api/bookings        - Create a booking
/// - GET    /api/bookings        - List bookings, newest first
/// - GET    /api/bookings/{id}   - Get a booking by internal id
/// - DELETE /api/bookings/{id}   - Delete a booking
/// - GET    /api/token           - Mint a media room access token
pub fn build_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .route("/api/bookings", get(list_bookings).post(create_booking))
        .route("/api/bookings/{id}", get(get_booking).delete(delete_booking))
        .route("/api/token", get(issue_token))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint handler
async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
