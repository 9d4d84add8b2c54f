//! HTTP handlers for bookings and media tokens

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use std::sync::Arc;

use crate::core::booking::{Booking, NewBooking};
use crate::core::error::BookingError;
use crate::core::service::BookingService;
use crate::media::{AccessToken, TokenIssuer, TokenRequest};
use crate::server::extract::JsonPayload;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub bookings: BookingService,
    pub tokens: Arc<dyn TokenIssuer>,
}

/// Body returned after a successful delete
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: &'static str,
}

/// POST /api/bookings
pub async fn create_booking(
    State(state): State<AppState>,
    JsonPayload(payload): JsonPayload<NewBooking>,
) -> Result<(StatusCode, Json<Booking>), BookingError> {
    tracing::debug!(?payload, "Received booking request");

    match state.bookings.create(payload).await {
        Ok(booking) => Ok((StatusCode::CREATED, Json(booking))),
        Err(err) => {
            tracing::warn!(error = %err, "Error saving booking");
            Err(err)
        }
    }
}

/// GET /api/bookings
pub async fn list_bookings(
    State(state): State<AppState>,
) -> Result<Json<Vec<Booking>>, BookingError> {
    Ok(Json(state.bookings.list().await?))
}

/// GET /api/bookings/{id}
pub async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Booking>, BookingError> {
    Ok(Json(state.bookings.get_by_id(&id).await?))
}

/// DELETE /api/bookings/{id}
pub async fn delete_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, BookingError> {
    state.bookings.delete(&id).await?;
    Ok(Json(DeleteResponse {
        message: "Booking cancelled successfully",
    }))
}

/// GET /api/token
pub async fn issue_token(State(state): State<AppState>) -> Result<Json<AccessToken>, BookingError> {
    let request = TokenRequest::anonymous_visitor();
    tracing::info!(room = %request.room, "Token requested");

    let token = state.tokens.issue(&request)?;
    tracing::info!(identity = %request.identity, "Token generated");
    Ok(Json(token))
}

/// GET /
pub async fn index() -> &'static str {
    "Restaurant Booking API is running..."
}
