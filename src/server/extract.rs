//! Axum extractor for JSON request bodies
//!
//! axum's own `Json` rejects malformed bodies with 415/422 and a plain-text
//! message. `JsonPayload<T>` reports every body problem as a 400
//! `VALIDATION_ERROR` with the usual JSON error body instead.

use crate::core::error::{BookingError, ValidationError};
use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

/// Deserialized request body
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_booking(
///     JsonPayload(payload): JsonPayload<NewBooking>,
/// ) -> Result<Json<Booking>, BookingError> {
///     // payload is well-formed JSON of the right shape
/// }
/// ```
#[derive(Debug, Clone)]
pub struct JsonPayload<T>(pub T);

impl<S, T> FromRequest<S> for JsonPayload<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = BookingError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonPayload(value)),
            Err(rejection) => {
                tracing::debug!(error = %rejection, "rejected request body");
                Err(ValidationError::InvalidJson {
                    message: rejection.body_text(),
                }
                .into())
            }
        }
    }
}
