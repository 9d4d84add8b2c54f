//! The booking record store operations exposed to the HTTP layer

use crate::core::booking::{Booking, BookingStatus, NewBooking};
use crate::core::error::{BookingError, BookingResult};
use crate::core::identifier::BookingIdGenerator;
use crate::core::store::BookingStore;
use crate::core::validation::validate_new_booking;
use std::sync::Arc;
use uuid::Uuid;

/// Validates, identifies, persists, enumerates, fetches and removes bookings.
///
/// Holds no state besides the identifier generator; every record lives in
/// the injected [`BookingStore`].
#[derive(Clone)]
pub struct BookingService {
    store: Arc<dyn BookingStore>,
    ids: Arc<BookingIdGenerator>,
}

impl BookingService {
    pub fn new(store: Arc<dyn BookingStore>) -> Self {
        Self {
            store,
            ids: Arc::new(BookingIdGenerator::new()),
        }
    }

    /// Validate a payload, assign identifiers and persist it.
    pub async fn create(&self, payload: NewBooking) -> BookingResult<Booking> {
        let valid = validate_new_booking(payload)?;
        let issued = self.ids.next_id();

        let booking = Booking {
            id: Uuid::new_v4().to_string(),
            booking_id: issued.booking_id,
            customer_name: valid.customer_name,
            number_of_guests: valid.number_of_guests,
            booking_date: valid.booking_date,
            booking_time: valid.booking_time,
            cuisine_preference: valid.cuisine_preference,
            special_requests: valid.special_requests,
            weather_info: valid.weather_info,
            seating_preference: valid.seating_preference,
            status: BookingStatus::Confirmed,
            created_at: issued.issued_at,
        };

        let saved = self.store.insert(booking).await?;
        tracing::info!(booking_id = %saved.booking_id, id = %saved.id, "Booking saved");
        Ok(saved)
    }

    /// All bookings, newest first.
    pub async fn list(&self) -> BookingResult<Vec<Booking>> {
        Ok(self.store.list().await?)
    }

    /// Fetch by internal identifier. Malformed identifiers are reported as not found.
    pub async fn get_by_id(&self, id: &str) -> BookingResult<Booking> {
        self.store.get(id).await?.ok_or_else(|| not_found(id))
    }

    /// Permanently remove a booking.
    pub async fn delete(&self, id: &str) -> BookingResult<()> {
        if !self.store.delete(id).await? {
            return Err(not_found(id));
        }
        tracing::info!(id, "Booking deleted");
        Ok(())
    }
}

fn not_found(id: &str) -> BookingError {
    tracing::warn!(id, "Booking not found");
    BookingError::NotFound { id: id.to_string() }
}
