//! In-memory implementation of BookingStore for testing and development

use crate::core::booking::Booking;
use crate::core::error::StorageError;
use crate::core::store::BookingStore;
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

const BACKEND: &str = "in-memory";

/// In-memory booking store
///
/// Bookings are kept in insertion order; `list` sorts a snapshot by
/// `created_at` descending, newest insertion first on ties. Uses RwLock
/// for thread-safe access.
#[derive(Clone, Default)]
pub struct InMemoryBookingStore {
    bookings: Arc<RwLock<Vec<Booking>>>,
}

impl InMemoryBookingStore {
    /// Create a new, empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingStore for InMemoryBookingStore {
    async fn insert(&self, booking: Booking) -> Result<Booking, StorageError> {
        let mut bookings = self
            .bookings
            .write()
            .map_err(|e| StorageError::unavailable(BACKEND, format!("write lock poisoned: {e}")))?;

        if bookings.iter().any(|b| b.booking_id == booking.booking_id) {
            return Err(StorageError::DuplicateKey {
                field: "bookingId".to_string(),
                value: booking.booking_id,
            });
        }
        if bookings.iter().any(|b| b.id == booking.id) {
            return Err(StorageError::DuplicateKey {
                field: "_id".to_string(),
                value: booking.id.clone(),
            });
        }

        bookings.push(booking.clone());
        Ok(booking)
    }

    async fn list(&self) -> Result<Vec<Booking>, StorageError> {
        let bookings = self
            .bookings
            .read()
            .map_err(|e| StorageError::unavailable(BACKEND, format!("read lock poisoned: {e}")))?;

        let mut snapshot: Vec<Booking> = bookings.iter().rev().cloned().collect();
        // Stable sort keeps reverse insertion order for equal timestamps.
        snapshot.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(snapshot)
    }

    async fn get(&self, id: &str) -> Result<Option<Booking>, StorageError> {
        let bookings = self
            .bookings
            .read()
            .map_err(|e| StorageError::unavailable(BACKEND, format!("read lock poisoned: {e}")))?;

        Ok(bookings.iter().find(|b| b.id == id).cloned())
    }

    async fn delete(&self, id: &str) -> Result<bool, StorageError> {
        let mut bookings = self
            .bookings
            .write()
            .map_err(|e| StorageError::unavailable(BACKEND, format!("write lock poisoned: {e}")))?;

        let before = bookings.len();
        bookings.retain(|b| b.id != id);
        Ok(bookings.len() != before)
    }
}
