//! Persistence trait for booking records

use crate::core::booking::Booking;
use crate::core::error::StorageError;
use async_trait::async_trait;

/// Storage backend for bookings
///
/// Implementations own the persisted representation. They must enforce
/// uniqueness of `booking_id` and report a collision as
/// [`StorageError::DuplicateKey`].
///
/// Internal identifiers are passed as received. An identifier the backend
/// cannot interpret matches nothing; it is never an error.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Persist a new booking and return the stored version
    async fn insert(&self, booking: Booking) -> Result<Booking, StorageError>;

    /// All bookings, most recently created first
    async fn list(&self) -> Result<Vec<Booking>, StorageError>;

    /// Fetch a booking by internal identifier
    async fn get(&self, id: &str) -> Result<Option<Booking>, StorageError>;

    /// Remove a booking; returns `false` when nothing matched
    async fn delete(&self, id: &str) -> Result<bool, StorageError>;
}
