//! Core module containing the booking entity, its validation and the record store

pub mod booking;
pub mod error;
pub mod identifier;
pub mod service;
pub mod store;
pub mod validation;

pub use booking::{Booking, BookingStatus, NewBooking, SeatingPreference};
pub use error::{BookingError, BookingResult, StorageError, ValidationError};
pub use identifier::BookingIdGenerator;
pub use service::BookingService;
pub use store::BookingStore;
