//! # Restaurant Booking API
//!
//! An HTTP service that records restaurant reservations and hands out
//! access tokens for a real-time voice-agent room.
//!
//! ## Features
//!
//! - **Validated intake**: payloads are checked field by field and answered with
//!   a structured `VALIDATION_ERROR` body
//! - **Generated identifiers**: every booking gets a unique, monotonic `BOOK-<millis>` id
//! - **Pluggable storage**: MongoDB (default feature) or an in-memory store
//! - **Media tokens**: short-lived LiveKit-compatible room credentials
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use booking::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     ServerBuilder::new()
//!         .with_store(InMemoryBookingStore::new())
//!         .serve("127.0.0.1:3000")
//!         .await
//! }
//! ```

pub mod config;
pub mod core;
pub mod demo;
pub mod media;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        Booking, BookingError, BookingIdGenerator, BookingResult, BookingService, BookingStatus,
        BookingStore, NewBooking, SeatingPreference, StorageError, ValidationError,
    };

    // === Storage ===
    pub use crate::storage::InMemoryBookingStore;
    #[cfg(feature = "mongodb_backend")]
    pub use crate::storage::MongoBookingStore;

    // === Media ===
    pub use crate::media::{AccessToken, LiveKitTokenIssuer, TokenIssuer, TokenRequest};

    // === Config ===
    pub use crate::config::{AppConfig, StorageBackend};

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, NaiveDate, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
