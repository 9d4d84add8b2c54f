//! HTTP layer for the booking API
//!
//! `ServerBuilder` wires a [`BookingStore`](crate::core::store::BookingStore)
//! and a [`TokenIssuer`](crate::media::TokenIssuer) into an axum router.

pub mod builder;
pub mod extract;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::AppState;
