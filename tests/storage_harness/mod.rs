//! Shared test harness for booking store testing
//!
//! Provides builders for `Booking` records and creation payloads, plus the
//! `booking_store_tests!` and `rest_integration_tests!` macros that run the
//! same contract against every backend.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//!
//! booking_store_tests!(InMemoryBookingStore::new());
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod booking_store_tests;
#[macro_use]
pub mod rest_tests;

use booking::core::booking::{Booking, BookingStatus, NewBooking, SeatingPreference};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::{Map, Value, json};
use uuid::Uuid;

/// Fixed instant plus `offset_ms`, at millisecond precision so every backend stores it exactly.
pub fn at_millis(offset_ms: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(1_700_000_000_000 + offset_ms)
        .single()
        .expect("valid timestamp")
}

/// A fully populated booking created `offset_ms` after the fixed instant.
pub fn sample_booking(customer: &str, offset_ms: i64) -> Booking {
    let created_at = at_millis(offset_ms);
    let mut weather_info = Map::new();
    weather_info.insert("condition".to_string(), json!("clear"));
    weather_info.insert("temperature".to_string(), json!(21.5));

    Booking {
        id: Uuid::new_v4().to_string(),
        booking_id: format!("BOOK-{}", created_at.timestamp_millis()),
        customer_name: customer.to_string(),
        number_of_guests: 2,
        booking_date: NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date"),
        booking_time: "19:00".to_string(),
        cuisine_preference: "Italian".to_string(),
        special_requests: "None".to_string(),
        weather_info,
        seating_preference: SeatingPreference::Indoor,
        status: BookingStatus::Confirmed,
        created_at,
    }
}

/// Creation payload as the HTTP layer would deserialize it.
pub fn booking_payload(customer: &str) -> NewBooking {
    serde_json::from_value(booking_json(customer)).expect("valid payload")
}

/// JSON body for `POST /api/bookings`.
pub fn booking_json(customer: &str) -> Value {
    json!({
        "customerName": customer,
        "numberOfGuests": 2,
        "bookingDate": "2024-06-01",
        "bookingTime": "19:00"
    })
}

/// Assert that a list contains exactly `n` items.
pub fn assert_count<T>(list: &[T], expected: usize) {
    assert_eq!(
        list.len(),
        expected,
        "Expected {} items, got {}",
        expected,
        list.len()
    );
}

/// Assert the customer names of a listing, in order.
pub fn assert_customers(list: &[Booking], expected: &[&str]) {
    let names: Vec<&str> = list.iter().map(|b| b.customer_name.as_str()).collect();
    assert_eq!(names, expected, "unexpected listing order");
}
