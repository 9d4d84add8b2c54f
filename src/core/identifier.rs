//! Generated booking identifiers
//!
//! Identifiers look like `BOOK-1717261200123`: a fixed prefix plus the
//! issuing instant in Unix milliseconds. The generator never hands out the
//! same millisecond twice; when several bookings arrive within one
//! millisecond (or the wall clock steps backwards) the value is bumped past
//! the last one issued.

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

pub const BOOKING_ID_PREFIX: &str = "BOOK-";

/// An identifier together with the instant it stands for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IssuedId {
    pub booking_id: String,
    pub issued_at: DateTime<Utc>,
}

/// Monotonic `BOOK-<millis>` generator.
#[derive(Debug, Default)]
pub struct BookingIdGenerator {
    last_issued: AtomicI64,
}

impl BookingIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next identifier using the current wall clock.
    pub fn next_id(&self) -> IssuedId {
        self.next_id_at(Utc::now())
    }

    /// Issue the next identifier as if the wall clock read `now`.
    pub fn next_id_at(&self, now: DateTime<Utc>) -> IssuedId {
        let now_ms = now.timestamp_millis();
        let previous = self
            .last_issued
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| {
                Some(now_ms.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        let millis = now_ms.max(previous + 1);

        IssuedId {
            booking_id: format!("{BOOKING_ID_PREFIX}{millis}"),
            issued_at: DateTime::from_timestamp_millis(millis).unwrap_or(now),
        }
    }
}
