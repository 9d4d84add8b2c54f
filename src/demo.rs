//! Demo bookings inserted at startup when `seed_demo` is enabled

use crate::core::booking::{Booking, NewBooking};
use crate::core::error::BookingResult;
use crate::core::service::BookingService;
use chrono::NaiveDate;

fn demo_booking(
    name: &str,
    guests: i64,
    date: (i32, u32, u32),
    time: &str,
    requests: &str,
    seating: &str,
) -> NewBooking {
    NewBooking {
        customer_name: Some(name.to_string()),
        number_of_guests: Some(guests),
        booking_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2),
        booking_time: Some(time.to_string()),
        special_requests: Some(requests.to_string()),
        seating_preference: Some(seating.to_string()),
        ..NewBooking::default()
    }
}

/// Payloads for the two demo reservations
pub fn demo_bookings() -> Vec<NewBooking> {
    vec![
        demo_booking("Demo User 1", 2, (2023, 12, 25), "19:00", "Window seat", "indoor"),
        demo_booking("Demo User 2", 4, (2023, 12, 31), "20:00", "Vegan options", "any"),
    ]
}

/// Create the demo bookings through the regular validation path.
pub async fn seed_demo_bookings(service: &BookingService) -> BookingResult<Vec<Booking>> {
    let mut created = Vec::new();
    for payload in demo_bookings() {
        let booking = service.create(payload).await?;
        tracing::info!(booking_id = %booking.booking_id, customer = %booking.customer_name, "Seeded demo booking");
        created.push(booking);
    }
    Ok(created)
}
