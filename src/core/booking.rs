//! The booking entity and its creation payload

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use crate::core::validation::validate_customer_name;

pub const DEFAULT_CUISINE: &str = "Any";
pub const DEFAULT_SPECIAL_REQUESTS: &str = "None";

/// A stored restaurant reservation.
///
/// Instances are only ever produced by the record store; callers work on
/// clones returned from its operations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Internal identifier in the store's own format
    ///
    /// New records get a UUID string. Documents written by earlier
    /// deployments of the service carry a 24-hex ObjectId instead.
    #[serde(rename = "_id")]
    pub id: String,
    /// Human-readable generated identifier (`BOOK-<millis>`)
    #[serde(default)]
    pub booking_id: String,
    pub customer_name: String,
    pub number_of_guests: u32,
    pub booking_date: NaiveDate,
    pub booking_time: String,
    #[serde(default = "default_cuisine")]
    pub cuisine_preference: String,
    #[serde(default = "default_special_requests")]
    pub special_requests: String,
    /// Opaque weather snapshot, never interpreted
    #[serde(default)]
    pub weather_info: Map<String, Value>,
    #[serde(default)]
    pub seating_preference: SeatingPreference,
    #[serde(default)]
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

fn default_cuisine() -> String {
    DEFAULT_CUISINE.to_string()
}

fn default_special_requests() -> String {
    DEFAULT_SPECIAL_REQUESTS.to_string()
}

/// Where the party wants to sit
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatingPreference {
    Indoor,
    Outdoor,
    #[default]
    Any,
}

impl SeatingPreference {
    pub const ALLOWED: [&'static str; 3] = ["indoor", "outdoor", "any"];

    pub fn as_str(&self) -> &'static str {
        match self {
            SeatingPreference::Indoor => "indoor",
            SeatingPreference::Outdoor => "outdoor",
            SeatingPreference::Any => "any",
        }
    }

    /// Resolve client input: missing or blank means `Any`.
    pub fn from_input(input: Option<&str>) -> Result<Self, UnknownVariant> {
        match input.map(str::trim) {
            None | Some("") => Ok(SeatingPreference::Any),
            Some(value) => value.parse(),
        }
    }
}

impl FromStr for SeatingPreference {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALLOWED
            .iter()
            .position(|allowed| allowed.eq_ignore_ascii_case(s))
            .map(|idx| match idx {
                0 => SeatingPreference::Indoor,
                1 => SeatingPreference::Outdoor,
                _ => SeatingPreference::Any,
            })
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

impl fmt::Display for SeatingPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of a booking.
///
/// Only `Confirmed` is ever assigned; deletion is a hard removal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Confirmed,
    Pending,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Pending => "pending",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input string that matches none of an enum's values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant(pub String);

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` is not a valid enum value", self.0)
    }
}

impl std::error::Error for UnknownVariant {}

/// Client-supplied payload for `POST /api/bookings`.
///
/// Every field is optional at the serde level so that missing values are
/// reported by validation (with a message per field) rather than as an
/// opaque deserialization failure.
#[derive(Clone, Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    #[validate(
        required(message = "Customer name is required"),
        custom(function = "validate_customer_name")
    )]
    pub customer_name: Option<String>,

    #[validate(
        required(message = "Number of guests is required"),
        range(min = 1, message = "Must have at least 1 guest")
    )]
    pub number_of_guests: Option<i64>,

    #[validate(required(message = "Booking date is required"))]
    #[serde(default, deserialize_with = "deserialize_booking_date")]
    pub booking_date: Option<NaiveDate>,

    #[validate(
        required(message = "Booking time is required"),
        length(min = 1, message = "Booking time is required")
    )]
    pub booking_time: Option<String>,

    pub cuisine_preference: Option<String>,

    pub special_requests: Option<String>,

    pub weather_info: Option<Map<String, Value>>,

    pub seating_preference: Option<String>,
}

/// Accept either a calendar date (`2024-06-01`) or a full RFC 3339 timestamp.
fn deserialize_booking_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw.map(|s| parse_booking_date(&s).map_err(serde::de::Error::custom))
        .transpose()
}

/// Parse a booking date in any of the accepted formats.
pub fn parse_booking_date(input: &str) -> Result<NaiveDate, String> {
    let trimmed = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .map_err(|_| format!("invalid booking date '{}'", input))
}
