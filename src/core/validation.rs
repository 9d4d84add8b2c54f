//! Booking payload validation
//!
//! Field constraints are declared on [`NewBooking`] with `validator` derive
//! attributes. [`validate_new_booking`] runs them, checks the seating enum,
//! and either returns a fully-defaulted [`ValidBooking`] or every failure at
//! once as a [`ValidationError`].

use chrono::NaiveDate;
use serde_json::{Map, Value};
use std::borrow::Cow;
use validator::Validate;

use crate::core::booking::{
    DEFAULT_CUISINE, DEFAULT_SPECIAL_REQUESTS, NewBooking, SeatingPreference,
};
use crate::core::error::{FieldValidationError, ValidationError};

/// A payload that passed validation with all defaults applied.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidBooking {
    pub customer_name: String,
    pub number_of_guests: u32,
    pub booking_date: NaiveDate,
    pub booking_time: String,
    pub cuisine_preference: String,
    pub special_requests: String,
    pub weather_info: Map<String, Value>,
    pub seating_preference: SeatingPreference,
}

/// Custom validator: name must contain something besides whitespace.
pub fn validate_customer_name(name: &str) -> Result<(), validator::ValidationError> {
    if name.trim().is_empty() {
        return Err(validator::ValidationError::new("blank")
            .with_message(Cow::Borrowed("Customer name is required")));
    }
    Ok(())
}

/// Validate a creation payload and apply the declared defaults.
pub fn validate_new_booking(payload: NewBooking) -> Result<ValidBooking, ValidationError> {
    let mut errors = match payload.validate() {
        Ok(()) => Vec::new(),
        Err(errs) => flatten(&errs),
    };

    let seating = match SeatingPreference::from_input(payload.seating_preference.as_deref()) {
        Ok(seating) => Some(seating),
        Err(unknown) => {
            errors.push(FieldValidationError {
                field: "seatingPreference".to_string(),
                message: format!(
                    "{} for seatingPreference, expected one of {}",
                    unknown,
                    SeatingPreference::ALLOWED.join(", ")
                ),
            });
            None
        }
    };

    let guests = payload
        .number_of_guests
        .map(|n| u32::try_from(n).map_err(|_| n));
    if let Some(Err(n)) = guests
        && n > 0
    {
        errors.push(FieldValidationError {
            field: "numberOfGuests".to_string(),
            message: format!("Number of guests {} is too large", n),
        });
    }

    if !errors.is_empty() {
        errors.sort_by(|a, b| a.field.cmp(&b.field));
        return Err(ValidationError::FieldErrors(errors));
    }

    // Every required field is present once validation passed.
    match (
        payload.customer_name,
        guests,
        payload.booking_date,
        payload.booking_time,
        seating,
    ) {
        (
            Some(name),
            Some(Ok(number_of_guests)),
            Some(booking_date),
            Some(booking_time),
            Some(seating),
        ) => Ok(ValidBooking {
            customer_name: name.trim().to_string(),
            number_of_guests,
            booking_date,
            booking_time,
            cuisine_preference: payload
                .cuisine_preference
                .unwrap_or_else(|| DEFAULT_CUISINE.to_string()),
            special_requests: payload
                .special_requests
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_SPECIAL_REQUESTS.to_string()),
            weather_info: payload.weather_info.unwrap_or_default(),
            seating_preference: seating,
        }),
        _ => Err(ValidationError::InvalidJson {
            message: "incomplete booking payload".to_string(),
        }),
    }
}

/// Turn `validator`'s nested report into a flat, camelCased field list.
fn flatten(errors: &validator::ValidationErrors) -> Vec<FieldValidationError> {
    let mut out = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        let field = camel_case(&field.to_string());
        for err in field_errors.iter() {
            let message = err
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| err.code.to_string());
            out.push(FieldValidationError {
                field: field.clone(),
                message,
            });
        }
    }
    out
}

fn camel_case(snake: &str) -> String {
    let mut out = String::with_capacity(snake.len());
    let mut upper = false;
    for c in snake.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
