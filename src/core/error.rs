//! Typed error handling for the booking API
//!
//! Every failure a request can hit is one of the variants of [`BookingError`].
//! Handlers return `Result<_, BookingError>` and the [`IntoResponse`] impl
//! turns the error into an HTTP status plus a JSON body:
//!
//! ```json
//! { "error": "Booking not found", "code": "BOOKING_NOT_FOUND" }
//! ```
//!
//! # Error Categories
//!
//! - [`ValidationError`]: bad or missing input (400)
//! - [`BookingError::NotFound`]: unknown internal identifier (404)
//! - [`BookingError::AlreadyExists`]: duplicate generated `bookingId` (409)
//! - [`StorageError`]: the record store is unreachable or faulted (500)
//! - [`TokenError`]: media access token could not be minted (500)
//! - [`ConfigError`]: startup-only configuration problems

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// The main error type returned by booking operations
#[derive(Debug, Error)]
pub enum BookingError {
    /// Payload failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No booking with this internal identifier
    #[error("Booking not found")]
    NotFound { id: String },

    /// The generated booking identifier collided with a stored one
    #[error("Booking '{booking_id}' already exists")]
    AlreadyExists { booking_id: String },

    /// Storage backend fault
    #[error(transparent)]
    Storage(StorageError),

    /// Token minting fault
    #[error(transparent)]
    Token(#[from] TokenError),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
    /// Error code for programmatic handling
    pub code: &'static str,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl BookingError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            BookingError::Validation(_) => StatusCode::BAD_REQUEST,
            BookingError::NotFound { .. } => StatusCode::NOT_FOUND,
            BookingError::AlreadyExists { .. } => StatusCode::CONFLICT,
            BookingError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BookingError::Token(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            BookingError::Validation(_) => "VALIDATION_ERROR",
            BookingError::NotFound { .. } => "BOOKING_NOT_FOUND",
            BookingError::AlreadyExists { .. } => "BOOKING_ALREADY_EXISTS",
            BookingError::Storage(_) => "STORAGE_ERROR",
            BookingError::Token(_) => "TOKEN_ERROR",
        }
    }

    /// Convert to an error response
    ///
    /// Server-side faults get a fixed public message; their cause is only logged.
    pub fn to_response(&self) -> ErrorResponse {
        let error = match self {
            BookingError::Validation(ValidationError::InvalidJson { .. }) => {
                "Invalid booking payload".to_string()
            }
            BookingError::Validation(_) => "Failed to create booking".to_string(),
            BookingError::Storage(_) => "Server error".to_string(),
            BookingError::Token(_) => "Failed to generate token".to_string(),
            other => other.to_string(),
        };

        ErrorResponse {
            error,
            code: self.error_code(),
            details: self.details(),
        }
    }

    /// Get additional details for the error
    fn details(&self) -> Option<serde_json::Value> {
        match self {
            BookingError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({
                    "message": ValidationError::FieldErrors(errors.clone()).to_string(),
                    "fields": errors,
                }))
            }
            BookingError::Validation(ValidationError::InvalidJson { message }) => {
                Some(serde_json::json!({ "message": message }))
            }
            BookingError::NotFound { id } => Some(serde_json::json!({ "id": id })),
            BookingError::AlreadyExists { booking_id } => {
                Some(serde_json::json!({ "bookingId": booking_id }))
            }
            _ => None,
        }
    }
}

impl From<StorageError> for BookingError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::DuplicateKey { value, .. } => {
                BookingError::AlreadyExists { booking_id: value }
            }
            other => BookingError::Storage(other),
        }
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, code = self.error_code(), "request failed");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    /// One or more fields failed their declared constraints
    #[error("{}", format_field_errors(.0))]
    FieldErrors(Vec<FieldValidationError>),

    /// Body was not JSON or a field had the wrong type
    #[error("Invalid JSON: {message}")]
    InvalidJson { message: String },
}

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    /// Shorthand for a single failing field
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError::FieldErrors(vec![FieldValidationError {
            field: field.into(),
            message: message.into(),
        }])
    }
}

fn format_field_errors(errors: &[FieldValidationError]) -> String {
    let msgs: Vec<String> = errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect();
    format!("Booking validation failed: {}", msgs.join(", "))
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// Backend unreachable or the operation faulted
    #[error("Storage backend '{backend}' is unavailable: {message}")]
    Unavailable { backend: String, message: String },

    /// A unique index rejected the write
    #[error("Duplicate value '{value}' for unique field '{field}'")]
    DuplicateKey { field: String, value: String },

    /// A stored document could not be mapped to a booking (or back)
    #[error("Failed to (de)serialize booking: {message}")]
    Serialization { message: String },
}

impl StorageError {
    pub fn unavailable(backend: &str, err: impl std::fmt::Display) -> Self {
        StorageError::Unavailable {
            backend: backend.to_string(),
            message: err.to_string(),
        }
    }
}

// =============================================================================
// Token Errors
// =============================================================================

/// Errors raised while minting a media access token
#[derive(Debug, Error)]
pub enum TokenError {
    /// API key or secret not configured
    #[error("Missing media service credential: {0}")]
    MissingCredential(&'static str),

    /// JWT signing failed
    #[error("Failed to sign access token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration, raised before the server starts
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration file
    #[error("Failed to parse config file '{file}': {message}")]
    ParseError { file: String, message: String },

    /// Missing required setting
    #[error("Missing required setting '{0}'")]
    MissingField(&'static str),

    /// Invalid value in configuration
    #[error("Invalid value '{value}' for '{field}': {message}")]
    InvalidValue {
        field: &'static str,
        value: String,
        message: String,
    },

    /// IO error while reading configuration
    #[error("IO error reading '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result alias used across the core
pub type BookingResult<T> = Result<T, BookingError>;
