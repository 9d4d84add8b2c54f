//! MongoDB storage backend using the official MongoDB async driver.
//!
//! Provides `MongoBookingStore`, backed by a single `bookings` collection in a
//! `mongodb::Database`.
//!
//! # Feature flag
//!
//! This module is gated behind the `mongodb_backend` feature flag (enabled by
//! default).
//!
//! # Serialization strategy
//!
//! Bookings are serialized via `serde_json::Value` as an intermediate format,
//! then converted to BSON documents, so the internal UUID lands in `_id` as a
//! string. `createdAt` is the one exception: it is stored as a native BSON
//! datetime so that sorting happens on the instant rather than on its text.
//!
//! The collection may also hold documents written by earlier deployments of
//! the service: ObjectId `_id`, datetime `bookingDate`, a `__v` counter.
//! Those are normalized on read, and an ObjectId hex string is accepted
//! wherever an internal identifier is.
//!
//! Uniqueness of `bookingId` is enforced by a unique index created in
//! [`MongoBookingStore::ensure_indexes`]. Connecting never waits for the
//! server; index creation runs in the background and is retried before the
//! next insert until it succeeds.

use crate::core::booking::Booking;
use crate::core::error::StorageError;
use crate::core::store::BookingStore;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat};
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document, doc};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::{Collection, Database, IndexModel};
use std::sync::Arc;
use tokio::sync::OnceCell;

const BACKEND: &str = "mongodb";
const COLLECTION: &str = "bookings";
const CREATED_AT: &str = "createdAt";
const BOOKING_DATE: &str = "bookingDate";
const NUMBER_OF_GUESTS: &str = "numberOfGuests";
const DUPLICATE_KEY_CODE: i32 = 11000;

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Convert a serde_json::Value (expected to be an Object) into a BSON Document,
/// storing `createdAt` as a native datetime.
fn json_to_document(json: serde_json::Value) -> Result<Document, StorageError> {
    let bson_val = mongodb::bson::to_bson(&json).map_err(|e| StorageError::Serialization {
        message: format!("Failed to convert JSON to BSON: {e}"),
    })?;

    let mut doc = match bson_val {
        Bson::Document(d) => d,
        _ => {
            return Err(StorageError::Serialization {
                message: "Expected BSON document, got non-object".to_string(),
            });
        }
    };

    let created_at = match doc.get_str(CREATED_AT) {
        Ok(text) => Some(DateTime::parse_from_rfc3339(text).map_err(|e| {
            StorageError::Serialization {
                message: format!("Invalid createdAt '{text}': {e}"),
            }
        })?),
        Err(_) => None,
    };
    if let Some(instant) = created_at {
        doc.insert(
            CREATED_AT,
            mongodb::bson::DateTime::from_millis(instant.timestamp_millis()),
        );
    }

    Ok(doc)
}

/// Convert a BSON Document back into a serde_json::Value, turning the native
/// `createdAt` datetime back into RFC 3339 text.
fn document_to_json(mut doc: Document) -> serde_json::Value {
    normalize_legacy_fields(&mut doc);

    let created_at = doc
        .get_datetime(CREATED_AT)
        .ok()
        .and_then(|instant| DateTime::from_timestamp_millis(instant.timestamp_millis()));
    if let Some(utc) = created_at {
        doc.insert(CREATED_AT, utc.to_rfc3339_opts(SecondsFormat::Millis, true));
    }

    Bson::Document(doc).into_relaxed_extjson()
}

/// Rewrite fields of older documents into the shapes `Booking` reads:
/// ObjectId `_id` as hex, datetime `bookingDate` as its UTC calendar day,
/// whole-number double `numberOfGuests` as an integer.
fn normalize_legacy_fields(doc: &mut Document) {
    let object_id = doc.get_object_id("_id").ok();
    if let Some(oid) = object_id {
        doc.insert("_id", oid.to_hex());
    }

    let booking_date = doc
        .get_datetime(BOOKING_DATE)
        .ok()
        .and_then(|instant| DateTime::from_timestamp_millis(instant.timestamp_millis()));
    if let Some(utc) = booking_date {
        doc.insert(BOOKING_DATE, utc.date_naive().format("%Y-%m-%d").to_string());
    }

    let guests = doc.get_f64(NUMBER_OF_GUESTS).ok();
    if let Some(n) = guests.filter(|n| n.fract() == 0.0) {
        doc.insert(NUMBER_OF_GUESTS, n as i64);
    }
}

/// Filter matching an internal identifier in either stored format.
fn id_filter(id: &str) -> Document {
    match ObjectId::parse_str(id) {
        Ok(oid) => doc! { "_id": { "$in": [oid, id] } },
        Err(_) => doc! { "_id": id },
    }
}

// ---------------------------------------------------------------------------
// MongoBookingStore
// ---------------------------------------------------------------------------

/// Booking storage backed by MongoDB.
///
/// # Example
///
/// ```rust,ignore
/// use mongodb::Client;
/// use booking::storage::MongoBookingStore;
///
/// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
/// let store = MongoBookingStore::new(client.database("Restaurant-AI"));
/// store.ensure_indexes().await?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoBookingStore {
    database: Database,
    indexes_ready: Arc<OnceCell<()>>,
}

impl MongoBookingStore {
    /// Create a new `MongoBookingStore` with the given database handle.
    pub fn new(database: Database) -> Self {
        Self {
            database,
            indexes_ready: Arc::new(OnceCell::new()),
        }
    }

    /// Build a store for `uri` / `db_name` without contacting the server.
    ///
    /// Only an unusable connection string is an error. An unreachable server
    /// is logged by the background index task, and requests fail with
    /// [`StorageError::Unavailable`] until it comes back.
    pub async fn connect(uri: &str, db_name: &str) -> Result<Self, StorageError> {
        let client = mongodb::Client::with_uri_str(uri)
            .await
            .map_err(|e| StorageError::unavailable(BACKEND, e))?;
        let store = Self::new(client.database(db_name));

        let background = store.clone();
        tokio::spawn(async move {
            match background.ensure_indexes_once().await {
                Ok(()) => tracing::info!("MongoDB indexes ready"),
                Err(e) => tracing::error!(error = %e, "MongoDB connection error"),
            }
        });

        Ok(store)
    }

    /// Get a reference to the underlying database.
    pub fn database(&self) -> &Database {
        &self.database
    }

    fn collection(&self) -> Collection<Document> {
        self.database.collection(COLLECTION)
    }

    /// Create indexes on the bookings collection.
    ///
    /// - `bookingId: 1` unique, so a repeated generated id is rejected
    /// - `createdAt: -1` for the default listing order
    ///
    /// Idempotent; safe to call on every startup.
    pub async fn ensure_indexes(&self) -> Result<(), StorageError> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "bookingId": 1 })
                .options(IndexOptions::builder().unique(true).build())
                .build(),
            IndexModel::builder().keys(doc! { CREATED_AT: -1 }).build(),
        ];

        self.collection()
            .create_indexes(indexes)
            .await
            .map_err(|e| StorageError::unavailable(BACKEND, e))?;

        Ok(())
    }

    /// Run [`Self::ensure_indexes`] until it has succeeded once.
    async fn ensure_indexes_once(&self) -> Result<(), StorageError> {
        self.indexes_ready
            .get_or_try_init(|| self.ensure_indexes())
            .await
            .map(|_| ())
    }

    fn booking_to_document(booking: &Booking) -> Result<Document, StorageError> {
        let json = serde_json::to_value(booking).map_err(|e| StorageError::Serialization {
            message: format!("Failed to serialize booking: {e}"),
        })?;
        json_to_document(json)
    }

    fn document_to_booking(doc: Document) -> Result<Booking, StorageError> {
        let json = document_to_json(doc);
        serde_json::from_value(json).map_err(|e| StorageError::Serialization {
            message: format!("Failed to deserialize booking from document: {e}"),
        })
    }
}

/// Map a driver error, recognising unique index violations.
fn map_write_error(err: mongodb::error::Error, booking: &Booking) -> StorageError {
    if let ErrorKind::Write(WriteFailure::WriteError(write_error)) = err.kind.as_ref()
        && write_error.code == DUPLICATE_KEY_CODE
    {
        return if write_error.message.contains("bookingId") {
            StorageError::DuplicateKey {
                field: "bookingId".to_string(),
                value: booking.booking_id.clone(),
            }
        } else {
            StorageError::DuplicateKey {
                field: "_id".to_string(),
                value: booking.id.clone(),
            }
        };
    }
    StorageError::unavailable(BACKEND, err)
}

#[async_trait]
impl BookingStore for MongoBookingStore {
    /// Insert the booking and read it back to return the stored version.
    async fn insert(&self, booking: Booking) -> Result<Booking, StorageError> {
        self.ensure_indexes_once().await?;
        let doc = Self::booking_to_document(&booking)?;

        self.collection()
            .insert_one(doc)
            .await
            .map_err(|e| map_write_error(e, &booking))?;

        let stored = self
            .collection()
            .find_one(id_filter(&booking.id))
            .await
            .map_err(|e| StorageError::unavailable(BACKEND, e))?
            .ok_or_else(|| StorageError::unavailable(BACKEND, "booking missing after insert"))?;

        Self::document_to_booking(stored)
    }

    /// List all bookings, newest first. Documents that cannot be read as a
    /// booking are logged and left out.
    async fn list(&self) -> Result<Vec<Booking>, StorageError> {
        let cursor = self
            .collection()
            .find(doc! {})
            .sort(doc! { CREATED_AT: -1, "bookingId": -1 })
            .await
            .map_err(|e| StorageError::unavailable(BACKEND, e))?;

        let docs: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| StorageError::unavailable(BACKEND, e))?;

        Ok(docs
            .into_iter()
            .filter_map(|doc| {
                let id = doc.get("_id").cloned();
                match Self::document_to_booking(doc) {
                    Ok(booking) => Some(booking),
                    Err(e) => {
                        tracing::warn!(id = ?id, error = %e, "Skipping unreadable booking document");
                        None
                    }
                }
            })
            .collect())
    }

    async fn get(&self, id: &str) -> Result<Option<Booking>, StorageError> {
        let doc = self
            .collection()
            .find_one(id_filter(id))
            .await
            .map_err(|e| StorageError::unavailable(BACKEND, e))?;

        doc.map(Self::document_to_booking).transpose()
    }

    async fn delete(&self, id: &str) -> Result<bool, StorageError> {
        let result = self
            .collection()
            .delete_one(id_filter(id))
            .await
            .map_err(|e| StorageError::unavailable(BACKEND, e))?;

        Ok(result.deleted_count > 0)
    }
}
