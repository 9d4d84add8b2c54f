//! Macro-generated test suite for `BookingStore` contract validation.
//!
//! # Generated Tests
//!
//! ## Store
//! - `test_insert_and_get` : insert then retrieve, every field preserved
//! - `test_get_unknown` : random UUID returns None
//! - `test_list_empty` : empty store lists nothing
//! - `test_list_newest_first` : three inserts list as [C, B, A]
//! - `test_delete_existing` : delete then get returns None
//! - `test_delete_unknown` : returns false and leaves the store unchanged
//! - `test_duplicate_booking_id` : second insert with the same bookingId is rejected
//! - `test_concurrent_inserts` : parallel inserts from spawned tasks
//!
//! ## Service on top of the store
//! - `test_service_unique_ids` : repeated creates never reuse a bookingId
//! - `test_service_get_after_delete` : NotFound once removed

/// Generate a full `BookingStore` conformance test suite.
///
/// `$factory` must evaluate to a fresh store implementing
/// `BookingStore + Clone + 'static`. It is re-evaluated for each test.
#[macro_export]
macro_rules! booking_store_tests {
    ($factory:expr) => {
        mod booking_store_contract_tests {
            use super::*;
            use booking::core::error::{BookingError, StorageError};
            use booking::core::service::BookingService;
            use booking::core::store::BookingStore;
            use std::collections::HashSet;
            use std::sync::Arc;
            use uuid::Uuid;

            #[tokio::test]
            async fn test_insert_and_get() {
                let store = $factory;
                let booking = sample_booking("Ana", 0);

                let saved = store.insert(booking.clone()).await.unwrap();
                assert_eq!(saved, booking);

                let fetched = store.get(&booking.id).await.unwrap().unwrap();
                assert_eq!(fetched, booking);
                assert_eq!(fetched.weather_info["condition"], "clear");
            }

            #[tokio::test]
            async fn test_get_unknown() {
                let store = $factory;
                assert!(store.get(&Uuid::new_v4().to_string()).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_list_empty() {
                let store = $factory;
                assert_count(&store.list().await.unwrap(), 0);
            }

            #[tokio::test]
            async fn test_list_newest_first() {
                let store = $factory;
                for (i, name) in ["A", "B", "C"].iter().enumerate() {
                    store.insert(sample_booking(name, i as i64 * 10)).await.unwrap();
                }

                let listed = store.list().await.unwrap();
                assert_customers(&listed, &["C", "B", "A"]);
            }

            #[tokio::test]
            async fn test_delete_existing() {
                let store = $factory;
                let booking = sample_booking("Ana", 0);
                store.insert(booking.clone()).await.unwrap();

                assert!(store.delete(&booking.id).await.unwrap());
                assert!(store.get(&booking.id).await.unwrap().is_none());
                assert_count(&store.list().await.unwrap(), 0);
            }

            #[tokio::test]
            async fn test_delete_unknown() {
                let store = $factory;
                store.insert(sample_booking("Ana", 0)).await.unwrap();

                assert!(!store.delete(&Uuid::new_v4().to_string()).await.unwrap());
                assert_count(&store.list().await.unwrap(), 1);
            }

            #[tokio::test]
            async fn test_duplicate_booking_id() {
                let store = $factory;
                let first = sample_booking("Ana", 0);
                let mut second = sample_booking("Ben", 0);
                second.booking_id = first.booking_id.clone();

                store.insert(first).await.unwrap();
                let err = store.insert(second).await.unwrap_err();

                assert!(matches!(err, StorageError::DuplicateKey { .. }));
                assert_customers(&store.list().await.unwrap(), &["Ana"]);
            }

            #[tokio::test]
            async fn test_concurrent_inserts() {
                let store = $factory;
                let mut handles = Vec::new();
                for i in 0..10 {
                    let store = store.clone();
                    handles.push(tokio::spawn(async move {
                        store
                            .insert(sample_booking(&format!("Guest {}", i), i))
                            .await
                    }));
                }
                for handle in handles {
                    handle.await.unwrap().unwrap();
                }

                assert_count(&store.list().await.unwrap(), 10);
            }

            #[tokio::test]
            async fn test_service_unique_ids() {
                let service = BookingService::new(Arc::new($factory));

                let mut ids = HashSet::new();
                for i in 0..25 {
                    let booking = service
                        .create(booking_payload(&format!("Guest {}", i)))
                        .await
                        .unwrap();
                    assert!(ids.insert(booking.booking_id));
                }
                assert_count(&service.list().await.unwrap(), 25);
            }

            #[tokio::test]
            async fn test_service_get_after_delete() {
                let service = BookingService::new(Arc::new($factory));
                let created = service.create(booking_payload("Ana")).await.unwrap();
                let id = created.id.clone();

                assert_eq!(service.get_by_id(&id).await.unwrap(), created);
                service.delete(&id).await.unwrap();

                assert!(matches!(
                    service.get_by_id(&id).await.unwrap_err(),
                    BookingError::NotFound { .. }
                ));
            }
        }
    };
}
