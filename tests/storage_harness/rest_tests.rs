//! REST integration test macro for booking store backends.
//!
//! The `rest_integration_tests!` macro drives the full HTTP stack:
//! JSON → HTTP request → handler → BookingService → store → HTTP response → JSON.
//!
//! # Generated Tests
//!
//! ## Bookings
//! - `test_rest_create` : POST 201 with generated ids and defaults
//! - `test_rest_get` : GET by `_id` returns the created record
//! - `test_rest_list_newest_first` : three creates list as [C, B, A]
//! - `test_rest_delete` : DELETE returns the confirmation, then GET 404
//!
//! ## Error handling
//! - `test_rest_validation_errors` : zero guests or blank name → 400 with field errors
//! - `test_rest_malformed_json` : unparseable body → 400
//! - `test_rest_unknown_and_malformed_ids` : 404 for both
//!
//! ## Media token
//! - `test_rest_token_issued` : 200 with token and url
//! - `test_rest_token_without_credentials` : 500 TOKEN_ERROR
#[macro_export]
macro_rules! rest_integration_tests {
    ($factory:expr) => {
        mod rest_integration_tests {
            use super::*;
            use axum::http::StatusCode;
            use axum_test::TestServer;
            use booking::media::LiveKitTokenIssuer;
            use booking::server::ServerBuilder;
            use serde_json::{Value, json};

            fn issuer() -> LiveKitTokenIssuer {
                LiveKitTokenIssuer::new(
                    Some("devkey".to_string()),
                    Some("devsecret-devsecret-devsecret-32".to_string()),
                    Some("wss://media.test".to_string()),
                )
            }

            async fn make_server() -> TestServer {
                let router = ServerBuilder::new()
                    .with_store($factory)
                    .with_token_issuer(issuer())
                    .build()
                    .unwrap();
                TestServer::try_new(router).unwrap()
            }

            async fn create(server: &TestServer, customer: &str) -> Value {
                let response = server
                    .post("/api/bookings")
                    .json(&booking_json(customer))
                    .await;
                response.assert_status(StatusCode::CREATED);
                response.json()
            }

            // ==============================================================
            // Bookings
            // ==============================================================

            #[tokio::test]
            async fn test_rest_create() {
                let server = make_server().await;

                let response = server
                    .post("/api/bookings")
                    .json(&json!({
                        "customerName": "Ana",
                        "numberOfGuests": 2,
                        "bookingDate": "2024-06-01",
                        "bookingTime": "19:00"
                    }))
                    .await;

                response.assert_status(StatusCode::CREATED);
                let body: Value = response.json();
                assert_eq!(body["customerName"], "Ana");
                assert_eq!(body["numberOfGuests"], 2);
                assert_eq!(body["bookingDate"], "2024-06-01");
                assert_eq!(body["bookingTime"], "19:00");
                assert_eq!(body["cuisinePreference"], "Any");
                assert_eq!(body["specialRequests"], "None");
                assert_eq!(body["seatingPreference"], "any");
                assert_eq!(body["status"], "confirmed");
                assert!(body["bookingId"].as_str().unwrap().starts_with("BOOK-"));
                uuid::Uuid::parse_str(body["_id"].as_str().unwrap()).unwrap();
                assert!(body["createdAt"].as_str().is_some());
            }

            #[tokio::test]
            async fn test_rest_get() {
                let server = make_server().await;
                let created = create(&server, "Ana").await;
                let id = created["_id"].as_str().unwrap();

                let response = server.get(&format!("/api/bookings/{}", id)).await;

                response.assert_status_ok();
                let body: Value = response.json();
                assert_eq!(body, created);
            }

            #[tokio::test]
            async fn test_rest_list_newest_first() {
                let server = make_server().await;
                for name in ["A", "B", "C"] {
                    create(&server, name).await;
                }

                let response = server.get("/api/bookings").await;

                response.assert_status_ok();
                let body: Vec<Value> = response.json();
                let names: Vec<&str> = body
                    .iter()
                    .map(|b| b["customerName"].as_str().unwrap())
                    .collect();
                assert_eq!(names, ["C", "B", "A"]);
            }

            #[tokio::test]
            async fn test_rest_delete() {
                let server = make_server().await;
                let created = create(&server, "Ana").await;
                let path = format!("/api/bookings/{}", created["_id"].as_str().unwrap());

                let response = server.delete(&path).await;
                response.assert_status_ok();
                let body: Value = response.json();
                assert_eq!(body["message"], "Booking cancelled successfully");

                server.get(&path).await.assert_status_not_found();
                server.delete(&path).await.assert_status_not_found();
            }

            // ==============================================================
            // Error handling
            // ==============================================================

            #[tokio::test]
            async fn test_rest_validation_errors() {
                let server = make_server().await;

                let mut zero_guests = booking_json("Ana");
                zero_guests["numberOfGuests"] = json!(0);
                let response = server.post("/api/bookings").json(&zero_guests).await;
                response.assert_status_bad_request();
                let body: Value = response.json();
                assert_eq!(body["code"], "VALIDATION_ERROR");
                assert_eq!(body["details"]["fields"][0]["field"], "numberOfGuests");

                let blank_name = booking_json("   ");
                let response = server.post("/api/bookings").json(&blank_name).await;
                response.assert_status_bad_request();
                let body: Value = response.json();
                assert_eq!(body["details"]["fields"][0]["field"], "customerName");

                let listed: Vec<Value> = server.get("/api/bookings").await.json();
                assert!(listed.is_empty());
            }

            #[tokio::test]
            async fn test_rest_malformed_json() {
                let server = make_server().await;

                let response = server
                    .post("/api/bookings")
                    .content_type("application/json")
                    .bytes("{\"customerName\": ".into())
                    .await;

                response.assert_status_bad_request();
                let body: Value = response.json();
                assert_eq!(body["code"], "VALIDATION_ERROR");
            }

            #[tokio::test]
            async fn test_rest_unknown_and_malformed_ids() {
                let server = make_server().await;

                let response = server
                    .get(&format!("/api/bookings/{}", uuid::Uuid::new_v4()))
                    .await;
                response.assert_status_not_found();
                let body: Value = response.json();
                assert_eq!(body["error"], "Booking not found");
                assert_eq!(body["code"], "BOOKING_NOT_FOUND");

                server
                    .get("/api/bookings/not-a-valid-id")
                    .await
                    .assert_status_not_found();
                server
                    .delete("/api/bookings/not-a-valid-id")
                    .await
                    .assert_status_not_found();
            }

            // ==============================================================
            // Media token
            // ==============================================================

            #[tokio::test]
            async fn test_rest_token_issued() {
                let server = make_server().await;

                let response = server.get("/api/token").await;

                response.assert_status_ok();
                let body: Value = response.json();
                assert!(!body["token"].as_str().unwrap().is_empty());
                assert_eq!(body["url"], "wss://media.test");
            }

            #[tokio::test]
            async fn test_rest_token_without_credentials() {
                let router = ServerBuilder::new().with_store($factory).build().unwrap();
                let server = TestServer::try_new(router).unwrap();

                let response = server.get("/api/token").await;

                response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
                let body: Value = response.json();
                assert_eq!(body["code"], "TOKEN_ERROR");
                assert_eq!(body["error"], "Failed to generate token");
            }
        }
    };
}
