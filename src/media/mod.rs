//! Access tokens for the real-time media (voice agent) room
//!
//! The booking API does not talk to the media service itself; it only mints
//! short-lived credentials a browser client uses to join the shared room.

pub mod livekit;

pub use livekit::{LiveKitTokenIssuer, VideoGrant};

use crate::core::error::TokenError;
use chrono::Duration;
use rand::Rng;
use serde::Serialize;

/// Room every client joins
pub const ROOM_NAME: &str = "restaurant-booking";
/// Prefix of generated participant identities
pub const IDENTITY_PREFIX: &str = "User-";
/// Lifetime of an issued token
pub const TOKEN_TTL_MINUTES: i64 = 10;

/// A signed credential plus the endpoint to connect to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessToken {
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// What a token lets its holder do
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRequest {
    pub identity: String,
    pub room: String,
    pub ttl: Duration,
}

impl TokenRequest {
    /// Parameters for an anonymous visitor: random identity, fixed room and lifetime.
    pub fn anonymous_visitor() -> Self {
        let suffix: u32 = rand::thread_rng().gen_range(0..1000);
        Self {
            identity: format!("{IDENTITY_PREFIX}{suffix}"),
            room: ROOM_NAME.to_string(),
            ttl: Duration::minutes(TOKEN_TTL_MINUTES),
        }
    }
}

/// Mints access tokens for the media service
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, request: &TokenRequest) -> Result<AccessToken, TokenError>;
}
