//! LiveKit-compatible access tokens
//!
//! A LiveKit token is an HS256 JWT signed with the API secret. The API key
//! goes in `iss`, the participant identity in `sub` (and `jti`), and the
//! room permissions in a `video` grant object.

use super::{AccessToken, TokenIssuer, TokenRequest};
use crate::core::error::TokenError;
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

/// Room permissions carried by the token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoGrant {
    pub room_join: bool,
    pub room: String,
}

/// JWT claims understood by LiveKit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveKitClaims {
    pub iss: String,
    pub sub: String,
    pub jti: String,
    pub nbf: i64,
    pub exp: i64,
    pub video: VideoGrant,
}

/// Signs tokens with the configured API key/secret pair
#[derive(Clone)]
pub struct LiveKitTokenIssuer {
    api_key: Option<String>,
    api_secret: Option<String>,
    url: Option<String>,
}

impl std::fmt::Debug for LiveKitTokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveKitTokenIssuer")
            .field("api_key", &self.api_key)
            .field("api_secret", &self.api_secret.as_ref().map(|_| "***"))
            .field("url", &self.url)
            .finish()
    }
}

impl LiveKitTokenIssuer {
    /// Credentials may be missing; issuing then fails per request rather than at startup.
    pub fn new(api_key: Option<String>, api_secret: Option<String>, url: Option<String>) -> Self {
        Self {
            api_key,
            api_secret,
            url,
        }
    }

    /// Build the claims for `request` as of `now`.
    pub fn claims(
        &self,
        request: &TokenRequest,
        now: DateTime<Utc>,
    ) -> Result<LiveKitClaims, TokenError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(TokenError::MissingCredential("LIVEKIT_API_KEY"))?;

        Ok(LiveKitClaims {
            iss: api_key.to_string(),
            sub: request.identity.clone(),
            jti: request.identity.clone(),
            nbf: now.timestamp(),
            exp: (now + request.ttl).timestamp(),
            video: VideoGrant {
                room_join: true,
                room: request.room.clone(),
            },
        })
    }

    /// Sign a token for `request` as of `now`.
    pub fn issue_at(
        &self,
        request: &TokenRequest,
        now: DateTime<Utc>,
    ) -> Result<AccessToken, TokenError> {
        let secret = self
            .api_secret
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(TokenError::MissingCredential("LIVEKIT_API_SECRET"))?;
        let claims = self.claims(request, now)?;

        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )?;

        Ok(AccessToken {
            token,
            url: self.url.clone(),
        })
    }
}

impl TokenIssuer for LiveKitTokenIssuer {
    fn issue(&self, request: &TokenRequest) -> Result<AccessToken, TokenError> {
        self.issue_at(request, Utc::now())
    }
}
