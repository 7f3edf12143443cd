//! Remote ad service abstraction.
//!
//! Defines the [`AdService`] trait consumed by the collector and the form
//! surface, along with the typed failures it returns. Every operation other
//! than [`AdService::authorize`] requires a prior successful authorization;
//! without one the service answers with [`ServiceErrorKind::Unauthorized`].
//!
//! One implementation ships with the crate:
//! - [`mock::MockAdService`] - in-process stand-in with simulated latency and
//!   injected transient failures

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::campaign::CampaignPayload;

pub mod mock;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure categories reported by the ad service.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ServiceErrorKind {
    /// The OAuth client id was rejected.
    InvalidClient,
    /// The OAuth client secret was rejected.
    InvalidSecret,
    /// No valid access token.
    Unauthorized,
    /// The music id does not exist in the library.
    MusicNotFound,
    /// A Conversions campaign was submitted without music.
    MissingMusic,
    /// The submitted music id is invalid or expired.
    InvalidMusicId,
    /// Too many requests.
    RateLimit,
    /// Ad creation is blocked in the caller's region.
    GeoRestriction,
    /// The app lacks the ads management scope.
    InsufficientPermissions,
    /// A kind this client does not recognize, carrying its wire name.
    Other(String),
}

impl ServiceErrorKind {
    /// Wire name of the kind.
    pub fn as_str(&self) -> &str {
        match self {
            Self::InvalidClient => "invalid_client",
            Self::InvalidSecret => "invalid_secret",
            Self::Unauthorized => "unauthorized",
            Self::MusicNotFound => "music_not_found",
            Self::MissingMusic => "missing_music",
            Self::InvalidMusicId => "invalid_music_id",
            Self::RateLimit => "rate_limit",
            Self::GeoRestriction => "geo_restriction",
            Self::InsufficientPermissions => "insufficient_permissions",
            Self::Other(raw) => raw,
        }
    }

    /// Parse a wire name; unknown names become [`ServiceErrorKind::Other`].
    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "invalid_client" => Self::InvalidClient,
            "invalid_secret" => Self::InvalidSecret,
            "unauthorized" => Self::Unauthorized,
            "music_not_found" => Self::MusicNotFound,
            "missing_music" => Self::MissingMusic,
            "invalid_music_id" => Self::InvalidMusicId,
            "rate_limit" => Self::RateLimit,
            "geo_restriction" => Self::GeoRestriction,
            "insufficient_permissions" => Self::InsufficientPermissions,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Failures the service may return for an otherwise valid submission.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::RateLimit | Self::GeoRestriction | Self::InsufficientPermissions
        )
    }
}

impl fmt::Display for ServiceErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ServiceErrorKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ServiceErrorKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_wire(&raw))
    }
}

/// A typed failure from the ad service with its human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ServiceError {
    /// Failure category.
    #[serde(rename = "error")]
    pub kind: ServiceErrorKind,
    /// Message meant for the end user.
    pub message: String,
}

impl ServiceError {
    /// Build an error from a kind and message.
    pub fn new(kind: ServiceErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Bearer token issued by [`AdService::authorize`].
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    /// The bearer token.
    pub access_token: String,
    /// Token type, always "Bearer" for the mock.
    pub token_type: String,
    /// Lifetime in seconds.
    pub expires_in: u64,
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// A library track confirmed by [`AdService::validate_music`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MusicTrack {
    /// Library identifier.
    pub music_id: String,
    /// Track title.
    pub title: String,
    /// Track length in seconds.
    pub duration_secs: u32,
}

/// Result of [`AdService::upload_music`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedMusic {
    /// Identifier assigned to the uploaded file.
    pub music_id: String,
}

/// Identifiers assigned to a created campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitReceipt {
    /// Campaign identifier.
    pub campaign_id: String,
    /// Ad identifier.
    pub ad_id: String,
    /// Delivery status, e.g. "ACTIVE".
    pub status: String,
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Backend that authorizes sessions, resolves music and creates campaigns.
///
/// `submit` enforces the Conversions-needs-music and known-music rules on its
/// own side even though callers check them first.
#[async_trait]
pub trait AdService: Send + Sync {
    /// Exchange client credentials for an access token.
    async fn authorize(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<AccessToken, ServiceError>;

    /// Confirm a music id exists in the library.
    async fn validate_music(&self, music_id: &str) -> Result<MusicTrack, ServiceError>;

    /// Upload a music file and receive its identifier.
    async fn upload_music(&self, file_path: &str) -> Result<UploadedMusic, ServiceError>;

    /// Create the campaign.
    async fn submit(&self, payload: &CampaignPayload) -> Result<SubmitReceipt, ServiceError>;
}
