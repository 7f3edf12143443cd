//! In-process ad service with simulated latency and flaky submissions.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use super::{
    AccessToken, AdService, MusicTrack, ServiceError, ServiceErrorKind, SubmitReceipt,
    UploadedMusic,
};
use crate::campaign::CampaignPayload;
use crate::config::ServiceConfig;
use crate::rules::is_known_music_id;

/// Token lifetime reported by the mock, in seconds.
const TOKEN_EXPIRES_IN: u64 = 3600;

/// Track length reported for every library track.
const TRACK_DURATION_SECS: u32 = 30;

/// Failures injected into otherwise valid submissions.
static TRANSIENT_FAILURES: [(ServiceErrorKind, &str); 3] = [
    (
        ServiceErrorKind::RateLimit,
        "Rate limit exceeded. Please try again in 60 seconds.",
    ),
    (
        ServiceErrorKind::GeoRestriction,
        "Ad creation is restricted in your geographic region (403 Forbidden).",
    ),
    (
        ServiceErrorKind::InsufficientPermissions,
        "Your app doesn't have 'Ads Management' permission. Please update scopes in the developer portal.",
    ),
];

struct MockState {
    access_token: Option<String>,
    /// Ids issued by `upload_music`, recognized alongside the library.
    uploaded: HashSet<String>,
    rng: StdRng,
}

/// Stand-in for the remote ad service.
///
/// Holds the access token issued by [`AdService::authorize`] so one instance
/// can be shared by many sessions behind an `Arc`.
pub struct MockAdService {
    state: Mutex<MockState>,
    latency: Duration,
    transient_failure_rate: f64,
}

impl std::fmt::Debug for MockAdService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockAdService")
            .field("latency", &self.latency)
            .field("transient_failure_rate", &self.transient_failure_rate)
            .finish_non_exhaustive()
    }
}

impl MockAdService {
    /// Build from service configuration.
    ///
    /// A configured seed makes identifiers and injected failures reproducible.
    pub fn new(config: &ServiceConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            state: Mutex::new(MockState {
                access_token: None,
                uploaded: HashSet::new(),
                rng,
            }),
            latency: Duration::from_millis(config.latency_ms),
            transient_failure_rate: sanitize_rate(config.transient_failure_rate),
        }
    }

    /// A deterministic instance with no latency and no injected failures.
    pub fn reliable(seed: u64) -> Self {
        Self::new(&ServiceConfig {
            latency_ms: 0,
            transient_failure_rate: 0.0,
            seed: Some(seed),
        })
    }

    /// Whether a token has been issued.
    pub fn is_authorized(&self) -> bool {
        self.lock_state().access_token.is_some()
    }

    fn lock_state(&self) -> MutexGuard<'_, MockState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Library ids plus ids issued by earlier uploads.
    pub fn knows_music(&self, music_id: &str) -> bool {
        is_known_music_id(music_id) || self.lock_state().uploaded.contains(music_id)
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn require_token(&self, message: &str) -> Result<(), ServiceError> {
        if self.is_authorized() {
            Ok(())
        } else {
            Err(ServiceError::new(ServiceErrorKind::Unauthorized, message))
        }
    }
}

fn sanitize_rate(rate: f64) -> f64 {
    if rate.is_finite() {
        rate.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[async_trait]
impl AdService for MockAdService {
    async fn authorize(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<AccessToken, ServiceError> {
        info!("simulating OAuth authorization");
        self.simulate_latency().await;

        if client_id == "invalid" {
            return Err(ServiceError::new(
                ServiceErrorKind::InvalidClient,
                "Client ID is invalid",
            ));
        }
        if client_secret == "invalid" {
            return Err(ServiceError::new(
                ServiceErrorKind::InvalidSecret,
                "Client secret is invalid",
            ));
        }

        let mut state = self.lock_state();
        let suffix: u32 = state.rng.gen_range(1000..=9999);
        let token = format!("mock_token_{suffix}");
        state.access_token = Some(token.clone());

        Ok(AccessToken {
            access_token: token,
            token_type: "Bearer".to_owned(),
            expires_in: TOKEN_EXPIRES_IN,
        })
    }

    async fn validate_music(&self, music_id: &str) -> Result<MusicTrack, ServiceError> {
        debug!(music_id, "validating music id");
        self.simulate_latency().await;
        self.require_token("Access token is invalid or expired. Please re-authenticate.")?;

        if !self.knows_music(music_id) {
            return Err(ServiceError::new(
                ServiceErrorKind::MusicNotFound,
                format!(
                    "Music ID '{music_id}' not found in the music library. \
                     It may have been removed or is unavailable in your region."
                ),
            ));
        }

        let label = music_id.split_once('_').map_or(music_id, |(_, rest)| rest);
        Ok(MusicTrack {
            music_id: music_id.to_owned(),
            title: format!("Sample Track {label}"),
            duration_secs: TRACK_DURATION_SECS,
        })
    }

    async fn upload_music(&self, file_path: &str) -> Result<UploadedMusic, ServiceError> {
        debug!(file_path, "uploading custom music");
        self.simulate_latency().await;
        self.require_token("Access token is invalid or expired.")?;

        let mut state = self.lock_state();
        let suffix: u32 = state.rng.gen_range(20_000..=99_999);
        let music_id = format!("music_{suffix}");
        state.uploaded.insert(music_id.clone());
        Ok(UploadedMusic { music_id })
    }

    async fn submit(&self, payload: &CampaignPayload) -> Result<SubmitReceipt, ServiceError> {
        info!(campaign = %payload.campaign_name, "submitting campaign");
        self.simulate_latency().await;
        self.require_token("Access token is invalid or expired. Please re-authenticate.")?;

        let music_id = payload.creative.music_id.as_deref();
        if payload.objective.requires_music() && music_id.is_none() {
            return Err(ServiceError::new(
                ServiceErrorKind::MissingMusic,
                "Music is mandatory for Conversions campaigns. \
                 Please add music or change objective to Traffic.",
            ));
        }
        if let Some(id) = music_id {
            if !self.knows_music(id) {
                return Err(ServiceError::new(
                    ServiceErrorKind::InvalidMusicId,
                    format!("Music ID '{id}' is invalid or expired."),
                ));
            }
        }

        let mut state = self.lock_state();
        if state.rng.gen_bool(self.transient_failure_rate) {
            if let Some((kind, message)) = TRANSIENT_FAILURES.choose(&mut state.rng) {
                warn!(kind = %kind, "injecting transient submission failure");
                return Err(ServiceError::new(kind.clone(), *message));
            }
        }

        let ad: u32 = state.rng.gen_range(100_000..=999_999);
        let campaign: u32 = state.rng.gen_range(100_000..=999_999);
        Ok(SubmitReceipt {
            campaign_id: format!("campaign_{campaign}"),
            ad_id: format!("ad_{ad}"),
            status: "ACTIVE".to_owned(),
        })
    }
}
