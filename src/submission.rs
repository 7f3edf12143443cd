//! Final validation and submission, shared by the collector and the form.
//!
//! The draft is re-verified before anything is sent, so a Conversions
//! campaign without music never reaches the service from either surface.

use tracing::{debug, info, warn};

use crate::campaign::{CampaignDraft, CampaignPayload, DraftError};
use crate::rules::char_len;
use crate::service::{AdService, ServiceError, ServiceErrorKind, SubmitReceipt};

/// A campaign accepted by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// The payload that was sent.
    pub payload: CampaignPayload,
    /// Identifiers assigned by the service.
    pub receipt: SubmitReceipt,
}

/// Why a submission did not go through.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitFailure {
    /// The draft failed local re-verification; the service was not called.
    #[error("validation failed: {0}")]
    Draft(#[from] DraftError),

    /// The service rejected the submission.
    #[error("submission rejected: {0}")]
    Service(#[from] ServiceError),
}

impl SubmitFailure {
    /// Whether only a different music choice can fix the failure.
    pub fn needs_music(&self) -> bool {
        match self {
            Self::Draft(err) => matches!(err, DraftError::MusicRequired),
            Self::Service(err) => matches!(
                err.kind,
                ServiceErrorKind::MissingMusic | ServiceErrorKind::InvalidMusicId
            ),
        }
    }

    /// User-facing explanation.
    pub fn explain(&self) -> String {
        match self {
            Self::Draft(DraftError::MusicRequired) => {
                "❌ Validation failed: Music is mandatory for Conversions campaigns.".to_owned()
            }
            Self::Draft(err) => format!("❌ Validation failed: {err}."),
            Self::Service(err) => explain_service_error(err),
        }
    }
}

/// Re-verify the draft, then submit it.
///
/// # Errors
///
/// [`SubmitFailure::Draft`] when the draft breaks a rule (the service is not
/// called), [`SubmitFailure::Service`] when the service rejects it.
pub async fn submit_draft(
    service: &dyn AdService,
    draft: &CampaignDraft,
) -> Result<Submission, SubmitFailure> {
    let payload = draft.to_payload().inspect_err(|err| {
        warn!(error = %err, "draft failed final validation");
    })?;
    log_checklist(&payload);

    match service.submit(&payload).await {
        Ok(receipt) => {
            info!(
                campaign_id = %receipt.campaign_id,
                ad_id = %receipt.ad_id,
                status = %receipt.status,
                "campaign created"
            );
            Ok(Submission { payload, receipt })
        }
        Err(err) => {
            warn!(
                kind = %err.kind,
                transient = err.kind.is_transient(),
                message = %err.message,
                "submission failed"
            );
            Err(err.into())
        }
    }
}

fn log_checklist(payload: &CampaignPayload) {
    debug!(name = %payload.campaign_name, "campaign name valid");
    debug!(objective = %payload.objective, "objective valid");
    debug!(chars = char_len(&payload.creative.text), "ad text valid");
    debug!(cta = %payload.creative.cta, "cta valid");
    match &payload.creative.music_id {
        Some(id) => debug!(music_id = %id, "music valid"),
        None => debug!("no music, optional for this objective"),
    }
}

/// Map a service failure to its explanation and remedy.
///
/// Kinds without a submission-specific explanation fall back to a generic
/// message carrying the raw service text.
pub fn explain_service_error(err: &ServiceError) -> String {
    let message = &err.message;
    match err.kind {
        ServiceErrorKind::Unauthorized => format!(
            "🔒 Authentication Error\n\n{message}\n\n\
             Action needed: Please re-authenticate. Your access token may have expired."
        ),
        ServiceErrorKind::MissingMusic => format!(
            "🎵 Missing Music\n\n{message}\n\n\
             This happened because:\n\
             • Objective is set to 'Conversions'\n\
             • Music is mandatory for Conversions\n\n\
             Please add music to continue."
        ),
        ServiceErrorKind::InvalidMusicId => format!(
            "❌ Invalid Music\n\n{message}\n\n\
             The music ID may have been:\n\
             • Removed from the music library\n\
             • Restricted in your region\n\
             • Typed incorrectly\n\n\
             Please use a different music ID."
        ),
        ServiceErrorKind::RateLimit => format!(
            "⏱️ Rate Limit Exceeded\n\n{message}\n\n\
             The ads API has rate limits. Please wait 60 seconds and try again."
        ),
        ServiceErrorKind::GeoRestriction => format!(
            "🌍 Geographic Restriction\n\n{message}\n\n\
             Action needed:\n\
             1. Check your ads account region settings\n\
             2. Verify your business is approved for ads in your region\n\
             3. Contact support if the issue persists"
        ),
        ServiceErrorKind::InsufficientPermissions => format!(
            "🔐 Permission Error\n\n{message}\n\n\
             How to fix:\n\
             1. Go to the developer portal\n\
             2. Navigate to your app settings\n\
             3. Add the 'Ads Management' permission scope\n\
             4. Re-authenticate with the new permissions"
        ),
        ServiceErrorKind::InvalidClient
        | ServiceErrorKind::InvalidSecret
        | ServiceErrorKind::MusicNotFound
        | ServiceErrorKind::Other(_) => format!("❌ Submission failed: {message}"),
    }
}

/// Success message with the service-assigned identifiers.
pub fn confirmation(receipt: &SubmitReceipt) -> String {
    format!(
        "🎉 SUCCESS! Your ad campaign has been created!\n\n\
         📋 Campaign Details:\n\
         • Campaign ID: {}\n\
         • Ad ID: {}\n\
         • Status: {}\n\n\
         Your ad is now live!",
        receipt.campaign_id, receipt.ad_id, receipt.status
    )
}
