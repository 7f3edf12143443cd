//! Direct submission surface for form-style callers.
//!
//! Takes every field at once and runs the same validators, music rule,
//! service calls and submission path as the conversation, so the same
//! logical input yields the same payload.

use std::fmt;
use std::str::FromStr;

use tracing::info;

use crate::campaign::{CampaignDraft, MusicOption};
use crate::collector::fields::{self, FieldError};
use crate::service::{AdService, ServiceError};
use crate::submission::{submit_draft, SubmitFailure, Submission};

/// Human-facing music choice offered by forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicChoice {
    /// "No Music"
    NoMusic,
    /// "Use Existing Music"
    UseExisting,
    /// "Upload Custom Music"
    UploadCustom,
}

impl MusicChoice {
    /// All choices in display order.
    pub const ALL: [MusicChoice; 3] = [
        MusicChoice::NoMusic,
        MusicChoice::UseExisting,
        MusicChoice::UploadCustom,
    ];

    /// Label shown to users.
    pub fn label(self) -> &'static str {
        match self {
            Self::NoMusic => "No Music",
            Self::UseExisting => "Use Existing Music",
            Self::UploadCustom => "Upload Custom Music",
        }
    }

    /// Internal music option.
    pub fn option(self) -> MusicOption {
        match self {
            Self::NoMusic => MusicOption::None,
            Self::UseExisting => MusicOption::Existing,
            Self::UploadCustom => MusicOption::Custom,
        }
    }
}

impl fmt::Display for MusicChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Input that is not a [`MusicChoice`] label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown music choice '{0}', expected one of: No Music, Use Existing Music, Upload Custom Music")]
pub struct ParseMusicChoiceError(pub String);

impl FromStr for MusicChoice {
    type Err = ParseMusicChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|choice| choice.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseMusicChoiceError(s.to_owned()))
    }
}

/// Every campaign field, as typed into a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignForm {
    /// Campaign title.
    pub campaign_name: String,
    /// Objective label.
    pub objective: String,
    /// Ad text.
    pub ad_text: String,
    /// CTA label or free text.
    pub cta: String,
    /// Music choice.
    pub music: MusicChoice,
    /// Music id for [`MusicChoice::UseExisting`], file path for
    /// [`MusicChoice::UploadCustom`]; ignored otherwise.
    pub music_ref: Option<String>,
}

/// Why a form submission failed. Display is the message for the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// A field broke a rule.
    #[error("{0}")]
    Field(#[from] FieldError),

    /// "No Music" on a Conversions campaign.
    #[error("Music is mandatory for Conversions campaigns. Please add music.")]
    MusicRequired,

    /// "Use Existing Music" without an id.
    #[error("Please provide a Music ID.")]
    MissingMusicId,

    /// "Upload Custom Music" without a file path.
    #[error("Please provide a music file path.")]
    MissingMusicPath,

    /// The service did not recognize the music id.
    #[error("Music validation failed: {}", .0.message)]
    MusicValidation(ServiceError),

    /// The upload was rejected.
    #[error("Music upload failed: {}", .0.message)]
    MusicUpload(ServiceError),

    /// Final validation or the service rejected the campaign.
    #[error("{}", .0.explain())]
    Submission(#[from] SubmitFailure),
}

/// Validate every field, resolve music, and submit.
///
/// # Errors
///
/// Returns the first [`FormError`] encountered; nothing is retried.
pub async fn direct_submit(
    service: &dyn AdService,
    form: &CampaignForm,
) -> Result<Submission, FormError> {
    let campaign_name = fields::campaign_name(&form.campaign_name)?;
    let objective = fields::objective(&form.objective)?;
    let ad_text = fields::ad_text(&form.ad_text)?;
    let cta = fields::cta(&form.cta)?;

    let music_ref = form
        .music_ref
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty());

    let music_id = match form.music {
        MusicChoice::NoMusic => {
            if objective.requires_music() {
                return Err(FormError::MusicRequired);
            }
            None
        }
        MusicChoice::UseExisting => {
            let id = music_ref.ok_or(FormError::MissingMusicId)?;
            let track = service
                .validate_music(id)
                .await
                .map_err(FormError::MusicValidation)?;
            Some(track.music_id)
        }
        MusicChoice::UploadCustom => {
            let path = music_ref.ok_or(FormError::MissingMusicPath)?;
            let uploaded = service
                .upload_music(path)
                .await
                .map_err(FormError::MusicUpload)?;
            Some(uploaded.music_id)
        }
    };

    let draft = CampaignDraft {
        campaign_name: Some(campaign_name),
        objective: Some(objective),
        ad_text: Some(ad_text),
        cta: Some(cta),
        music_option: Some(form.music.option()),
        music_id,
    };
    info!(music = %form.music, "submitting campaign from form");

    Ok(submit_draft(service, &draft).await?)
}
