//! The in-progress campaign draft and the submission payload built from it.

use serde::{Deserialize, Serialize};

use crate::rules::{
    char_len, Cta, Objective, MAX_AD_TEXT_LENGTH, MIN_CAMPAIGN_NAME_LENGTH,
};

/// How the user chose to attach music.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MusicOption {
    /// No music.
    None,
    /// An existing track from the library, referenced by id.
    Existing,
    /// A custom upload.
    Custom,
}

/// Partially filled campaign record for one session.
///
/// Fields are populated in order: name, objective, ad text, CTA, music.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CampaignDraft {
    /// Campaign title.
    pub campaign_name: Option<String>,
    /// Campaign objective.
    pub objective: Option<Objective>,
    /// Main ad message.
    pub ad_text: Option<String>,
    /// Canonical call-to-action.
    pub cta: Option<Cta>,
    /// Music attachment mode.
    pub music_option: Option<MusicOption>,
    /// Validated or uploaded music identifier.
    pub music_id: Option<String>,
}

/// A draft that cannot become a payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    /// A required field was never collected.
    #[error("missing required field: {0}")]
    Missing(&'static str),

    /// The campaign name is below the minimum length.
    #[error("campaign name must be at least {min} characters, found {len}")]
    NameTooShort {
        /// Actual length.
        len: usize,
        /// Required minimum.
        min: usize,
    },

    /// The ad text is empty or above the maximum length.
    #[error("ad text must be 1 to {max} characters, found {len}")]
    AdTextLength {
        /// Actual length.
        len: usize,
        /// Allowed maximum.
        max: usize,
    },

    /// A Conversions campaign without a music identifier.
    #[error("music is mandatory for Conversions campaigns")]
    MusicRequired,
}

impl CampaignDraft {
    /// Empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-verify every field and build the submission payload.
    ///
    /// # Errors
    ///
    /// Returns the first [`DraftError`] found, checking fields in collection
    /// order and the music rule last.
    pub fn to_payload(&self) -> Result<CampaignPayload, DraftError> {
        let name = self
            .campaign_name
            .as_deref()
            .ok_or(DraftError::Missing("campaign_name"))?;
        let name_len = char_len(name);
        if name_len < MIN_CAMPAIGN_NAME_LENGTH {
            return Err(DraftError::NameTooShort {
                len: name_len,
                min: MIN_CAMPAIGN_NAME_LENGTH,
            });
        }

        let objective = self.objective.ok_or(DraftError::Missing("objective"))?;

        let text = self
            .ad_text
            .as_deref()
            .ok_or(DraftError::Missing("ad_text"))?;
        let text_len = char_len(text);
        if text_len == 0 || text_len > MAX_AD_TEXT_LENGTH {
            return Err(DraftError::AdTextLength {
                len: text_len,
                max: MAX_AD_TEXT_LENGTH,
            });
        }

        let cta = self.cta.ok_or(DraftError::Missing("cta"))?;

        let music_id = self.music_id.clone().filter(|id| !id.trim().is_empty());
        if objective.requires_music() && music_id.is_none() {
            return Err(DraftError::MusicRequired);
        }

        Ok(CampaignPayload {
            campaign_name: name.to_owned(),
            objective,
            creative: Creative {
                text: text.to_owned(),
                cta,
                music_id,
            },
        })
    }
}

/// Record submitted to the ad service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignPayload {
    /// Campaign title.
    pub campaign_name: String,
    /// Campaign objective.
    pub objective: Objective,
    /// Creative block.
    pub creative: Creative,
}

/// Creative portion of a [`CampaignPayload`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creative {
    /// Ad text.
    pub text: String,
    /// Canonical CTA label.
    pub cta: Cta,
    /// Music identifier, `null` when the campaign has none.
    pub music_id: Option<String>,
}
