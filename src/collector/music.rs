//! The music step: menu selection, library lookup and custom upload.

use tracing::{info, warn};

use crate::campaign::MusicOption;

use super::{prompts, Advance, Collector, Step};

/// Menu tokens, compared lower-cased.
const SKIP_TOKENS: [&str; 5] = ["3", "no music", "none", "no", "skip"];
const EXISTING_TOKENS: [&str; 3] = ["1", "existing", "use existing"];
const CUSTOM_TOKENS: [&str; 3] = ["2", "upload", "custom"];

/// What a music-step input selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MenuSelection {
    Skip,
    Existing,
    Custom,
    /// Not a menu token: an id, a path, or garbage depending on the choice.
    Free,
}

pub(crate) fn menu_selection(input: &str) -> MenuSelection {
    let token = input.trim().to_lowercase();
    let token = token.as_str();
    if SKIP_TOKENS.contains(&token) {
        MenuSelection::Skip
    } else if EXISTING_TOKENS.contains(&token) {
        MenuSelection::Existing
    } else if CUSTOM_TOKENS.contains(&token) {
        MenuSelection::Custom
    } else {
        MenuSelection::Free
    }
}

impl Collector {
    /// Handle one input at [`Step::CollectMusic`].
    ///
    /// Menu tokens always win, so "1" or "2" switches the choice even while
    /// an id or path is expected. Music ids are matched lower-cased; file
    /// paths keep their original casing.
    pub(super) async fn handle_music(&mut self, text: &str) -> Advance {
        let step = Step::CollectMusic;
        let objective = self.draft.objective;
        let input = text.trim();

        match menu_selection(input) {
            MenuSelection::Skip => {
                if prompts::music_required(objective) {
                    return Advance::stay(step, prompts::music_skip_refused());
                }
                self.draft.music_option = Some(MusicOption::None);
                self.draft.music_id = None;
                Advance::to(Step::Validate, "")
            }
            MenuSelection::Existing => {
                self.draft.music_option = Some(MusicOption::Existing);
                Advance::stay(step, prompts::ask_music_id())
            }
            MenuSelection::Custom => {
                self.draft.music_option = Some(MusicOption::Custom);
                Advance::stay(step, prompts::ask_music_path())
            }
            MenuSelection::Free => match self.draft.music_option {
                Some(MusicOption::Existing) => {
                    self.use_existing_music(&input.to_lowercase()).await
                }
                Some(MusicOption::Custom) => self.upload_custom_music(input).await,
                Some(MusicOption::None) | None => {
                    Advance::stay(step, prompts::invalid_music_choice(objective))
                }
            },
        }
    }

    async fn use_existing_music(&mut self, music_id: &str) -> Advance {
        match self.service.validate_music(music_id).await {
            Ok(track) => {
                info!(music_id = %track.music_id, "music validated");
                let reply = prompts::music_validated(&track.title, track.duration_secs);
                self.draft.music_id = Some(track.music_id);
                Advance::to(Step::Validate, reply)
            }
            Err(err) => {
                warn!(music_id, kind = %err.kind, "music validation failed");
                Advance::stay(
                    Step::CollectMusic,
                    prompts::music_validation_failed(music_id, &err.message, self.draft.objective),
                )
            }
        }
    }

    async fn upload_custom_music(&mut self, file_path: &str) -> Advance {
        match self.service.upload_music(file_path).await {
            Ok(uploaded) => {
                info!(music_id = %uploaded.music_id, "music uploaded");
                let reply = prompts::music_uploaded(&uploaded.music_id);
                self.draft.music_id = Some(uploaded.music_id);
                Advance::to(Step::Validate, reply)
            }
            Err(err) => {
                warn!(file_path, kind = %err.kind, "music upload failed");
                Advance::stay(Step::CollectMusic, prompts::music_upload_failed(&err.message))
            }
        }
    }
}
