//! User-facing prompt and correction texts.

use crate::rules::{Cta, Objective, MAX_AD_TEXT_LENGTH, MIN_CAMPAIGN_NAME_LENGTH};

use super::fields::FieldError;

pub(crate) fn greeting() -> String {
    format!(
        "👋 Hi! I'll help you create an ad campaign.\n\n\
         Let's start with the basics. What would you like to name your campaign? \
         (minimum {MIN_CAMPAIGN_NAME_LENGTH} characters)"
    )
}

pub(crate) fn name_accepted(name: &str) -> String {
    format!(
        "✅ Great! Campaign name set to: '{name}'\n\n{}",
        objective_prompt()
    )
}

fn objective_prompt() -> &'static str {
    "Now, what's your campaign objective?\n\
     1. Traffic - Drive users to your website\n\
     2. Conversions - Drive specific actions (purchases, sign-ups)\n\n\
     Please type: Traffic or Conversions"
}

pub(crate) fn objective_accepted(objective: Objective) -> String {
    let music_note = if objective.requires_music() {
        "\n\n⚠️ Important: Music is mandatory for Conversions campaigns."
    } else {
        ""
    };
    format!(
        "✅ Objective set to: {objective}{music_note}\n\n\
         What text would you like to display in your ad?\n\
         (Maximum {MAX_AD_TEXT_LENGTH} characters - this is the main message users will see)"
    )
}

pub(crate) fn ad_text_accepted() -> String {
    format!(
        "✅ Ad text set!\n\n\
         Now, what Call-to-Action (CTA) button would you like?\n\n\
         Available options:\n{}\n\n\
         Please type one of these:",
        Cta::bullet_list()
    )
}

pub(crate) fn cta_accepted(cta: Cta, objective: Option<Objective>) -> String {
    format!("✅ CTA set to: {cta}\n\n{}", music_menu(objective))
}

/// Music menu shown on entering the music step; skipping is offered only
/// when the objective allows it.
pub(crate) fn music_menu(objective: Option<Objective>) -> String {
    if music_required(objective) {
        "🎵 Music is REQUIRED for Conversions campaigns.\n\n\
         How would you like to add music?\n\
         1. Use existing music (you provide a music ID)\n\
         2. Upload custom music\n\n\
         Type 1 or 2:"
            .to_owned()
    } else {
        "🎵 Would you like to add music to your ad?\n\n\
         1. Use existing music (you provide a music ID)\n\
         2. Upload custom music\n\
         3. No music\n\n\
         Type 1, 2, or 3:"
            .to_owned()
    }
}

pub(crate) fn music_required(objective: Option<Objective>) -> bool {
    objective.is_some_and(Objective::requires_music)
}

pub(crate) fn ask_music_id() -> &'static str {
    "Please enter the Music ID (example: music_12345):"
}

pub(crate) fn ask_music_path() -> &'static str {
    "Please enter the file path of your music file (example: /path/to/song.mp3):"
}

pub(crate) fn music_skip_refused() -> &'static str {
    "❌ Cannot skip music for Conversions campaigns.\n\n\
     Why? Music significantly increases engagement, which is critical for \
     driving conversions (purchases, sign-ups, etc.).\n\n\
     Please choose option 1 or 2:"
}

pub(crate) fn music_validation_failed(
    music_id: &str,
    message: &str,
    objective: Option<Objective>,
) -> String {
    let menu = if music_required(objective) {
        "What would you like to do?\n\
         1. Try a different music ID\n\
         2. Upload custom music\n\n\
         Type 1 or 2:"
    } else {
        "What would you like to do?\n\
         1. Try a different music ID\n\
         2. Upload custom music\n\
         3. Continue without music\n\n\
         Type 1, 2, or 3:"
    };
    format!("❌ Music validation failed\n\nMusic ID: {music_id}\nError: {message}\n\n{menu}")
}

pub(crate) fn music_upload_failed(message: &str) -> String {
    format!("❌ Upload failed: {message}\n\nPlease try again with a valid file path:")
}

pub(crate) fn invalid_music_choice(objective: Option<Objective>) -> &'static str {
    if music_required(objective) {
        "❌ Invalid choice. Please type 1 or 2:"
    } else {
        "❌ Invalid choice. Please type 1, 2, or 3:"
    }
}

pub(crate) fn music_validated(title: &str, duration_secs: u32) -> String {
    format!("✅ Music validated successfully!\n\nMusic: {title}\nDuration: {duration_secs}s")
}

pub(crate) fn music_uploaded(music_id: &str) -> String {
    format!("✅ Music uploaded successfully!\n\nGenerated Music ID: {music_id}")
}

pub(crate) fn already_complete() -> &'static str {
    "✅ This campaign has already been created. Start a new session to create another."
}

pub(crate) fn cancelled() -> &'static str {
    "👋 Goodbye! Campaign creation cancelled."
}

/// Corrective message for a rejected field, re-prompting the same step.
pub(crate) fn correction(error: &FieldError) -> String {
    match error {
        FieldError::NameTooShort { input, len, min } => format!(
            "❌ Campaign name is too short. You entered '{input}' which is {len} character(s). \
             Please provide at least {min} characters:"
        ),
        FieldError::UnknownObjective { input } => format!(
            "❌ '{input}' is not a valid objective.\n\n\
             Please choose exactly:\n\
             • Traffic (for website visits)\n\
             • Conversions (for purchases/sign-ups)\n\n\
             Type one of these:"
        ),
        FieldError::EmptyAdText => {
            "❌ Ad text cannot be empty. Please enter the message you want to show in your ad:"
                .to_owned()
        }
        FieldError::AdTextTooLong {
            text,
            len,
            max,
            over,
        } => format!(
            "❌ Ad text is too long!\n\n\
             Your text: '{text}'\n\
             Length: {len} characters\n\
             Maximum: {max} characters\n\n\
             Please shorten your message by {over} characters:"
        ),
        FieldError::UnknownCta { input } => format!(
            "❌ '{input}' doesn't match any available CTA.\n\n\
             Please choose from these exact options:\n{}\n\n\
             Type one of these:",
            Cta::bullet_list()
        ),
    }
}
