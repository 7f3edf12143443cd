//! Question detection and per-step help.
//!
//! A turn that looks like a question is answered with help for the current
//! step instead of being validated as an answer.

use crate::rules::{Cta, MAX_AD_TEXT_LENGTH, MIN_CAMPAIGN_NAME_LENGTH};

use super::Step;

/// Leading words that mark a turn as a question.
pub const INTERROGATIVES: [&str; 12] = [
    "what", "why", "how", "when", "where", "who", "is", "are", "can", "should", "do", "does",
];

/// True when the text ends with `?` or its first word is an interrogative.
pub fn is_question(text: &str) -> bool {
    let lowered = text.trim().to_lowercase();
    if lowered.ends_with('?') {
        return true;
    }
    lowered
        .split_whitespace()
        .next()
        .is_some_and(|first| INTERROGATIVES.contains(&first))
}

/// Answers questions asked during collection.
pub trait HelpResponder: Send + Sync {
    /// Whether the turn should be treated as a question.
    fn is_question(&self, text: &str) -> bool {
        is_question(text)
    }

    /// Help for a collection step, `None` for steps that take no answers.
    fn help_for(&self, step: Step) -> Option<String>;
}

/// Fixed explanatory text for each step.
#[derive(Debug, Clone, Copy, Default)]
pub struct CannedHelp;

impl HelpResponder for CannedHelp {
    fn help_for(&self, step: Step) -> Option<String> {
        let text = match step {
            Step::CollectName => format!(
                "A campaign name is a title for your ad campaign (for example \
                 'Summer Sale 2024' or 'Product Launch'). It needs to be at least \
                 {MIN_CAMPAIGN_NAME_LENGTH} characters. What would you like to name your campaign?"
            ),
            Step::CollectObjective => "These are the only two objectives available:\n\
                 • Traffic - Gets people to visit your website\n\
                 • Conversions - Gets people to take action (buy, sign up, download)\n\n\
                 Which one do you want? Type: Traffic or Conversions"
                .to_owned(),
            Step::CollectAdText => format!(
                "Yes, ad text is required. It's the main message that appears in your ad \
                 (like 'Summer Sale - 50% Off!' or 'New Collection Out Now'). Maximum \
                 {MAX_AD_TEXT_LENGTH} characters.\n\nWhat message would you like to show?"
            ),
            Step::CollectCta => format!(
                "A CTA (Call-to-Action) is the button users click on your ad. \
                 Different buttons work for different goals:\n{}\n\n\
                 Which one fits your ad best?",
                Cta::ALL
                    .iter()
                    .map(|cta| format!("• {} - {}", cta.label(), cta_purpose(*cta)))
                    .collect::<Vec<_>>()
                    .join("\n")
            ),
            Step::CollectMusic => "Music plays behind your ad. You can reference a track \
                 already in the music library by its ID (like music_12345), upload your own \
                 file, or, for Traffic campaigns only, skip music entirely. Conversions \
                 campaigns always need music.\n\nType 1 or 2 to choose, or 3 to skip music \
                 on a Traffic campaign."
                .to_owned(),
            Step::Start | Step::Validate | Step::Complete | Step::Cancelled => return None,
        };
        Some(text)
    }
}

fn cta_purpose(cta: Cta) -> &'static str {
    match cta {
        Cta::ShopNow => "for e-commerce",
        Cta::LearnMore => "for information",
        Cta::SignUp => "for registrations",
        Cta::Download => "for apps",
        Cta::GetApp => "for mobile apps",
        Cta::WatchNow => "for videos",
    }
}
