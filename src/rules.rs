//! Static business rules for campaign fields.
//!
//! Everything here is pure data plus membership checks: length limits,
//! the objective and call-to-action enumerations, the fuzzy CTA keyword
//! table, and the music identifiers the ad service recognizes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Minimum campaign name length, in characters.
pub const MIN_CAMPAIGN_NAME_LENGTH: usize = 3;

/// Maximum ad text length, in characters.
pub const MAX_AD_TEXT_LENGTH: usize = 100;

/// Music identifiers present in the service's library.
pub const KNOWN_MUSIC_IDS: [&str; 3] = ["music_12345", "music_67890", "music_11111"];

/// Returns true when the identifier exists in the music library.
pub fn is_known_music_id(id: &str) -> bool {
    KNOWN_MUSIC_IDS.contains(&id)
}

/// Character count used for every length rule.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

// ---------------------------------------------------------------------------
// Objective
// ---------------------------------------------------------------------------

/// Campaign objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Objective {
    /// Drive users to a website.
    Traffic,
    /// Drive specific actions such as purchases or sign-ups.
    Conversions,
}

impl Objective {
    /// All objectives in display order.
    pub const ALL: [Objective; 2] = [Objective::Traffic, Objective::Conversions];

    /// Canonical label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Traffic => "Traffic",
            Self::Conversions => "Conversions",
        }
    }

    /// Whether a campaign with this objective must carry music.
    pub fn requires_music(self) -> bool {
        matches!(self, Self::Conversions)
    }

    /// Trim and title-case the input, then match it exactly against the labels.
    pub fn parse(input: &str) -> Option<Self> {
        let normalized = title_case(input.trim());
        Self::ALL
            .into_iter()
            .find(|objective| objective.label() == normalized)
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Upper-case the first character of each word, lower-case the rest.
fn title_case(input: &str) -> String {
    input
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Call to action
// ---------------------------------------------------------------------------

/// Call-to-action button label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cta {
    /// "Shop Now"
    #[serde(rename = "Shop Now")]
    ShopNow,
    /// "Learn More"
    #[serde(rename = "Learn More")]
    LearnMore,
    /// "Sign Up"
    #[serde(rename = "Sign Up")]
    SignUp,
    /// "Download"
    #[serde(rename = "Download")]
    Download,
    /// "Get App"
    #[serde(rename = "Get App")]
    GetApp,
    /// "Watch Now"
    #[serde(rename = "Watch Now")]
    WatchNow,
}

/// Keyword fallback for free-form CTA input.
///
/// Matching is substring containment against the lower-cased input and the
/// first hit in declaration order wins. Short keywords such as "app" and
/// "get" match inside unrelated words, so reordering this table changes
/// results.
pub const CTA_KEYWORDS: [(&str, Cta); 16] = [
    ("shop", Cta::ShopNow),
    ("buy", Cta::ShopNow),
    ("purchase", Cta::ShopNow),
    ("learn", Cta::LearnMore),
    ("more", Cta::LearnMore),
    ("info", Cta::LearnMore),
    ("signup", Cta::SignUp),
    ("sign up", Cta::SignUp),
    ("register", Cta::SignUp),
    ("download", Cta::Download),
    ("install", Cta::Download),
    ("get", Cta::GetApp),
    ("app", Cta::GetApp),
    ("watch", Cta::WatchNow),
    ("view", Cta::WatchNow),
    ("play", Cta::WatchNow),
];

impl Cta {
    /// All labels in display order.
    pub const ALL: [Cta; 6] = [
        Cta::ShopNow,
        Cta::LearnMore,
        Cta::SignUp,
        Cta::Download,
        Cta::GetApp,
        Cta::WatchNow,
    ];

    /// Canonical label.
    pub fn label(self) -> &'static str {
        match self {
            Self::ShopNow => "Shop Now",
            Self::LearnMore => "Learn More",
            Self::SignUp => "Sign Up",
            Self::Download => "Download",
            Self::GetApp => "Get App",
            Self::WatchNow => "Watch Now",
        }
    }

    /// Resolve free-form input to a canonical label.
    ///
    /// Exact case-insensitive label match first, then [`CTA_KEYWORDS`].
    pub fn normalize(input: &str) -> Option<Self> {
        let lowered = input.trim().to_lowercase();

        if let Some(exact) = Self::ALL
            .into_iter()
            .find(|cta| cta.label().to_lowercase() == lowered)
        {
            return Some(exact);
        }

        CTA_KEYWORDS
            .iter()
            .find(|(keyword, _)| lowered.contains(keyword))
            .map(|&(_, cta)| cta)
    }

    /// Bulleted list of every label, one per line.
    pub fn bullet_list() -> String {
        Self::ALL
            .iter()
            .map(|cta| format!("• {}", cta.label()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for Cta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
