//! Per-field validation and normalization shared by both entry surfaces.

use crate::rules::{char_len, Cta, Objective, MAX_AD_TEXT_LENGTH, MIN_CAMPAIGN_NAME_LENGTH};

/// A field value rejected by the business rules.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// Trimmed name is shorter than the minimum.
    #[error("campaign name '{input}' is {len} character(s), minimum is {min}")]
    NameTooShort {
        /// Trimmed input.
        input: String,
        /// Its length in characters.
        len: usize,
        /// Required minimum.
        min: usize,
    },

    /// Not one of the objective labels.
    #[error("'{input}' is not a valid objective, expected Traffic or Conversions")]
    UnknownObjective {
        /// Raw input.
        input: String,
    },

    /// Trimmed ad text is empty.
    #[error("ad text cannot be empty")]
    EmptyAdText,

    /// Trimmed ad text exceeds the maximum.
    #[error("ad text is {len} characters, maximum is {max} ({over} over)")]
    AdTextTooLong {
        /// Trimmed text.
        text: String,
        /// Its length in characters.
        len: usize,
        /// Allowed maximum.
        max: usize,
        /// Characters to remove.
        over: usize,
    },

    /// Neither a label nor a keyword match.
    #[error("'{input}' doesn't match any available CTA")]
    UnknownCta {
        /// Raw input.
        input: String,
    },
}

/// Trim and length-check a campaign name.
///
/// # Errors
///
/// [`FieldError::NameTooShort`] below [`MIN_CAMPAIGN_NAME_LENGTH`].
pub fn campaign_name(input: &str) -> Result<String, FieldError> {
    let name = input.trim();
    let len = char_len(name);
    if len < MIN_CAMPAIGN_NAME_LENGTH {
        return Err(FieldError::NameTooShort {
            input: name.to_owned(),
            len,
            min: MIN_CAMPAIGN_NAME_LENGTH,
        });
    }
    Ok(name.to_owned())
}

/// Normalize and match an objective.
///
/// # Errors
///
/// [`FieldError::UnknownObjective`] when the title-cased input is not a label.
pub fn objective(input: &str) -> Result<Objective, FieldError> {
    Objective::parse(input).ok_or_else(|| FieldError::UnknownObjective {
        input: input.to_owned(),
    })
}

/// Trim and length-check ad text.
///
/// # Errors
///
/// [`FieldError::EmptyAdText`] or [`FieldError::AdTextTooLong`].
pub fn ad_text(input: &str) -> Result<String, FieldError> {
    let text = input.trim();
    let len = char_len(text);
    if len == 0 {
        return Err(FieldError::EmptyAdText);
    }
    if len > MAX_AD_TEXT_LENGTH {
        return Err(FieldError::AdTextTooLong {
            text: text.to_owned(),
            len,
            max: MAX_AD_TEXT_LENGTH,
            over: len.saturating_sub(MAX_AD_TEXT_LENGTH),
        });
    }
    Ok(text.to_owned())
}

/// Resolve free-form input to a canonical CTA.
///
/// # Errors
///
/// [`FieldError::UnknownCta`] when no label or keyword matches.
pub fn cta(input: &str) -> Result<Cta, FieldError> {
    Cta::normalize(input).ok_or_else(|| FieldError::UnknownCta {
        input: input.to_owned(),
    })
}
