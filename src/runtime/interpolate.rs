//! `%{name}` / `{{name}}` placeholder substitution.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use super::translate::Translation;
use crate::types::InterpolationOptions;

/// Opener `%{` or `{{`, lazily captured name, closer `}` or `}}`.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"(?:\{\{|%\{)(.*?)(?:\}\}?)").unwrap()
});

/// A resolved translation that cannot be rendered as text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InterpolationError {
    #[error("No translation to interpolate")]
    Missing,

    #[error("Translation is a scope or plural forms, not a message")]
    NotAMessage,
}

/// Substitutes every placeholder of `message` with its value from `options`.
///
/// Matches are collected from the original message, then each one replaces the first
/// remaining literal occurrence of its text. A placeholder without a value becomes
/// `[missing <placeholder> value]`.
#[must_use]
pub fn interpolate(message: &str, options: &InterpolationOptions) -> String {
    let matches: Vec<(&str, &str)> = PLACEHOLDER
        .captures_iter(message)
        .filter_map(|caps| Some((caps.get(0)?.as_str(), caps.get(1)?.as_str())))
        .collect();

    if matches.is_empty() {
        return message.to_string();
    }

    let mut rendered = message.to_string();
    for (placeholder, name) in matches {
        let value = options
            .get(name)
            .map_or_else(|| format!("[missing {placeholder} value]"), ToString::to_string);
        rendered = rendered.replacen(placeholder, &value, 1);
    }
    rendered
}

/// Interpolates a resolved translation, refusing anything that is not a single message.
///
/// # Errors
/// The translation is absent, a scope, or unselected plural forms.
pub fn interpolate_translation(
    translation: Option<&Translation<'_>>,
    options: &InterpolationOptions,
) -> Result<String, InterpolationError> {
    match translation.ok_or(InterpolationError::Missing)? {
        Translation::Text(message) => Ok(interpolate(message, options)),
        Translation::Node(_) => Err(InterpolationError::NotAMessage),
    }
}
