//! Core types used throughout the project.

use std::collections::BTreeMap;
use std::fmt;

use serde::{
    Deserialize,
    Serialize,
};

use crate::config::I18nSettings;

/// A translation key, either dot-delimited (`"topic.title"`) or already split.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScopePath {
    Dotted(String),
    Segments(Vec<String>),
}

impl ScopePath {
    /// Returns the key as a single string joined with `separator`.
    #[must_use]
    pub fn joined(&self, separator: &str) -> String {
        match self {
            Self::Dotted(key) => key.clone(),
            Self::Segments(segments) => segments.join(separator),
        }
    }
}

impl From<&str> for ScopePath {
    fn from(key: &str) -> Self {
        Self::Dotted(key.to_string())
    }
}

impl From<String> for ScopePath {
    fn from(key: String) -> Self {
        Self::Dotted(key)
    }
}

impl From<Vec<String>> for ScopePath {
    fn from(segments: Vec<String>) -> Self {
        Self::Segments(segments)
    }
}

impl From<&[&str]> for ScopePath {
    fn from(segments: &[&str]) -> Self {
        Self::Segments(segments.iter().map(|s| (*s).to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ScopePath {
    fn from(segments: [&str; N]) -> Self {
        Self::Segments(segments.iter().map(|s| (*s).to_string()).collect())
    }
}

/// A value supplied for a placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Text(String),
    Number(f64),
}

impl OptionValue {
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(n) => f.write_str(&format_number(*n)),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<u32> for OptionValue {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

/// Formats a number the way it reads in a rendered message: `5`, `2.5`, `-3`.
#[must_use]
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n.is_sign_negative() { "-Infinity".to_string() } else { "Infinity".to_string() }
    } else if n == 0.0 {
        "0".to_string()
    } else {
        n.to_string()
    }
}

/// Placeholder name to value mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterpolationOptions(BTreeMap<String, OptionValue>);

impl InterpolationOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges several option sources. For each key the first source holding it wins.
    #[must_use]
    pub fn prepare(sources: &[&Self]) -> Self {
        let mut merged = BTreeMap::new();
        for source in sources {
            for (name, value) in &source.0 {
                merged.entry(name.clone()).or_insert_with(|| value.clone());
            }
        }
        Self(merged)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<OptionValue>) {
        self.0.insert(name.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.0.get(name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for InterpolationOptions
where
    K: Into<String>,
    V: Into<OptionValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Per-call options for `translate` and `lookup`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslateOptions {
    /// Overrides the context locale for this call.
    pub locale: Option<String>,
    /// Prefix prepended to the key.
    pub scope: Option<String>,
    /// Returned by lookup when the key is missing everywhere.
    pub default_value: Option<String>,
    /// Enables pluralization and is available as `%{count}`.
    pub count: Option<f64>,
    pub values: InterpolationOptions,
}

impl TranslateOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    #[must_use]
    pub fn with_default_value(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    #[must_use]
    pub const fn with_count(mut self, count: f64) -> Self {
        self.count = Some(count);
        self
    }

    #[must_use]
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.values.insert(name, value);
        self
    }

    /// Values visible to the interpolator: `count` first, then the explicit values.
    #[must_use]
    pub fn interpolation_values(&self) -> InterpolationOptions {
        let count: InterpolationOptions = self
            .count
            .map(|count| [("count", OptionValue::Number(count))].into_iter().collect())
            .unwrap_or_default();
        InterpolationOptions::prepare(&[&count, &self.values])
    }
}

/// Locale state passed explicitly into every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleContext {
    /// The current locale.
    pub locale: String,
    pub default_locale: String,
    pub fallback_locale: Option<String>,
    pub no_fallbacks: bool,
}

impl LocaleContext {
    /// Context for `locale` with `"en"` as default locale and fallbacks enabled.
    #[must_use]
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            default_locale: "en".to_string(),
            fallback_locale: None,
            no_fallbacks: false,
        }
    }

    #[must_use]
    pub fn from_settings(settings: &I18nSettings) -> Self {
        Self {
            locale: settings.locale.clone(),
            default_locale: settings.default_locale.clone(),
            fallback_locale: settings.fallback_locale.clone(),
            no_fallbacks: settings.no_fallbacks,
        }
    }

    #[must_use]
    pub fn with_locale(&self, locale: impl Into<String>) -> Self {
        Self { locale: locale.into(), ..self.clone() }
    }

    #[must_use]
    pub fn with_fallback_locale(mut self, locale: impl Into<String>) -> Self {
        self.fallback_locale = Some(locale.into());
        self
    }

    #[must_use]
    pub fn with_default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = locale.into();
        self
    }

    #[must_use]
    pub const fn without_fallbacks(mut self) -> Self {
        self.no_fallbacks = true;
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::integer(5.0, "5")]
    #[case::negative(-3.0, "-3")]
    #[case::fraction(2.5, "2.5")]
    #[case::negative_zero(-0.0, "0")]
    #[case::nan(f64::NAN, "NaN")]
    #[case::infinity(f64::INFINITY, "Infinity")]
    fn test_format_number(#[case] n: f64, #[case] expected: &str) {
        assert_that!(format_number(n), eq(expected));
    }

    #[rstest]
    #[case::dotted(ScopePath::from("a.b.c"), ".", "a.b.c")]
    #[case::segments(ScopePath::from(["a", "b", "c"]), ".", "a.b.c")]
    #[case::custom_separator(ScopePath::from(["a", "b"]), "/", "a/b")]
    fn test_scope_path_joined(
        #[case] path: ScopePath,
        #[case] separator: &str,
        #[case] expected: &str,
    ) {
        assert_that!(path.joined(separator), eq(expected));
    }

    #[rstest]
    fn prepare_first_source_wins() {
        let first: InterpolationOptions = [("name", "first")].into_iter().collect();
        let second: InterpolationOptions =
            [("name", "second"), ("other", "value")].into_iter().collect();

        let merged = InterpolationOptions::prepare(&[&first, &second]);

        assert_that!(merged.get("name"), some(eq(&OptionValue::from("first"))));
        assert_that!(merged.get("other"), some(eq(&OptionValue::from("value"))));
    }

    #[rstest]
    fn interpolation_values_include_count() {
        let options = TranslateOptions::new().with_count(3.0).with_value("name", "Ivan");

        let values = options.interpolation_values();

        assert_that!(values.get("count"), some(eq(&OptionValue::Number(3.0))));
        assert_that!(values.get("name"), some(eq(&OptionValue::from("Ivan"))));
    }

    #[rstest]
    fn locale_context_from_settings() {
        let settings = I18nSettings {
            locale: "ru".to_string(),
            fallback_locale: Some("uk".to_string()),
            ..I18nSettings::default()
        };

        let ctx = LocaleContext::from_settings(&settings);

        assert_that!(ctx.locale, eq("ru"));
        assert_that!(ctx.default_locale, eq("en"));
        assert_that!(ctx.fallback_locale, some(eq("uk")));
        assert_that!(ctx.no_fallbacks, eq(false));
    }
}
