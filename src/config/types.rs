use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "translationFiles.includePatterns[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Renders validation errors as a numbered list.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct I18nSettings {
    /// Locale used when a call does not request one.
    pub locale: String,
    /// Locale tried after `fallback_locale` when a key is missing.
    pub default_locale: String,
    /// First locale tried when a key is missing in the requested one.
    pub fallback_locale: Option<String>,
    /// Disables the whole fallback chain. Missing keys render as markers right away.
    pub no_fallbacks: bool,

    pub key_separator: String,
    /// Root segment every lookup lives under.
    pub namespace: String,

    /// Wraps the translator with the numbering/logging decorator.
    pub verbose_localization: bool,

    pub translation_files: TranslationFilesConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslationFilesConfig {
    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,
    /// Files matching these patterns are loaded as extras trees (searched without the namespace root).
    pub extras_patterns: Vec<String>,
}

impl I18nSettings {
    /// # Errors
    /// - Required field is empty
    /// - Invalid glob pattern
    /// - Invalid separator
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.locale.is_empty() {
            errors.push(ValidationError::new(
                "locale",
                "The locale cannot be empty. Example: \"en\"",
            ));
        }

        if self.default_locale.is_empty() {
            errors.push(ValidationError::new(
                "defaultLocale",
                "The locale cannot be empty. Example: \"en\"",
            ));
        }

        if let Some(fallback) = &self.fallback_locale
            && fallback.is_empty()
        {
            errors.push(ValidationError::new(
                "fallbackLocale",
                "The locale cannot be empty. Please specify a locale (e.g., \"en\"), or remove this field",
            ));
        }

        if self.key_separator.is_empty() {
            errors.push(ValidationError::new(
                "keySeparator",
                "The separator cannot be empty. Please specify a separator, for example: \".\" (dot)",
            ));
        }

        if self.namespace.is_empty() {
            errors.push(ValidationError::new(
                "namespace",
                "The namespace cannot be empty. Example: \"js\"",
            ));
        } else if !self.key_separator.is_empty() && self.namespace.contains(&self.key_separator) {
            errors.push(ValidationError::new(
                "namespace",
                format!(
                    "The namespace '{}' must not contain the key separator '{}'",
                    self.namespace, self.key_separator
                ),
            ));
        }

        if self.translation_files.include_patterns.is_empty() {
            errors.push(ValidationError::new(
                "translationFiles.includePatterns",
                "At least one pattern is required. Example: [\"**/locales/**/*.json\"]",
            ));
        }

        let pattern_groups = [
            ("translationFiles.includePatterns", &self.translation_files.include_patterns),
            ("translationFiles.excludePatterns", &self.translation_files.exclude_patterns),
            ("translationFiles.extrasPatterns", &self.translation_files.extras_patterns),
        ];
        for (field, patterns) in pattern_groups {
            for (index, pattern) in patterns.iter().enumerate() {
                if let Err(e) = globset::Glob::new(pattern) {
                    errors.push(ValidationError::new(
                        format!("{field}[{index}]"),
                        format!("Invalid glob pattern '{pattern}': {e}"),
                    ));
                }
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for TranslationFilesConfig {
    fn default() -> Self {
        Self {
            include_patterns: vec!["**/{locales,translations}/**/*.json".to_string()],
            exclude_patterns: vec!["node_modules/**".to_string()],
            extras_patterns: vec!["**/extras/**/*.json".to_string()],
        }
    }
}

impl Default for I18nSettings {
    fn default() -> Self {
        Self {
            locale: "en".to_string(),
            default_locale: "en".to_string(),
            fallback_locale: None,
            no_fallbacks: false,
            key_separator: ".".to_string(),
            namespace: "js".to_string(),
            verbose_localization: false,
            translation_files: TranslationFilesConfig::default(),
        }
    }
}
