//! Glob matcher that classifies translation files.

use std::path::{
    Path,
    PathBuf,
};

use globset::{
    Glob,
    GlobSet,
    GlobSetBuilder,
};

use super::I18nSettings;

#[derive(Debug, thiserror::Error)]
pub enum MatcherError {
    #[error("Invalid translation file pattern '{pattern}': {source}")]
    InvalidTranslationPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Invalid exclude pattern '{pattern}': {source}")]
    InvalidExcludePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Invalid extras pattern '{pattern}': {source}")]
    InvalidExtrasPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to build glob set: {0}")]
    GlobSetBuild(#[from] globset::Error),
}

/// What a matched file contributes to the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationFileKind {
    /// Locale-keyed tree searched under the namespace root.
    Primary,
    /// Locale-keyed tree searched with the raw key when the primary lookup misses.
    Extras,
}

/// Matches files against the `translationFiles` glob patterns.
#[derive(Debug, Clone)]
pub struct FileMatcher {
    workspace_root: PathBuf,
    include_set: GlobSet,
    exclude_set: GlobSet,
    extras_set: GlobSet,
}

impl FileMatcher {
    /// Creates a new matcher from settings.
    pub fn new(workspace_root: PathBuf, settings: &I18nSettings) -> Result<Self, MatcherError> {
        let files = &settings.translation_files;

        let include_set = Self::build_glob_set(&files.include_patterns, |pattern, source| {
            MatcherError::InvalidTranslationPattern { pattern, source }
        })?;

        let exclude_set = Self::build_glob_set(&files.exclude_patterns, |pattern, source| {
            MatcherError::InvalidExcludePattern { pattern, source }
        })?;

        let extras_set = Self::build_glob_set(&files.extras_patterns, |pattern, source| {
            MatcherError::InvalidExtrasPattern { pattern, source }
        })?;

        Ok(Self { workspace_root, include_set, exclude_set, extras_set })
    }

    fn build_glob_set<F>(patterns: &[String], make_error: F) -> Result<GlobSet, MatcherError>
    where
        F: Fn(String, globset::Error) -> MatcherError,
    {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| make_error(pattern.clone(), e))?;
            builder.add(glob);
        }
        Ok(builder.build()?)
    }

    #[must_use]
    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// Classifies an absolute path under the workspace root.
    #[must_use]
    pub fn classify(&self, absolute_path: &Path) -> Option<TranslationFileKind> {
        let relative_path = absolute_path.strip_prefix(&self.workspace_root).ok()?;

        self.classify_relative(relative_path)
    }

    /// Classifies a path relative to the workspace root.
    ///
    /// Excluded files are `None`. Extras patterns win over include patterns.
    #[must_use]
    pub fn classify_relative(&self, relative_path: &Path) -> Option<TranslationFileKind> {
        if self.exclude_set.is_match(relative_path) {
            return None;
        }
        if self.extras_set.is_match(relative_path) {
            return Some(TranslationFileKind::Extras);
        }
        if self.include_set.is_match(relative_path) {
            return Some(TranslationFileKind::Primary);
        }
        None
    }
}
