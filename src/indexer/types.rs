//! Indexer type definitions.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::{
    MatcherError,
    TranslationFileKind,
};

/// A translation file found while walking the workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationFile {
    pub path: PathBuf,
    pub kind: TranslationFileKind,
}

#[derive(Error, Debug)]
pub enum IndexerError {
    /// The workspace root is not a readable directory
    #[error("Workspace root is not a directory: {0}")]
    InvalidPath(PathBuf),
    /// The translation file patterns do not compile
    #[error("Invalid translation file patterns: {0}")]
    Matcher(#[from] MatcherError),
}
