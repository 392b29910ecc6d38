//! Translation file discovery and catalog construction.
/// Indexer type definitions
pub mod types;
/// Workspace walker
pub mod workspace;

pub use types::{
    IndexerError,
    TranslationFile,
};
pub use workspace::CatalogIndexer;
