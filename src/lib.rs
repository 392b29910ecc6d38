//! js-i18n-runtime
//!
//! Message lookup, locale fallback, pluralization and placeholder interpolation over
//! locale-keyed JSON translation tables, plus an ICU-style structured template engine.

pub mod config;
pub mod indexer;
pub mod input;
pub mod message_format;
pub mod registry;
pub mod runtime;
pub mod types;

mod test_utils;

pub use input::{
    Catalog,
    CatalogBuilder,
};
pub use message_format::MessageFormatRegistry;
pub use runtime::{
    I18n,
    Translate,
    Translator,
    VerboseLocalization,
};
pub use types::{
    LocaleContext,
    ScopePath,
    TranslateOptions,
};
