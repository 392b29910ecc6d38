//! Translation data: the message tree model, JSON parsing and the built catalog.
/// Catalog and builder
pub mod catalog;
/// Translation tree model and JSON parsing
pub mod translation;

pub use catalog::{
    Catalog,
    CatalogBuilder,
    TranslationTable,
};
pub use translation::{
    Message,
    MessageNode,
    MessageRef,
    PluralForms,
    TranslationError,
};
