//! Immutable translation catalog: per-locale trees, extras trees and compiled templates.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use super::translation::{
    MessageNode,
    TranslationError,
    parse_locale_document,
};
use crate::config::I18nSettings;
use crate::message_format::{
    MessageFormatRegistry,
    TEMPLATE_SUFFIX,
};
use crate::runtime::plural::PluralRules;

/// Locale code to root node, for the primary tables and the extras tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTable {
    locales: HashMap<String, MessageNode>,
    extras: HashMap<String, MessageNode>,
}

impl TranslationTable {
    /// Primary tree of `locale`.
    #[must_use]
    pub fn locale(&self, locale: &str) -> Option<&MessageNode> {
        self.locales.get(locale)
    }

    /// Extras tree of `locale`.
    #[must_use]
    pub fn extras(&self, locale: &str) -> Option<&MessageNode> {
        self.extras.get(locale)
    }

    /// Locales that have a primary tree, sorted.
    #[must_use]
    pub fn locales(&self) -> Vec<&str> {
        let mut locales: Vec<&str> = self.locales.keys().map(String::as_str).collect();
        locales.sort_unstable();
        locales
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locales.is_empty() && self.extras.is_empty()
    }
}

/// Everything loaded for translation. Built once through [`CatalogBuilder`].
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    table: TranslationTable,
    message_formats: HashMap<String, MessageFormatRegistry>,
    rules: Arc<PluralRules>,
}

impl Catalog {
    #[must_use]
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    /// Builds a catalog from one locale-keyed document with the default namespace and separator.
    ///
    /// # Errors
    /// The document is not an object of objects.
    pub fn from_json(document: &Value) -> Result<Self, TranslationError> {
        let mut builder = CatalogBuilder::new();
        builder.add_document(document)?;
        Ok(builder.build())
    }

    #[must_use]
    pub const fn translations(&self) -> &TranslationTable {
        &self.table
    }

    /// Compiled templates of `locale`.
    #[must_use]
    pub fn message_formats(&self, locale: &str) -> Option<&MessageFormatRegistry> {
        self.message_formats.get(locale)
    }

    #[must_use]
    pub fn plural_rules(&self) -> &PluralRules {
        &self.rules
    }
}

/// Collects translation documents and compiles `_MF` leaves on [`CatalogBuilder::build`].
#[derive(Debug, Clone)]
pub struct CatalogBuilder {
    namespace: String,
    separator: String,
    rules: PluralRules,
    table: TranslationTable,
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogBuilder {
    /// Builder with namespace `js`, separator `.` and the built-in plural rules.
    #[must_use]
    pub fn new() -> Self {
        Self {
            namespace: "js".to_string(),
            separator: ".".to_string(),
            rules: PluralRules::default(),
            table: TranslationTable::default(),
        }
    }

    /// Builder using the namespace and separator of `settings`.
    #[must_use]
    pub fn from_settings(settings: &I18nSettings) -> Self {
        Self {
            namespace: settings.namespace.clone(),
            separator: settings.key_separator.clone(),
            ..Self::new()
        }
    }

    #[must_use]
    pub fn plural_rules(mut self, rules: PluralRules) -> Self {
        self.rules = rules;
        self
    }

    /// Adds every locale of a locale-keyed document to the primary trees.
    ///
    /// # Errors
    /// The document is not an object of objects. Nothing is added in that case.
    pub fn add_document(&mut self, document: &Value) -> Result<&mut Self, TranslationError> {
        for (locale, root) in parse_locale_document(document)? {
            self.add_locale(locale, root);
        }
        Ok(self)
    }

    /// Adds every locale of a locale-keyed document to the extras trees.
    ///
    /// # Errors
    /// The document is not an object of objects. Nothing is added in that case.
    pub fn add_extras_document(&mut self, document: &Value) -> Result<&mut Self, TranslationError> {
        for (locale, root) in parse_locale_document(document)? {
            self.add_extras(locale, root);
        }
        Ok(self)
    }

    /// Deep-merges `root` into the primary tree of `locale`.
    pub fn add_locale(&mut self, locale: impl Into<String>, root: MessageNode) -> &mut Self {
        merge_into(&mut self.table.locales, locale.into(), root);
        self
    }

    /// Deep-merges `root` into the extras tree of `locale`.
    pub fn add_extras(&mut self, locale: impl Into<String>, root: MessageNode) -> &mut Self {
        merge_into(&mut self.table.extras, locale.into(), root);
        self
    }

    /// Compiles the templates and freezes the catalog.
    #[must_use]
    pub fn build(self) -> Catalog {
        let rules = Arc::new(self.rules);
        let message_formats = self
            .table
            .locales
            .iter()
            .map(|(locale, root)| {
                let registry = compile_templates(locale, root, &self.namespace, &self.separator, &rules);
                (locale.clone(), registry)
            })
            .collect();

        Catalog { table: self.table, message_formats, rules }
    }
}

fn merge_into(trees: &mut HashMap<String, MessageNode>, locale: String, root: MessageNode) {
    match trees.get_mut(&locale) {
        Some(existing) => existing.merge(root),
        None => {
            trees.insert(locale, root);
        }
    }
}

/// Compiles every text leaf whose key ends with `_MF`.
///
/// The id is the leaf path joined with `separator`, without a leading namespace segment.
fn compile_templates(
    locale: &str,
    root: &MessageNode,
    namespace: &str,
    separator: &str,
    rules: &Arc<PluralRules>,
) -> MessageFormatRegistry {
    let mut registry = MessageFormatRegistry::new(locale, Arc::clone(rules));

    root.for_each_text(&mut |path, source| {
        if !path.last().is_some_and(|key| key.ends_with(TEMPLATE_SUFFIX)) {
            return;
        }
        let id_path = match path.split_first() {
            Some((first, rest)) if *first == namespace => rest,
            _ => path,
        };
        let id = id_path.join(separator);

        if let Err(error) = registry.compile(id.as_str(), source) {
            tracing::warn!(locale, template = %id, "Skipping invalid template: {error}");
        }
    });

    tracing::debug!(locale, templates = registry.len(), "Compiled message format templates");
    registry
}
