//! The translate orchestrator: lookup, locale fallback, pluralization and interpolation.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::interpolate::interpolate_translation;
use super::lookup::{
    KeyLayout,
    LookupValue,
    lookup,
};
use super::plural::PluralCategory;
use super::verbose::VerboseLocalization;
use crate::config::I18nSettings;
use crate::input::catalog::Catalog;
use crate::input::translation::{
    Message,
    MessageNode,
    MessageRef,
};
use crate::registry;
use crate::types::{
    LocaleContext,
    ScopePath,
    TranslateOptions,
};

/// Locale tried last when every configured locale misses.
const LAST_RESORT_LOCALE: &str = "en";

/// Anything that turns a key into display text.
pub trait Translate: fmt::Debug + Send + Sync {
    /// Translates `scope`. Faults come back as bracketed markers, never as errors.
    fn translate(&self, scope: &ScopePath, options: &TranslateOptions, ctx: &LocaleContext)
    -> String;
}

/// A resolved translation before interpolation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation<'a> {
    Text(Cow<'a, str>),
    /// A scope or plural forms; it cannot be interpolated.
    Node(&'a MessageNode),
}

impl<'a> Translation<'a> {
    /// Empty text counts as absent, so the fallback chain keeps going.
    fn is_present(&self) -> bool {
        match self {
            Self::Text(text) => !text.is_empty(),
            Self::Node(_) => true,
        }
    }

    fn from_lookup(value: LookupValue<'a>) -> Self {
        match value {
            LookupValue::Default(text) | LookupValue::Found(MessageRef::Text(text)) => {
                Self::Text(Cow::Borrowed(text))
            }
            LookupValue::Found(MessageRef::Node(MessageNode::Message(Message::PlainText(text)))) => {
                Self::Text(Cow::Borrowed(text.as_str()))
            }
            LookupValue::Found(MessageRef::Node(node)) => Self::Node(node),
        }
    }
}

/// Translator over a shared catalog.
#[derive(Debug, Clone)]
pub struct Translator {
    catalog: Arc<Catalog>,
    layout: KeyLayout,
}

impl Translator {
    /// Translator with separator `.` and namespace `js`.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog, layout: KeyLayout::default() }
    }

    #[must_use]
    pub fn from_settings(catalog: Arc<Catalog>, settings: &I18nSettings) -> Self {
        let layout = KeyLayout {
            separator: settings.key_separator.clone(),
            namespace: settings.namespace.clone(),
        };
        Self { catalog, layout }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn layout(&self) -> &KeyLayout {
        &self.layout
    }

    /// Raw lookup in `options.locale`, else `ctx.locale`.
    #[must_use]
    pub fn lookup<'a>(
        &'a self,
        scope: &ScopePath,
        options: &'a TranslateOptions,
        ctx: &LocaleContext,
    ) -> Option<LookupValue<'a>> {
        let locale = options.locale.as_deref().unwrap_or(&ctx.locale);
        lookup(self.catalog.translations(), &self.layout, scope, options, locale)
    }

    /// Looks up `scope` in `locale` and selects a plural form when a count is given.
    ///
    /// `requested` is the locale the caller asked for; plural markers name it.
    fn find_translation<'a>(
        &'a self,
        scope: &ScopePath,
        options: &'a TranslateOptions,
        locale: &str,
        requested: &str,
        ignore_missing: bool,
    ) -> Option<Translation<'a>> {
        let found = lookup(self.catalog.translations(), &self.layout, scope, options, locale)
            .map(Translation::from_lookup)?;

        match options.count {
            Some(count) => self.pluralize(found, scope, count, locale, requested, ignore_missing),
            None => Some(found),
        }
    }

    /// Picks the form for `count` from a plural node, using the rule of `locale`. Text passes through.
    ///
    /// A miss is `None` while `ignore_missing` holds, else a `[requested.scope.category]` marker.
    fn pluralize<'a>(
        &self,
        translation: Translation<'a>,
        scope: &ScopePath,
        count: f64,
        locale: &str,
        requested: &str,
        ignore_missing: bool,
    ) -> Option<Translation<'a>> {
        let Translation::Node(node) = translation else {
            return Some(translation);
        };

        let candidates = self.catalog.plural_rules().categories(locale, count);
        let selected = match node {
            MessageNode::Message(Message::PluralForms(forms)) => forms.select(candidates),
            MessageNode::Message(Message::PlainText(text)) => Some(text.as_str()),
            MessageNode::Scope(_) => candidates
                .iter()
                .chain([&PluralCategory::Other])
                .find_map(|category| node.walk([category.as_str()])?.as_text()),
        };

        if let Some(text) = selected {
            return Some(Translation::Text(Cow::Borrowed(text)));
        }
        if ignore_missing {
            return None;
        }

        let category = candidates.first().copied().unwrap_or(PluralCategory::Other);
        Some(Translation::Text(Cow::Owned(self.missing_marker(requested, scope, Some(category)))))
    }

    /// `[locale.scope]` or `[locale.scope.category]`.
    fn missing_marker(
        &self,
        locale: &str,
        scope: &ScopePath,
        category: Option<PluralCategory>,
    ) -> String {
        let separator = &self.layout.separator;
        let scope = scope.joined(separator);
        match category {
            Some(category) => format!("[{locale}{separator}{scope}{separator}{category}]"),
            None => format!("[{locale}{separator}{scope}]"),
        }
    }

    /// Renders structured template `id` from the registry of `ctx.locale`.
    #[must_use]
    pub fn message_format(&self, id: &str, data: &Value, ctx: &LocaleContext) -> String {
        match self.catalog.message_formats(&ctx.locale) {
            Some(registry) => registry.render(id, data),
            None => format!("Missing Key: {id}"),
        }
    }
}

impl Translate for Translator {
    fn translate(
        &self,
        scope: &ScopePath,
        options: &TranslateOptions,
        ctx: &LocaleContext,
    ) -> String {
        let requested = options.locale.as_deref().unwrap_or(&ctx.locale);
        let mut ignore_missing = !ctx.no_fallbacks;
        let mut translation = self.find_translation(scope, options, requested, requested, ignore_missing);

        if !ctx.no_fallbacks {
            let missing = |translation: &Option<Translation<'_>>| {
                !translation.as_ref().is_some_and(Translation::is_present)
            };

            if missing(&translation) {
                if let Some(fallback) = ctx.fallback_locale.as_deref() {
                    tracing::debug!(locale = fallback, "Retrying with fallback locale");
                    translation =
                        self.find_translation(scope, options, fallback, requested, ignore_missing);
                }
            }
            ignore_missing = false;

            if missing(&translation) && ctx.locale != ctx.default_locale {
                tracing::debug!(locale = %ctx.default_locale, "Retrying with default locale");
                translation = self.find_translation(
                    scope,
                    options,
                    &ctx.default_locale,
                    requested,
                    ignore_missing,
                );
            }
            if missing(&translation) && ctx.locale != LAST_RESORT_LOCALE {
                tracing::debug!(locale = LAST_RESORT_LOCALE, "Retrying with last resort locale");
                translation = self.find_translation(
                    scope,
                    options,
                    LAST_RESORT_LOCALE,
                    requested,
                    ignore_missing,
                );
            }
        }

        match interpolate_translation(translation.as_ref(), &options.interpolation_values()) {
            Ok(rendered) => rendered,
            Err(error) => {
                tracing::debug!(scope = %scope.joined(&self.layout.separator), "{error}");
                self.missing_marker(requested, scope, None)
            }
        }
    }
}

/// Configured entry point: a translator, its locale context and the catalog it reads.
#[derive(Debug)]
pub struct I18n {
    catalog: Arc<Catalog>,
    translator: Box<dyn Translate>,
    context: LocaleContext,
}

impl I18n {
    /// Wraps the translator in [`VerboseLocalization`] when `verboseLocalization` is set.
    #[must_use]
    pub fn from_settings(catalog: Arc<Catalog>, settings: &I18nSettings) -> Self {
        let translator = Translator::from_settings(Arc::clone(&catalog), settings);
        let translator: Box<dyn Translate> = if settings.verbose_localization {
            Box::new(VerboseLocalization::new(translator).with_separator(&settings.key_separator))
        } else {
            Box::new(translator)
        };

        Self { catalog, translator, context: LocaleContext::from_settings(settings) }
    }

    /// Same as [`I18n::from_settings`] over the catalog last passed to [`registry::install`].
    ///
    /// The catalog is captured now; a later install does not affect this instance.
    #[must_use]
    pub fn from_installed(settings: &I18nSettings) -> Self {
        Self::from_settings(registry::current(), settings)
    }

    #[must_use]
    pub const fn context(&self) -> &LocaleContext {
        &self.context
    }

    /// Switches the current locale for later calls.
    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.context.locale = locale.into();
    }

    /// Translates `scope` in the current context.
    #[must_use]
    pub fn t(&self, scope: impl Into<ScopePath>, options: &TranslateOptions) -> String {
        self.translator.translate(&scope.into(), options, &self.context)
    }

    /// Renders structured template `id` in the current locale.
    #[must_use]
    pub fn render(&self, id: &str, data: &Value) -> String {
        match self.catalog.message_formats(&self.context.locale) {
            Some(registry) => registry.render(id, data),
            None => format!("Missing Key: {id}"),
        }
    }
}

impl Translate for I18n {
    fn translate(
        &self,
        scope: &ScopePath,
        options: &TranslateOptions,
        ctx: &LocaleContext,
    ) -> String {
        self.translator.translate(scope, options, ctx)
    }
}
