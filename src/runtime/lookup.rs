//! Scope normalization and the tree walk behind `lookup`.

use crate::input::catalog::TranslationTable;
use crate::input::translation::{
    MessageNode,
    MessageRef,
};
use crate::types::{
    ScopePath,
    TranslateOptions,
};

/// Result of a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupValue<'a> {
    /// Hit in the primary or extras tree.
    Found(MessageRef<'a>),
    /// Nothing found; this is `options.default_value`.
    Default(&'a str),
}

impl<'a> LookupValue<'a> {
    /// Text of a plain-text hit or of the default value.
    #[must_use]
    pub fn as_text(self) -> Option<&'a str> {
        match self {
            Self::Found(hit) => hit.as_text(),
            Self::Default(text) => Some(text),
        }
    }
}

/// How keys are split and rooted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyLayout {
    /// Segment separator.
    pub separator: String,
    /// Root segment every primary lookup starts from.
    pub namespace: String,
}

impl Default for KeyLayout {
    fn default() -> Self {
        Self { separator: ".".to_string(), namespace: "js".to_string() }
    }
}

/// A scope split into segments, before and after namespace rooting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedScope {
    /// Segments walked in the primary tree, always starting with the namespace.
    pub rooted: Vec<String>,
    /// Segments walked in the extras tree.
    pub original: Vec<String>,
}

impl KeyLayout {
    /// Joins `scope`, prepends `prefix` and splits on the separator.
    ///
    /// The namespace is pushed onto the front of the rooted path unless it is already there.
    #[must_use]
    pub fn normalize(&self, scope: &ScopePath, prefix: Option<&str>) -> NormalizedScope {
        let joined = scope.joined(&self.separator);
        let full = match prefix {
            Some(prefix) => format!("{prefix}{}{joined}", self.separator),
            None => joined,
        };

        let original: Vec<String> = full.split(self.separator.as_str()).map(str::to_string).collect();
        let mut rooted = original.clone();
        if rooted.first() != Some(&self.namespace) {
            rooted.insert(0, self.namespace.clone());
        }

        NormalizedScope { rooted, original }
    }
}

/// Resolves `scope` in `locale`, retrying the extras tree and then the default value.
///
/// A locale without a tree behaves like an empty tree.
#[must_use]
pub fn lookup<'a>(
    table: &'a TranslationTable,
    layout: &KeyLayout,
    scope: &ScopePath,
    options: &'a TranslateOptions,
    locale: &str,
) -> Option<LookupValue<'a>> {
    let normalized = layout.normalize(scope, options.scope.as_deref());

    let primary = table.locale(locale).and_then(|root| walk(root, &normalized.rooted));
    let found = primary.or_else(|| {
        table.extras(locale).and_then(|extras| walk(extras, &normalized.original))
    });

    found
        .map(LookupValue::Found)
        .or_else(|| options.default_value.as_deref().map(LookupValue::Default))
}

/// Walks owned segments.
fn walk<'a>(root: &'a MessageNode, segments: &[String]) -> Option<MessageRef<'a>> {
    root.walk(segments.iter().map(String::as_str))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;
    use serde_json::json;

    use super::*;
    use crate::input::catalog::Catalog;

    #[fixture]
    fn catalog() -> Catalog {
        let mut builder = Catalog::builder();
        builder
            .add_document(&json!({
                "en": {
                    "js": {
                        "foo": {"bar": "Foo bar", "empty": ""},
                        "topics": {"one": "%{count} topic", "other": "%{count} topics"}
                    }
                }
            }))
            .unwrap();
        builder
            .add_extras_document(&json!({"en": {"admin": {"title": "Admin"}, "foo": {"bar": "Extra"}}}))
            .unwrap();
        builder.build()
    }

    fn text<'a>(
        catalog: &'a Catalog,
        scope: impl Into<ScopePath>,
        options: &'a TranslateOptions,
    ) -> Option<&'a str> {
        lookup(catalog.translations(), &KeyLayout::default(), &scope.into(), options, "en")
            .and_then(LookupValue::as_text)
    }

    #[rstest]
    fn namespace_is_added_once(catalog: Catalog) {
        let options = TranslateOptions::new();

        assert_that!(text(&catalog, "foo.bar", &options), some(eq("Foo bar")));
        assert_that!(text(&catalog, ["js", "foo", "bar"], &options), some(eq("Foo bar")));
        assert_that!(text(&catalog, "js.foo.bar", &options), some(eq("Foo bar")));
    }

    #[rstest]
    fn options_scope_is_prepended(catalog: Catalog) {
        let options = TranslateOptions::new().with_scope("foo");

        assert_that!(text(&catalog, "bar", &options), some(eq("Foo bar")));
    }

    #[rstest]
    fn extras_use_the_original_path(catalog: Catalog) {
        let options = TranslateOptions::new();

        assert_that!(text(&catalog, "admin.title", &options), some(eq("Admin")));
        assert_that!(text(&catalog, "js.admin.title", &options), none());
    }

    #[rstest]
    fn empty_text_stops_the_walk_and_is_returned(catalog: Catalog) {
        let options = TranslateOptions::new();

        assert_that!(text(&catalog, "foo.empty", &options), some(eq("")));
        assert_that!(text(&catalog, "foo.empty.deeper", &options), some(eq("")));
    }

    #[rstest]
    fn plural_forms_are_returned_whole_or_by_category(catalog: Catalog) {
        let options = TranslateOptions::new();
        let layout = KeyLayout::default();

        let whole = lookup(catalog.translations(), &layout, &"topics".into(), &options, "en");
        assert_that!(whole.and_then(LookupValue::as_text), none());
        assert_that!(whole, some(anything()));
        assert_that!(text(&catalog, "topics.one", &options), some(eq("%{count} topic")));
    }

    #[rstest]
    fn missing_key_yields_default_value(catalog: Catalog) {
        let plain = TranslateOptions::new();
        let with_default = TranslateOptions::new().with_default_value("fallback");

        assert_that!(text(&catalog, "missing.key", &plain), none());
        assert_that!(text(&catalog, "missing.key", &with_default), some(eq("fallback")));
    }

    #[rstest]
    fn unknown_locale_acts_as_empty_tree(catalog: Catalog) {
        let options = TranslateOptions::new();
        let result =
            lookup(catalog.translations(), &KeyLayout::default(), &"foo.bar".into(), &options, "xx");

        assert_that!(result, none());
    }

    #[rstest]
    fn lookup_is_repeatable(catalog: Catalog) {
        let options = TranslateOptions::new();

        assert_that!(text(&catalog, "foo.bar", &options), eq(text(&catalog, "foo.bar", &options)));
    }

    #[rstest]
    fn custom_layout_normalizes_segments() {
        let layout = KeyLayout { separator: "/".to_string(), namespace: "app".to_string() };

        let normalized = layout.normalize(&ScopePath::from(["a", "b"]), Some("p"));

        assert_that!(normalized.original, elements_are![eq("p"), eq("a"), eq("b")]);
        assert_that!(normalized.rooted, elements_are![eq("app"), eq("p"), eq("a"), eq("b")]);
    }
}
