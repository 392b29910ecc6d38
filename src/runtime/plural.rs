//! CLDR-style plural rules.
//!
//! A rule maps a magnitude to the ordered list of categories worth trying.
//! Rules are pure functions: the same count always yields the same categories.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Grammatical plural category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PluralCategory {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

/// Every category, in CLDR order.
pub const PLURAL_CATEGORIES: &[PluralCategory] = &[
    PluralCategory::Zero,
    PluralCategory::One,
    PluralCategory::Two,
    PluralCategory::Few,
    PluralCategory::Many,
    PluralCategory::Other,
];

impl PluralCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::One => "one",
            Self::Two => "two",
            Self::Few => "few",
            Self::Many => "many",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for PluralCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown plural category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for PluralCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PLURAL_CATEGORIES
            .iter()
            .copied()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Maps a non-negative count to the categories to try, most specific first.
pub type PluralRule = fn(f64) -> &'static [PluralCategory];

/// Rule used by locales without a registered rule.
///
/// `0` prefers an explicit `zero` entry and otherwise reads as `other`.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn default_rule(n: f64) -> &'static [PluralCategory] {
    if n == 0.0 {
        &[PluralCategory::Zero, PluralCategory::Other]
    } else if n == 1.0 {
        &[PluralCategory::One]
    } else {
        &[PluralCategory::Other]
    }
}

/// East Slavic rule. Fractions never land in `few`.
#[must_use]
#[allow(clippy::float_arithmetic, clippy::float_cmp)]
pub fn russian_rule(n: f64) -> &'static [PluralCategory] {
    let r10 = n % 10.0;
    let r100 = n % 100.0;

    if r10 == 1.0 && r100 != 11.0 {
        &[PluralCategory::One]
    } else if (2.0..=4.0).contains(&r10) && !(12.0..=14.0).contains(&r100) && n == n.floor() {
        &[PluralCategory::Few]
    } else {
        &[PluralCategory::Other]
    }
}

/// Locales registered with [`russian_rule`] out of the box.
const RUSSIAN_RULE_LOCALES: &[&str] = &["ru", "uk", "be", "sr", "hr", "bs"];

/// Per-locale plural rule registry.
#[derive(Debug, Clone)]
pub struct PluralRules {
    rules: HashMap<String, PluralRule>,
}

impl Default for PluralRules {
    fn default() -> Self {
        let mut rules = Self::empty();
        for locale in RUSSIAN_RULE_LOCALES {
            rules.register(*locale, russian_rule);
        }
        rules
    }
}

impl PluralRules {
    /// Registry with no locale rules; every locale uses [`default_rule`].
    #[must_use]
    pub fn empty() -> Self {
        Self { rules: HashMap::new() }
    }

    pub fn register(&mut self, locale: impl Into<String>, rule: PluralRule) {
        self.rules.insert(normalize_locale(&locale.into()), rule);
    }

    /// Rule for `locale`, trying the full tag before the primary language subtag.
    #[must_use]
    pub fn rule_for(&self, locale: &str) -> PluralRule {
        let normalized = normalize_locale(locale);
        if let Some(rule) = self.rules.get(&normalized) {
            return *rule;
        }

        let primary = normalized.split('_').next().unwrap_or(&normalized);
        self.rules.get(primary).copied().unwrap_or(default_rule)
    }

    /// Candidate categories for `count` in `locale`. The sign of `count` is ignored.
    #[must_use]
    pub fn categories(&self, locale: &str, count: f64) -> &'static [PluralCategory] {
        (self.rule_for(locale))(count.abs())
    }

    /// The most specific category for `count` in `locale`.
    #[must_use]
    pub fn category(&self, locale: &str, count: f64) -> PluralCategory {
        self.categories(locale, count).first().copied().unwrap_or(PluralCategory::Other)
    }
}

/// Lowercases and replaces `-` with `_` so `ru-RU` and `ru_ru` share a rule.
fn normalize_locale(locale: &str) -> String {
    locale.to_lowercase().replace('-', "_")
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[fixture]
    fn rules() -> PluralRules {
        PluralRules::default()
    }

    #[rstest]
    #[case::one(1.0, PluralCategory::One)]
    #[case::few(2.0, PluralCategory::Few)]
    #[case::few_upper(4.0, PluralCategory::Few)]
    #[case::other(5.0, PluralCategory::Other)]
    #[case::eleven(11.0, PluralCategory::Other)]
    #[case::twelve(12.0, PluralCategory::Other)]
    #[case::fourteen(14.0, PluralCategory::Other)]
    #[case::twenty_one(21.0, PluralCategory::One)]
    #[case::twenty_two(22.0, PluralCategory::Few)]
    #[case::hundred_eleven(111.0, PluralCategory::Other)]
    #[case::zero(0.0, PluralCategory::Other)]
    #[case::fraction(2.5, PluralCategory::Other)]
    #[case::negative(-21.0, PluralCategory::One)]
    fn russian_categories(rules: PluralRules, #[case] count: f64, #[case] expected: PluralCategory) {
        assert_that!(rules.category("ru", count), eq(expected));
    }

    #[rstest]
    #[case::zero(0.0, &[PluralCategory::Zero, PluralCategory::Other])]
    #[case::one(1.0, &[PluralCategory::One])]
    #[case::many(7.0, &[PluralCategory::Other])]
    #[case::fraction(1.5, &[PluralCategory::Other])]
    fn default_rule_candidates(
        rules: PluralRules,
        #[case] count: f64,
        #[case] expected: &[PluralCategory],
    ) {
        assert_that!(rules.categories("en", count), eq(expected));
    }

    #[rstest]
    #[case("ru-RU")]
    #[case("ru_RU")]
    #[case("RU")]
    fn region_subtags_share_primary_rule(rules: PluralRules, #[case] locale: &str) {
        assert_that!(rules.category(locale, 3.0), eq(PluralCategory::Few));
    }

    #[rstest]
    fn unregistered_locale_uses_default_rule(rules: PluralRules) {
        assert_that!(rules.category("xx", 3.0), eq(PluralCategory::Other));
        assert_that!(rules.category("xx", 1.0), eq(PluralCategory::One));
    }

    #[rstest]
    fn registered_rule_overrides_default() {
        fn always_many(_: f64) -> &'static [PluralCategory] {
            &[PluralCategory::Many]
        }

        let mut rules = PluralRules::empty();
        rules.register("pl", always_many);

        assert_that!(rules.category("pl", 1.0), eq(PluralCategory::Many));
        assert_that!(rules.category("ru", 3.0), eq(PluralCategory::Other));
    }

    #[rstest]
    fn category_round_trips_through_str() {
        for category in PLURAL_CATEGORIES {
            assert_that!(category.as_str().parse::<PluralCategory>(), ok(eq(category)));
        }
        assert_that!("several".parse::<PluralCategory>(), err(anything()));
    }
}
