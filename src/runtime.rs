//! Translation runtime: lookup, plural rules, interpolation and the translate orchestrator.
/// Placeholder substitution
pub mod interpolate;
/// Scope normalization and tree walk
pub mod lookup;
/// Number formatting helpers
pub mod number;
/// Plural categories and per-locale rules
pub mod plural;
/// Translate orchestrator
pub mod translate;
/// Verbose localization decorator
pub mod verbose;

pub use interpolate::{
    InterpolationError,
    interpolate,
};
pub use lookup::{
    KeyLayout,
    LookupValue,
};
pub use number::NumberFormat;
pub use plural::{
    PluralCategory,
    PluralRule,
    PluralRules,
};
pub use translate::{
    I18n,
    Translate,
    Translation,
    Translator,
};
pub use verbose::VerboseLocalization;
