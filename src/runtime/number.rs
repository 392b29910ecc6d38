//! Number formatting helpers driven by the `number.*` translations.

use super::lookup::LookupValue;
use super::translate::{
    Translate,
    Translator,
};
use crate::types::{
    LocaleContext,
    ScopePath,
    TranslateOptions,
};

/// Storage unit keys under `number.human.storage_units.units`, by power of 1024.
const STORAGE_UNITS: [&str; 5] = ["byte", "kb", "mb", "gb", "tb"];

/// Placement of the number (`%n`) and unit (`%u`) in a human size.
const HUMAN_SIZE_FORMAT: &str = "%n %u";

/// Precision, delimiter and separator used by [`NumberFormat::format`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberFormat {
    /// Digits after the separator.
    pub precision: usize,
    /// Thousands delimiter.
    pub delimiter: String,
    /// Decimal separator.
    pub separator: String,
    /// Drop trailing fractional zeros, and the separator when nothing is left.
    pub strip_insignificant_zeros: bool,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            precision: 3,
            delimiter: ",".to_string(),
            separator: ".".to_string(),
            strip_insignificant_zeros: false,
        }
    }
}

impl NumberFormat {
    /// Defaults overridden by `number.format.{precision,delimiter,separator}` of the context locale.
    #[must_use]
    pub fn for_locale(translator: &Translator, ctx: &LocaleContext) -> Self {
        let options = TranslateOptions::new();
        let setting = |name: &str| {
            translator
                .lookup(&ScopePath::from(["number", "format", name]), &options, ctx)
                .and_then(LookupValue::as_text)
                .map(str::to_string)
        };

        let defaults = Self::default();
        Self {
            precision: setting("precision")
                .and_then(|precision| precision.parse().ok())
                .unwrap_or(defaults.precision),
            delimiter: setting("delimiter").unwrap_or(defaults.delimiter),
            separator: setting("separator").unwrap_or(defaults.separator),
            strip_insignificant_zeros: defaults.strip_insignificant_zeros,
        }
    }

    #[must_use]
    pub const fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    #[must_use]
    pub const fn stripping_insignificant_zeros(mut self) -> Self {
        self.strip_insignificant_zeros = true;
        self
    }

    /// Formats `number`, e.g. `1234.5` as `1,234.500`.
    #[must_use]
    pub fn format(&self, number: f64) -> String {
        if !number.is_finite() {
            return crate::types::format_number(number);
        }

        let fixed = format!("{:.*}", self.precision, number.abs());
        let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

        let mut formatted = group_thousands(integer, &self.delimiter);
        if self.precision > 0 {
            formatted.push_str(&self.separator);
            formatted.push_str(fraction);

            if self.strip_insignificant_zeros {
                formatted.truncate(formatted.trim_end_matches('0').len());
                if formatted.ends_with(self.separator.as_str()) {
                    formatted.truncate(formatted.len() - self.separator.len());
                }
            }
        }

        if number.is_sign_negative() && formatted.chars().any(|c| c.is_ascii_digit() && c != '0') {
            formatted.insert(0, '-');
        }
        formatted
    }
}

/// Inserts `delimiter` between groups of three digits, counted from the right.
fn group_thousands(digits: &str, delimiter: &str) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let groups: Vec<String> =
        chars.rchunks(3).rev().map(|group| group.iter().collect::<String>()).collect();
    groups.join(delimiter)
}

impl Translator {
    /// Formats `number` with the locale's `number.format` settings.
    #[must_use]
    pub fn to_number(&self, number: f64, ctx: &LocaleContext) -> String {
        NumberFormat::for_locale(self, ctx).format(number)
    }

    /// Formats a byte count with the largest unit up to terabytes, e.g. `1.5 KB`.
    #[must_use]
    #[allow(clippy::float_arithmetic, clippy::float_cmp)]
    pub fn to_human_size(&self, bytes: f64, ctx: &LocaleContext) -> String {
        let kilobyte = 1024.0;
        let mut size = bytes;
        let mut power = 0;
        while size >= kilobyte && power < STORAGE_UNITS.len() - 1 {
            size /= kilobyte;
            power += 1;
        }

        let unit_key = STORAGE_UNITS.get(power).copied().unwrap_or("byte");
        let unit_scope = ScopePath::from(["number", "human", "storage_units", "units", unit_key]);
        let (unit, precision) = if power == 0 {
            let options = TranslateOptions::new().with_count(size);
            (self.translate(&unit_scope, &options, ctx), 0)
        } else {
            let precision = if size.fract() == 0.0 { 0 } else { 1 };
            (self.translate(&unit_scope, &TranslateOptions::new(), ctx), precision)
        };

        let number = NumberFormat::for_locale(self, ctx)
            .with_precision(precision)
            .with_delimiter("")
            .format(size);
        HUMAN_SIZE_FORMAT.replace("%u", &unit).replace("%n", &number)
    }
}
