//! Debugging decorator that numbers every translated key.

use std::collections::HashMap;
use std::sync::{
    Mutex,
    PoisonError,
};

use super::translate::Translate;
use crate::types::{
    LocaleContext,
    ScopePath,
    TranslateOptions,
};

/// Wraps a translator so every result ends in ` (#N)`, where `N` numbers the key.
///
/// Fallbacks are disabled, so a key missing from the current locale shows up as a marker.
/// The first call for a key logs `Translation #N: <key>` at info level.
#[derive(Debug)]
pub struct VerboseLocalization<T> {
    inner: T,
    /// Joins segment scopes into the logged and numbered key.
    separator: String,
    /// Key to sequence number, assigned on first sight.
    seen: Mutex<HashMap<String, usize>>,
}

impl<T: Translate> VerboseLocalization<T> {
    /// Decorator keying scopes with the `.` separator.
    #[must_use]
    pub fn new(inner: T) -> Self {
        Self { inner, separator: ".".to_string(), seen: Mutex::new(HashMap::new()) }
    }

    /// Keys scopes with `separator`, matching the inner translator's `keySeparator`.
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    #[must_use]
    pub const fn inner(&self) -> &T {
        &self.inner
    }

    /// Sequence number of `key`, assigning and logging the next one on first sight.
    fn number(&self, key: &str, options: &TranslateOptions) -> usize {
        let mut seen = self.seen.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(number) = seen.get(key) {
            return *number;
        }

        let number = seen.len() + 1;
        seen.insert(key.to_string(), number);

        let values = options.interpolation_values();
        let parameters = if values.is_empty() { None } else { serde_json::to_string(&values).ok() };
        match parameters {
            Some(parameters) => {
                tracing::info!("Translation #{number}: {key}, parameters: {parameters}");
            }
            None => tracing::info!("Translation #{number}: {key}"),
        }
        number
    }
}

impl<T: Translate> Translate for VerboseLocalization<T> {
    fn translate(
        &self,
        scope: &ScopePath,
        options: &TranslateOptions,
        ctx: &LocaleContext,
    ) -> String {
        let ctx = ctx.clone().without_fallbacks();
        let key = scope.joined(&self.separator);
        let number = self.number(&key, options);

        format!("{} (#{number})", self.inner.translate(scope, options, &ctx))
    }
}
