//! Process-wide catalog handle.
//!
//! The catalog is swapped whole: readers clone the current `Arc` and keep a consistent
//! snapshot for as long as they hold it.

use std::sync::{
    Arc,
    OnceLock,
    PoisonError,
    RwLock,
};

use crate::input::catalog::Catalog;

/// The installed catalog, empty until [`install`] is called.
static CATALOG: OnceLock<RwLock<Arc<Catalog>>> = OnceLock::new();

/// Lazily created lock around the installed catalog.
fn cell() -> &'static RwLock<Arc<Catalog>> {
    CATALOG.get_or_init(|| RwLock::new(Arc::new(Catalog::default())))
}

/// Replaces the process-wide catalog and returns the previous one.
pub fn install(catalog: Arc<Catalog>) -> Arc<Catalog> {
    let mut current = cell().write().unwrap_or_else(PoisonError::into_inner);
    tracing::debug!(locales = ?catalog.translations().locales(), "Installing catalog");
    std::mem::replace(&mut *current, catalog)
}

/// The catalog installed last, or an empty one.
#[must_use]
pub fn current() -> Arc<Catalog> {
    Arc::clone(&cell().read().unwrap_or_else(PoisonError::into_inner))
}
