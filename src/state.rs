use std::sync::Arc;

use crate::db::DocumentStore;

/// Process-wide state handed to every request handler.
///
/// The store is created once at startup and injected here instead of living
/// in an ambient global. `None` means no database was configured; the
/// diagnostic endpoint reports that, everything else surfaces it as a
/// backend error.
#[derive(Clone)]
pub struct AppState {
    pub store: Option<Arc<dyn DocumentStore>>,
}

impl AppState {
    #[must_use]
    pub fn new(store: Option<Arc<dyn DocumentStore>>) -> Self {
        Self { store }
    }
}
