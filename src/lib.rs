pub mod config;
pub mod currency;
pub mod db;
pub mod errors;
pub mod models;
pub mod routes;
pub mod seed;
pub mod store;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::store::DataStore;

/// Shared application state passed to all Axum handlers.
///
/// The store is selected once at startup (live Postgres or in-memory seed
/// data) and injected here, so handlers never inspect the environment.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DataStore>,
    pub config: config::AppConfig,
    invoice_list_version: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(store: Arc<dyn DataStore>, config: config::AppConfig) -> Self {
        Self {
            store,
            config,
            invoice_list_version: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Mark cached invoice list views stale and return the new version.
    ///
    /// Stand-in for the rendering layer's cache revalidation: every invoice
    /// mutation bumps this counter, whether or not a write was persisted.
    pub fn invalidate_invoice_list(&self) -> u64 {
        self.invoice_list_version.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn invoice_list_version(&self) -> u64 {
        self.invoice_list_version.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed::SeedStore;

    #[test]
    fn invalidation_bumps_version() {
        let state = AppState::new(Arc::new(SeedStore::new()), config::AppConfig::default());
        assert_eq!(state.invoice_list_version(), 0);
        assert_eq!(state.invalidate_invoice_list(), 1);
        assert_eq!(state.invalidate_invoice_list(), 2);
        assert_eq!(state.invoice_list_version(), 2);
    }
}
