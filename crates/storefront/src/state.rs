//! Application state shared across handlers.

use std::sync::Arc;

use leaf_and_co_core::{Catalog, CatalogError};

use crate::config::StorefrontConfig;
use crate::middleware::SessionLocks;

/// Error loading the catalog at startup.
#[derive(Debug, thiserror::Error)]
pub enum CatalogLoadError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The catalog is read-only for
/// the life of the process; per-visitor state lives in the session, guarded
/// by the per-session locks.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    session_locks: SessionLocks,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                session_locks: SessionLocks::new(),
            }),
        }
    }

    /// Create application state, loading the catalog named by the config.
    ///
    /// Falls back to the built-in catalog when no catalog path is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog file cannot be read or is invalid.
    pub fn from_config(config: StorefrontConfig) -> Result<Self, CatalogLoadError> {
        let catalog = match &config.catalog_path {
            Some(path) => {
                let json = std::fs::read_to_string(path)?;
                let catalog = Catalog::from_json(&json)?;
                tracing::info!(
                    path = %path.display(),
                    products = catalog.products().len(),
                    "Loaded catalog file"
                );
                catalog
            }
            None => Catalog::builtin(),
        };

        Ok(Self::new(config, catalog))
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get the per-session request locks.
    #[must_use]
    pub fn session_locks(&self) -> &SessionLocks {
        &self.inner.session_locks
    }
}
