//! Shared application state.

use domain_products::ProductRepository;
use std::sync::Arc;

/// Cloned into every router; clones share the same store instance.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// Backend selected by `PRODUCT_STORE`
    pub store: Arc<dyn ProductRepository>,
}
