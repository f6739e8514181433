use axum::Router;
use domain_products::{ProductService, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    handlers::router(ProductService::new(state.store.clone()))
}

/// `/status` probe for the configured backend
pub fn store_router(state: &crate::state::AppState) -> Router {
    handlers::store_router(ProductService::new(state.store.clone()))
}
