use axum::Router;
use axum_helpers::{cors_layer_for, create_router, health_router};

use crate::state::AppState;

pub mod health;
pub mod products;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/products", products::router(state))
        .nest("/store", products::store_router(state))
}

/// Creates a router with the /ready endpoint that probes the product store.
pub fn ready_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}

/// Full application: docs, `/api` routes, middleware, `/health` and `/ready`.
///
/// # Errors
/// Fails when the configured CORS origins are missing (production) or invalid.
pub fn app(state: &AppState) -> std::io::Result<Router> {
    let cors = cors_layer_for(&state.config.server, &state.config.environment)?;
    let router = create_router::<crate::openapi::ApiDoc>(routes(state), cors);

    Ok(router
        .merge(health_router(state.config.app))
        .merge(ready_router(state.clone())))
}
