//! # Axum Helpers
//!
//! Shared building blocks for the HTTP services in this workspace.
//!
//! ## Modules
//!
//! - **[`envelope`]**: the `{success, data, message, error}` response envelope
//! - **[`errors`]**: [`AppError`] and its rendering as a failure envelope
//! - **[`extractors`]**: [`ValidatedJson`]
//! - **[`http`]**: CORS and security header middleware
//! - **[`server`]**: router assembly, health checks, graceful shutdown
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::{cors_layer_for, create_production_app, create_router};
//!
//! let cors = cors_layer_for(&config.server, &config.environment)?;
//! let router = create_router::<ApiDoc>(Router::new(), cors);
//! create_production_app(router, &config.server, async {}).await?;
//! ```

pub mod envelope;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use envelope::{ApiResponse, ErrorResponse};

pub use errors::{AppError, ErrorCode, validation_message};

pub use extractors::ValidatedJson;

pub use http::{cors_layer_for, create_cors_layer, create_permissive_cors_layer, security_headers};

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks, shutdown_signal,
};
