//! HTTP middleware: CORS configuration and security headers.
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::http::{cors_layer_for, security_headers};
//!
//! let cors = cors_layer_for(&server_config, &environment)?;
//! let app = Router::new()
//!     .layer(axum::middleware::from_fn(security_headers))
//!     .layer(cors);
//! ```

pub mod cors;
pub mod security;

pub use cors::{cors_layer_for, create_cors_layer, create_permissive_cors_layer};
pub use security::security_headers;
