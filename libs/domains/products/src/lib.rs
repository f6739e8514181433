//! Products Domain
//!
//! Product catalog CRUD over three interchangeable stores: in-memory,
//! Postgres over SQL-over-HTTP, and a hosted PostgREST table.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, JSON envelope
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Input → ProductDraft, stats
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Trait + memory / sql_http / rest_table
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{build_repository, handlers, ProductService, StoreConfig};
//!
//! let repository = build_repository(&StoreConfig::default());
//! let service = ProductService::new(repository);
//! let router = handlers::router(service);
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod repository;
pub mod rest_table;
mod row;
pub mod service;
pub mod sql_http;

// Re-export commonly used types
pub use config::{build_repository, SqlHttpConfig, StoreConfig, TableApiConfig};
pub use error::{ProductError, ProductResult};
pub use handlers::{ApiDoc, StoreApiDoc};
pub use memory::InMemoryProductRepository;
pub use models::{
    Product, ProductDraft, ProductId, ProductInput, ProductStats, StoreBackend, StoreStatus,
    DEFAULT_CATEGORY,
};
pub use repository::ProductRepository;
pub use rest_table::RestTableProductRepository;
pub use service::ProductService;
pub use sql_http::SqlHttpProductRepository;
