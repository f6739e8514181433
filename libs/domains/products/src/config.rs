//! Store selection and backend connection settings.

use core_config::database::DatabaseConfig;
use core_config::{env_bool, env_optional, env_or_default, ConfigError, FromEnv};
use std::sync::Arc;
use tracing::info;

use crate::memory::InMemoryProductRepository;
use crate::models::StoreBackend;
use crate::repository::ProductRepository;
use crate::rest_table::RestTableProductRepository;
use crate::sql_http::SqlHttpProductRepository;

/// SQL-over-HTTP settings: `DATABASE_URL` plus an optional `SQL_HTTP_ENDPOINT`
#[derive(Clone, Debug, Default)]
pub struct SqlHttpConfig {
    pub database: DatabaseConfig,
    /// Overrides the endpoint derived from the connection string's host
    pub endpoint: Option<String>,
}

impl FromEnv for SqlHttpConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database: DatabaseConfig::from_env()?,
            endpoint: env_optional("SQL_HTTP_ENDPOINT"),
        })
    }
}

/// Hosted table settings: `TABLE_API_URL` and `TABLE_API_KEY`
#[derive(Clone, Default)]
pub struct TableApiConfig {
    pub url: Option<String>,
    pub api_key: Option<String>,
}

impl std::fmt::Debug for TableApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableApiConfig")
            .field("url", &self.url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .finish()
    }
}

impl FromEnv for TableApiConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env_optional("TABLE_API_URL"),
            api_key: env_optional("TABLE_API_KEY"),
        })
    }
}

#[derive(Clone, Debug)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Only used by the in-memory backend
    pub seed_demo_products: bool,
    pub sql: SqlHttpConfig,
    pub table: TableApiConfig,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            seed_demo_products: true,
            sql: SqlHttpConfig::default(),
            table: TableApiConfig::default(),
        }
    }
}

impl FromEnv for StoreConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let raw = env_or_default("PRODUCT_STORE", &StoreBackend::Memory.to_string());
        let backend = raw
            .trim()
            .parse::<StoreBackend>()
            .map_err(|_| ConfigError::ParseError {
                key: "PRODUCT_STORE".to_string(),
                details: format!("expected one of memory, sql, table; got '{}'", raw),
            })?;

        Ok(Self {
            backend,
            seed_demo_products: env_bool("SEED_DEMO_PRODUCTS", true)?,
            sql: SqlHttpConfig::from_env()?,
            table: TableApiConfig::from_env()?,
        })
    }
}

/// Builds the configured backend behind a shared trait object.
pub fn build_repository(config: &StoreConfig) -> Arc<dyn ProductRepository> {
    info!(backend = %config.backend, "Initializing product store");

    match config.backend {
        StoreBackend::Memory if config.seed_demo_products => {
            Arc::new(InMemoryProductRepository::seeded())
        }
        StoreBackend::Memory => Arc::new(InMemoryProductRepository::new()),
        StoreBackend::Sql => Arc::new(SqlHttpProductRepository::new(&config.sql)),
        StoreBackend::Table => Arc::new(RestTableProductRepository::new(&config.table)),
    }
}
