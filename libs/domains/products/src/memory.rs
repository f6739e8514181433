//! Process-local product store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductDraft, ProductId, StoreBackend, StoreStatus};
use crate::repository::ProductRepository;

const DEMO_CATALOG: [(&str, f64, &str, &str); 3] = [
    (
        "Dashboard Pro",
        1_499_000.0,
        "Advanced analytics dashboard with real-time data visualization and custom reporting.",
        "Analytics",
    ),
    (
        "Security Suite",
        2_199_000.0,
        "Comprehensive security solution with advanced threat detection and prevention.",
        "Security",
    ),
    (
        "Mobile App Builder",
        1_199_000.0,
        "No-code platform to build beautiful mobile applications for iOS and Android.",
        "Development",
    ),
];

#[derive(Default)]
struct MemoryState {
    products: BTreeMap<i64, Product>,
    last_id: i64,
}

impl MemoryState {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

/// In-memory repository with sequential integer ids starting at 1.
///
/// Clones share the same state. Data lives until the last clone is dropped.
#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    state: Arc<RwLock<MemoryState>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-filled with the demo catalog
    pub fn seeded() -> Self {
        let now = Utc::now();
        let mut state = MemoryState::default();

        for (name, price, description, category) in DEMO_CATALOG {
            let id = state.next_id();
            state.products.insert(
                id,
                Product {
                    id: ProductId::Int(id),
                    name: name.to_string(),
                    price,
                    description: description.to_string(),
                    category: category.to_string(),
                    created_at: now,
                    updated_at: None,
                },
            );
        }

        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }
}

/// Only integer ids can exist in this store.
fn key(id: &ProductId) -> ProductResult<i64> {
    match id {
        ProductId::Int(n) => Ok(*n),
        ProductId::Text(_) => Err(ProductError::NotFound(id.clone())),
    }
}

fn build(id: i64, draft: ProductDraft, created_at: DateTime<Utc>) -> Product {
    Product {
        id: ProductId::Int(id),
        name: draft.name().to_string(),
        price: draft.price(),
        description: draft.description().to_string(),
        category: draft.category().to_string(),
        created_at,
        updated_at: None,
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list(&self) -> ProductResult<Vec<Product>> {
        let state = self.state.read().await;
        let mut products: Vec<Product> = state.products.values().cloned().collect();
        products.sort_by(Product::newest_first);
        Ok(products)
    }

    async fn get(&self, id: &ProductId) -> ProductResult<Product> {
        let key = key(id)?;
        let state = self.state.read().await;
        state
            .products
            .get(&key)
            .cloned()
            .ok_or_else(|| ProductError::NotFound(id.clone()))
    }

    async fn create(&self, draft: ProductDraft) -> ProductResult<Product> {
        let mut state = self.state.write().await;
        let id = state.next_id();
        let product = build(id, draft, Utc::now());
        state.products.insert(id, product.clone());
        debug!(product_id = id, "Stored product in memory");
        Ok(product)
    }

    async fn update(&self, id: &ProductId, draft: ProductDraft) -> ProductResult<Product> {
        let key = key(id)?;
        let mut state = self.state.write().await;
        let existing = state
            .products
            .get_mut(&key)
            .ok_or_else(|| ProductError::NotFound(id.clone()))?;

        let mut updated = build(key, draft, existing.created_at);
        updated.updated_at = Some(Utc::now());
        *existing = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: &ProductId) -> ProductResult<Product> {
        let key = key(id)?;
        let mut state = self.state.write().await;
        state
            .products
            .remove(&key)
            .ok_or_else(|| ProductError::NotFound(id.clone()))
    }

    async fn status(&self) -> ProductResult<StoreStatus> {
        Ok(StoreStatus {
            backend: StoreBackend::Memory,
            connected: true,
            server_time: Some(Utc::now().to_rfc3339()),
            server_version: None,
            products_table_exists: None,
        })
    }
}
