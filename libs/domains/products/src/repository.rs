use async_trait::async_trait;
use std::sync::Arc;

use crate::error::ProductResult;
use crate::models::{Product, ProductDraft, ProductId, StoreStatus};

/// Repository trait for Product persistence
///
/// Implemented by the in-memory, SQL-over-HTTP and hosted table backends.
/// Writes only accept a [`ProductDraft`], so values reaching a backend are
/// already validated.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products, newest first
    async fn list(&self) -> ProductResult<Vec<Product>>;

    /// `NotFound` when no product has this id
    async fn get(&self, id: &ProductId) -> ProductResult<Product>;

    /// Persist a new product; the store assigns id and creation time
    async fn create(&self, draft: ProductDraft) -> ProductResult<Product>;

    /// Replace every mutable field and stamp the update time.
    /// `NotFound` when absent; never creates.
    async fn update(&self, id: &ProductId, draft: ProductDraft) -> ProductResult<Product>;

    /// Remove permanently and return the removed product
    async fn delete(&self, id: &ProductId) -> ProductResult<Product>;

    /// Connectivity diagnostics
    async fn status(&self) -> ProductResult<StoreStatus>;
}

/// Lets a backend chosen at runtime stand in wherever a concrete repository is expected.
#[async_trait]
impl ProductRepository for Arc<dyn ProductRepository> {
    async fn list(&self) -> ProductResult<Vec<Product>> {
        (**self).list().await
    }

    async fn get(&self, id: &ProductId) -> ProductResult<Product> {
        (**self).get(id).await
    }

    async fn create(&self, draft: ProductDraft) -> ProductResult<Product> {
        (**self).create(draft).await
    }

    async fn update(&self, id: &ProductId, draft: ProductDraft) -> ProductResult<Product> {
        (**self).update(id, draft).await
    }

    async fn delete(&self, id: &ProductId) -> ProductResult<Product> {
        (**self).delete(id).await
    }

    async fn status(&self) -> ProductResult<StoreStatus> {
        (**self).status().await
    }
}
