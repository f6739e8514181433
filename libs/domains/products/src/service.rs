//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::{info, instrument};

use crate::error::ProductResult;
use crate::models::{Product, ProductDraft, ProductId, ProductInput, ProductStats, StoreStatus};
use crate::repository::ProductRepository;

/// Product service providing business logic operations
///
/// Turns request input into a [`ProductDraft`] before any store call, so a
/// rejected write never touches the backend.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.list().await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: &ProductId) -> ProductResult<Product> {
        self.repository.get(id).await
    }

    #[instrument(skip(self, input), fields(product_name = ?input.name))]
    pub async fn create_product(&self, input: ProductInput) -> ProductResult<Product> {
        let draft = ProductDraft::try_from(input)?;
        let product = self.repository.create(draft).await?;
        info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    /// Full replacement; omitted optional fields return to their defaults.
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: &ProductId, input: ProductInput) -> ProductResult<Product> {
        let draft = ProductDraft::try_from(input)?;
        self.repository.update(id, draft).await
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &ProductId) -> ProductResult<Product> {
        let product = self.repository.delete(id).await?;
        info!(product_id = %product.id, "Product deleted");
        Ok(product)
    }

    /// Aggregates computed from one `list` call
    #[instrument(skip(self))]
    pub async fn product_stats(&self) -> ProductResult<ProductStats> {
        let products = self.repository.list().await?;
        Ok(ProductStats::from_products(&products))
    }

    #[instrument(skip(self))]
    pub async fn store_status(&self) -> ProductResult<StoreStatus> {
        self.repository.status().await
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
