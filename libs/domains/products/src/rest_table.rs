//! Hosted table reached through its PostgREST API (`{base}/rest/v1/products`).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{header, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::config::TableApiConfig;
use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductDraft, ProductId, StoreBackend, StoreStatus};
use crate::repository::ProductRepository;
use crate::row::{self, Row};

const RETURN_REPRESENTATION: &str = "return=representation";

#[derive(Serialize)]
struct TableUpdate<'a> {
    #[serde(flatten)]
    draft: &'a ProductDraft,
    updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct PostgrestError {
    message: String,
}

#[derive(Debug, Clone)]
enum Connection {
    Ready { products_url: String, api_key: String },
    Unavailable(String),
}

impl Connection {
    fn from_config(config: &TableApiConfig) -> Self {
        match (&config.url, &config.api_key) {
            (Some(url), Some(api_key)) => Connection::Ready {
                products_url: format!("{}/rest/v1/products", url.trim_end_matches('/')),
                api_key: api_key.clone(),
            },
            (None, _) => {
                Connection::Unavailable("TABLE_API_URL environment variable is not set".to_string())
            }
            (_, None) => {
                Connection::Unavailable("TABLE_API_KEY environment variable is not set".to_string())
            }
        }
    }
}

/// Product store backed by a hosted `products` table.
///
/// Missing URL or key does not prevent construction; every call then fails
/// with [`ProductError::Configuration`].
#[derive(Clone)]
pub struct RestTableProductRepository {
    client: reqwest::Client,
    connection: Connection,
}

fn eq_filter(id: &ProductId) -> (&'static str, String) {
    ("id", format!("eq.{}", id))
}

impl RestTableProductRepository {
    pub fn new(config: &TableApiConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: &TableApiConfig) -> Self {
        let connection = Connection::from_config(config);
        if let Connection::Unavailable(reason) = &connection {
            warn!("Hosted table store is not usable: {}", reason);
        }
        Self { client, connection }
    }

    /// Starts an authenticated request against the products table
    fn request(&self, method: reqwest::Method) -> ProductResult<RequestBuilder> {
        match &self.connection {
            Connection::Ready {
                products_url,
                api_key,
            } => Ok(self
                .client
                .request(method, products_url)
                .header("apikey", api_key)
                .bearer_auth(api_key)),
            Connection::Unavailable(reason) => Err(ProductError::Configuration(reason.clone())),
        }
    }

    async fn send(&self, request: RequestBuilder) -> ProductResult<Response> {
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Hosted table request failed");
            let message = serde_json::from_str::<PostgrestError>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(ProductError::Transport(format!(
                "Table API returned {}: {}",
                status, message
            )));
        }

        Ok(response)
    }

    async fn rows(&self, request: RequestBuilder) -> ProductResult<Vec<Row>> {
        Ok(self.send(request).await?.json().await?)
    }

    async fn single(&self, id: &ProductId, request: RequestBuilder) -> ProductResult<Product> {
        let rows = self.rows(request).await?;
        match rows.first() {
            Some(first) => row::product(first),
            None => Err(ProductError::NotFound(id.clone())),
        }
    }
}

#[async_trait]
impl ProductRepository for RestTableProductRepository {
    #[instrument(skip(self))]
    async fn list(&self) -> ProductResult<Vec<Product>> {
        let request = self
            .request(reqwest::Method::GET)?
            .query(&[("select", "*"), ("order", "created_at.desc")]);
        let mut products = row::products(&self.rows(request).await?)?;
        products.sort_by(Product::newest_first);
        Ok(products)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: &ProductId) -> ProductResult<Product> {
        let request = self
            .request(reqwest::Method::GET)?
            .query(&[("select", "*".to_string()), eq_filter(id)]);
        self.single(id, request).await
    }

    #[instrument(skip(self, draft))]
    async fn create(&self, draft: ProductDraft) -> ProductResult<Product> {
        let request = self
            .request(reqwest::Method::POST)?
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&draft);
        let rows = self.rows(request).await?;
        let first = rows.first().ok_or_else(|| {
            ProductError::Decode("Table API returned no representation for insert".to_string())
        })?;
        row::product(first)
    }

    #[instrument(skip(self, draft))]
    async fn update(&self, id: &ProductId, draft: ProductDraft) -> ProductResult<Product> {
        let body = TableUpdate {
            draft: &draft,
            updated_at: Utc::now(),
        };
        let request = self
            .request(reqwest::Method::PATCH)?
            .query(&[eq_filter(id)])
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&body);
        self.single(id, request).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &ProductId) -> ProductResult<Product> {
        let request = self
            .request(reqwest::Method::DELETE)?
            .query(&[eq_filter(id)])
            .header("Prefer", RETURN_REPRESENTATION);
        self.single(id, request).await
    }

    #[instrument(skip(self))]
    async fn status(&self) -> ProductResult<StoreStatus> {
        let request = self
            .request(reqwest::Method::GET)?
            .query(&[("select", "id"), ("limit", "1")]);
        let response = self.send(request).await?;

        let server_time = response
            .headers()
            .get(header::DATE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let server_version = response
            .headers()
            .get(header::SERVER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        Ok(StoreStatus {
            backend: StoreBackend::Table,
            connected: true,
            server_time,
            server_version,
            products_table_exists: Some(true),
        })
    }
}
