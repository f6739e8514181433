use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use strum::{Display, EnumString};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{ProductError, ProductResult};

/// Category applied when a write omits one
pub const DEFAULT_CATEGORY: &str = "General";

/// Product identifier.
///
/// The in-memory store issues integers; remote tables may use either
/// integer or text primary keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ProductId {
    Int(i64),
    Text(String),
}

impl From<&str> for ProductId {
    /// All-digit segments become [`ProductId::Int`], anything else is kept as text.
    fn from(s: &str) -> Self {
        let is_digits = !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        match s.parse::<i64>() {
            Ok(n) if is_digits => ProductId::Int(n),
            _ => ProductId::Text(s.to_string()),
        }
    }
}

impl FromStr for ProductId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ProductId::from(s))
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        ProductId::Int(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Int(n) => write!(f, "{}", n),
            ProductId::Text(s) => f.write_str(s),
        }
    }
}

/// Product entity as returned by every backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[schema(example = 1499000.0)]
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[schema(example = "General")]
    pub category: String,
    pub created_at: DateTime<Utc>,
    /// Set by the first update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Ordering used by every `list`: creation time descending, then id descending
    pub fn newest_first(a: &Product, b: &Product) -> std::cmp::Ordering {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    }
}

/// Request body for create and update.
///
/// Update is a full replacement: omitted optional fields fall back to their
/// defaults rather than keeping the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProductInput {
    #[validate(
        required(message = "Name and price are required"),
        length(min = 1, message = "Name must not be empty")
    )]
    #[schema(example = "Widget")]
    pub name: Option<String>,
    /// Must be a JSON number; numeric strings are rejected
    #[validate(
        required(message = "Name and price are required"),
        range(exclusive_min = 0.0, message = "Price must be a positive number")
    )]
    #[schema(example = 100.0)]
    pub price: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// A validated product write.
///
/// Every store write takes a draft, and [`ProductDraft::new`] is the only
/// way to build one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDraft {
    name: String,
    price: f64,
    description: String,
    category: String,
}

impl ProductDraft {
    pub fn new(
        name: impl Into<String>,
        price: f64,
        description: Option<String>,
        category: Option<String>,
    ) -> ProductResult<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ProductError::Validation("Name must not be empty".to_string()));
        }
        if !price.is_finite() || price <= 0.0 {
            return Err(ProductError::Validation(
                "Price must be a positive number".to_string(),
            ));
        }

        let category = category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

        Ok(Self {
            name,
            price,
            description: description.unwrap_or_default(),
            category,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &str {
        &self.category
    }
}

impl TryFrom<ProductInput> for ProductDraft {
    type Error = ProductError;

    fn try_from(input: ProductInput) -> ProductResult<Self> {
        match (input.name, input.price) {
            (Some(name), Some(price)) => {
                ProductDraft::new(name, price, input.description, input.category)
            }
            _ => Err(ProductError::Validation(
                "Name and price are required".to_string(),
            )),
        }
    }
}

/// Catalog summary shown on the admin screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductStats {
    pub total_products: usize,
    pub total_value: f64,
    /// 0 for an empty catalog
    pub average_price: f64,
    /// Distinct categories
    pub category_count: usize,
}

impl ProductStats {
    pub fn from_products(products: &[Product]) -> Self {
        let total_products = products.len();
        let total_value: f64 = products.iter().map(|p| p.price).sum();
        let average_price = if total_products == 0 {
            0.0
        } else {
            total_value / total_products as f64
        };
        let category_count = products
            .iter()
            .map(|p| p.category.as_str())
            .collect::<HashSet<_>>()
            .len();

        Self {
            total_products,
            total_value,
            average_price,
            category_count,
        }
    }
}

/// Storage backend selected with `PRODUCT_STORE`
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StoreBackend {
    /// Process-local store, lost on restart
    #[default]
    Memory,
    /// Postgres reached through its SQL-over-HTTP endpoint
    Sql,
    /// Hosted table behind a PostgREST API
    Table,
}

/// Connectivity diagnostics reported by a backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreStatus {
    pub backend: StoreBackend,
    pub connected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products_table_exists: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_id_from_path_segment() {
        assert_eq!("42".parse::<ProductId>().unwrap(), ProductId::Int(42));
        assert_eq!(
            "9f1c-ab".parse::<ProductId>().unwrap(),
            ProductId::Text("9f1c-ab".to_string())
        );
        assert_eq!(
            "-1".parse::<ProductId>().unwrap(),
            ProductId::Text("-1".to_string())
        );
        // Too large for i64
        assert_eq!(
            "99999999999999999999".parse::<ProductId>().unwrap(),
            ProductId::Text("99999999999999999999".to_string())
        );
    }

    #[test]
    fn test_product_id_serializes_untagged() {
        assert_eq!(serde_json::to_value(ProductId::Int(3)).unwrap(), json!(3));
        assert_eq!(
            serde_json::to_value(ProductId::Text("a1".into())).unwrap(),
            json!("a1")
        );
    }

    #[test]
    fn test_draft_applies_defaults() {
        let draft = ProductDraft::new("  Widget ", 100.0, None, None).unwrap();
        assert_eq!(draft.name(), "Widget");
        assert_eq!(draft.description(), "");
        assert_eq!(draft.category(), DEFAULT_CATEGORY);

        let draft = ProductDraft::new("Widget", 1.0, None, Some("  ".into())).unwrap();
        assert_eq!(draft.category(), DEFAULT_CATEGORY);
    }

    #[test]
    fn test_draft_rejects_invalid_values() {
        for price in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let err = ProductDraft::new("Widget", price, None, None).unwrap_err();
            assert_eq!(err.to_string(), "Price must be a positive number");
        }

        let err = ProductDraft::new("   ", 10.0, None, None).unwrap_err();
        assert_eq!(err.to_string(), "Name must not be empty");
    }

    #[test]
    fn test_draft_from_input_requires_name_and_price() {
        let input = ProductInput {
            name: Some("Widget".into()),
            ..Default::default()
        };
        let err = ProductDraft::try_from(input).unwrap_err();
        assert_eq!(err.to_string(), "Name and price are required");
    }

    #[test]
    fn test_input_validation_messages() {
        let input = ProductInput {
            name: Some(String::new()),
            price: Some(-1.0),
            ..Default::default()
        };
        let errors = input.validate().unwrap_err();
        assert_eq!(
            axum_helpers::validation_message(&errors),
            "Name must not be empty; Price must be a positive number"
        );
    }

    #[test]
    fn test_product_serializes_camel_case() {
        let created_at = DateTime::parse_from_rfc3339("2024-05-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let product = Product {
            id: ProductId::Int(1),
            name: "Widget".into(),
            price: 100.0,
            description: String::new(),
            category: DEFAULT_CATEGORY.into(),
            created_at,
            updated_at: None,
        };

        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["createdAt"], "2024-05-01T10:00:00Z");
        assert!(value.get("updatedAt").is_none());
    }

    #[test]
    fn test_stats_for_catalog() {
        let now = Utc::now();
        let make = |id: i64, price: f64, category: &str| Product {
            id: ProductId::Int(id),
            name: format!("p{}", id),
            price,
            description: String::new(),
            category: category.into(),
            created_at: now,
            updated_at: None,
        };
        let stats = ProductStats::from_products(&[
            make(1, 100.0, "Analytics"),
            make(2, 300.0, "Analytics"),
            make(3, 200.0, "Security"),
        ]);

        assert_eq!(stats.total_products, 3);
        assert_eq!(stats.total_value, 600.0);
        assert_eq!(stats.average_price, 200.0);
        assert_eq!(stats.category_count, 2);

        let empty = ProductStats::from_products(&[]);
        assert_eq!(empty.average_price, 0.0);
        assert_eq!(empty.category_count, 0);
    }

    #[test]
    fn test_store_backend_parses_case_insensitively() {
        assert_eq!("SQL".parse::<StoreBackend>().unwrap(), StoreBackend::Sql);
        assert_eq!("table".parse::<StoreBackend>().unwrap(), StoreBackend::Table);
        assert!("mongo".parse::<StoreBackend>().is_err());
        assert_eq!(StoreBackend::Memory.to_string(), "memory");
    }
}
