//! Lenient decoding of upstream rows into [`Product`].
//!
//! SQL-over-HTTP in raw text mode returns every column as a string, while
//! PostgREST returns native JSON types. Both shapes are accepted.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::{Map, Value};

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductId, DEFAULT_CATEGORY};

pub(crate) type Row = Map<String, Value>;

fn decode_err(column: &str, value: &Value) -> ProductError {
    ProductError::Decode(format!("Unexpected value for column '{}': {}", column, value))
}

fn required<'a>(row: &'a Row, column: &str) -> ProductResult<&'a Value> {
    match row.get(column) {
        Some(Value::Null) | None => Err(ProductError::Decode(format!(
            "Missing column '{}' in upstream row",
            column
        ))),
        Some(value) => Ok(value),
    }
}

fn id(value: &Value) -> ProductResult<ProductId> {
    match value {
        Value::Number(n) => n.as_i64().map(ProductId::Int).ok_or_else(|| decode_err("id", value)),
        Value::String(s) => s.parse().map_err(|_| decode_err("id", value)),
        _ => Err(decode_err("id", value)),
    }
}

fn price(value: &Value) -> ProductResult<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| decode_err("price", value))
}

fn text(row: &Row, column: &str, default: &str) -> String {
    match row.get(column) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => default.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Accepts RFC 3339 and the Postgres text forms of `timestamptz` / `timestamp`.
pub(crate) fn timestamp(column: &str, value: &Value) -> ProductResult<DateTime<Utc>> {
    let Value::String(s) = value else {
        return Err(decode_err(column, value));
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }

    Err(decode_err(column, value))
}

/// Postgres booleans arrive as `true`/`false` or `t`/`f` in text mode.
pub(crate) fn boolean(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.as_str() {
            "t" | "true" => Some(true),
            "f" | "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

pub(crate) fn product(row: &Row) -> ProductResult<Product> {
    let updated_at = match row.get("updated_at") {
        Some(Value::Null) | None => None,
        Some(value) => Some(timestamp("updated_at", value)?),
    };

    Ok(Product {
        id: id(required(row, "id")?)?,
        name: text(row, "name", ""),
        price: price(required(row, "price")?)?,
        description: text(row, "description", ""),
        category: text(row, "category", DEFAULT_CATEGORY),
        created_at: timestamp("created_at", required(row, "created_at")?)?,
        updated_at,
    })
}

pub(crate) fn products(rows: &[Row]) -> ProductResult<Vec<Product>> {
    rows.iter().map(product).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_raw_text_row() {
        let product = product(&row(json!({
            "id": "12",
            "name": "Dashboard Pro",
            "price": "1499000.00",
            "description": null,
            "category": null,
            "created_at": "2024-03-01 09:15:00.123456+00",
            "updated_at": null
        })))
        .unwrap();

        assert_eq!(product.id, ProductId::Int(12));
        assert_eq!(product.price, 1_499_000.0);
        assert_eq!(product.description, "");
        assert_eq!(product.category, DEFAULT_CATEGORY);
        assert_eq!(product.created_at.to_rfc3339(), "2024-03-01T09:15:00.123456+00:00");
        assert!(product.updated_at.is_none());
    }

    #[test]
    fn test_native_json_row() {
        let product = product(&row(json!({
            "id": "3f2a9c1e-uuid",
            "name": "Widget",
            "price": 100,
            "description": "d",
            "category": "Tools",
            "created_at": "2024-03-01T09:15:00+00:00",
            "updated_at": "2024-03-02T09:15:00.5+02:00"
        })))
        .unwrap();

        assert_eq!(product.id, ProductId::Text("3f2a9c1e-uuid".into()));
        assert_eq!(product.price, 100.0);
        assert_eq!(
            product.updated_at.unwrap().to_rfc3339(),
            "2024-03-02T07:15:00.500+00:00"
        );
    }

    #[test]
    fn test_timestamp_without_zone_is_utc() {
        let ts = timestamp("created_at", &json!("2024-03-01 09:15:00")).unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-03-01T09:15:00+00:00");
    }

    #[test]
    fn test_bad_price_is_decode_error() {
        let err = product(&row(json!({
            "id": 1,
            "name": "Widget",
            "price": "abc",
            "created_at": "2024-03-01T09:15:00Z"
        })))
        .unwrap_err();
        assert!(matches!(err, ProductError::Decode(_)));
    }

    #[test]
    fn test_missing_created_at_is_decode_error() {
        let err = product(&row(json!({"id": 1, "name": "W", "price": 1}))).unwrap_err();
        assert_eq!(err.to_string(), "Missing column 'created_at' in upstream row");
    }

    #[test]
    fn test_boolean_forms() {
        assert_eq!(boolean(&json!("t")), Some(true));
        assert_eq!(boolean(&json!(false)), Some(false));
        assert_eq!(boolean(&json!("maybe")), None);
    }
}
