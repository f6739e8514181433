//! Shared test utilities for domain testing
//!
//! This crate provides reusable test infrastructure for all domain crates:
//! - `MockUpstream`: scripted HTTP server standing in for remote stores
//! - `TestDataBuilder`: Deterministic test data generation
//! - `assertions`: Custom assertion helpers
//!
//! # Usage
//!
//! ```rust,no_run
//! use serde_json::json;
//! use test_utils::{MockUpstream, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_remote_store_test() {
//!     let upstream = MockUpstream::start().await;
//!     upstream.respond_json(200, json!([]));
//!
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!     let name = builder.name("product", "main");
//! }
//! ```

mod upstream;

pub use upstream::{MockUpstream, RecordedRequest};

/// Builder for test data with deterministic randomization
///
/// This ensures tests are reproducible by using seeded data.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_product");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Generate a unique name for testing
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(12345);
    /// assert_eq!(builder.name("product", "main"), "test-product-12345-main");
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// A positive price with two decimals, stable for a given seed
    pub fn price(&self) -> f64 {
        let cents = self.seed % 1_000_000 + 1;
        cents as f64 / 100.0
    }
}

/// Test assertion helpers
pub mod assertions {
    use serde_json::Value;

    /// Assert the `success`/`message` pair of a JSON response envelope
    pub fn assert_envelope(body: &Value, success: bool, message: &str) {
        assert_eq!(
            body["success"],
            Value::Bool(success),
            "unexpected success flag in {}",
            body
        );
        assert_eq!(
            body["message"].as_str(),
            Some(message),
            "unexpected message in {}",
            body
        );
    }
}
