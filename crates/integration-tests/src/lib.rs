//! Black-box integration tests for the delivery server.
//!
//! # Running Tests
//!
//! ```bash
//! # Start PostgreSQL, run migrations and start the server
//! cargo run -p delivery-cli -- migrate
//! cargo run -p delivery-server
//!
//! # Run the ignored integration tests
//! cargo test -p delivery-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `fee_quote` - `POST /v1/consulta-endereco` against a running server
//! - `sellers` - seller CRUD round trips against a running server
//! - `viacep_live` - the ViaCEP client against the public API
//!
//! # Environment Variables
//!
//! - `DELIVERY_BASE_URL` - server under test (default: `http://localhost:8080`)

use reqwest::Client;

/// Shared handles for one test.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
}

impl TestContext {
    /// Build a context pointing at `DELIVERY_BASE_URL`.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built.
    #[must_use]
    pub fn new() -> Self {
        let base_url = std::env::var("DELIVERY_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8080".to_string());
        let client = Client::builder()
            .build()
            .expect("Failed to create HTTP client");
        Self { client, base_url }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A random 14-digit CNPJ so repeated runs do not collide.
#[must_use]
pub fn unique_cnpj() -> String {
    let digits: String = uuid::Uuid::new_v4()
        .as_u128()
        .to_string()
        .chars()
        .take(14)
        .collect();
    format!("{digits:0>14}")
}

/// A random email address so repeated runs do not collide.
#[must_use]
pub fn unique_email() -> String {
    format!("seller-{}@example.com", uuid::Uuid::new_v4().simple())
}
