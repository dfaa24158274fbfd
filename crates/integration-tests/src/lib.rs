//! Integration tests for Leaf & Co.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p leaf-and-co-integration-tests
//! ```
//!
//! Each test starts its own storefront on an ephemeral port with the built-in
//! catalog and an in-memory session store, so no external services are needed.

use std::net::SocketAddr;

use leaf_and_co_core::Catalog;
use leaf_and_co_storefront::config::StorefrontConfig;
use leaf_and_co_storefront::state::AppState;
use reqwest::{Client, Response, redirect::Policy};
use tokio::net::TcpListener;

/// A storefront running in the background plus a cookie-keeping client.
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
}

impl TestServer {
    /// Start a storefront with the built-in catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot bind or the client cannot be
    /// built.
    pub async fn start() -> Result<Self, Box<dyn std::error::Error>> {
        Self::with_catalog(Catalog::builtin()).await
    }

    /// Start a storefront serving the given catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot bind or the client cannot be
    /// built.
    pub async fn with_catalog(catalog: Catalog) -> Result<Self, Box<dyn std::error::Error>> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let app = leaf_and_co_storefront::app(AppState::new(StorefrontConfig::default(), catalog));
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        // Redirects are asserted on, not followed.
        let client = Client::builder()
            .cookie_store(true)
            .redirect(Policy::none())
            .build()?;

        Ok(Self { addr, client })
    }

    /// Absolute URL for a path on this server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// GET a path.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get(&self, path: &str) -> reqwest::Result<Response> {
        self.client.get(self.url(path)).send().await
    }

    /// POST a form to a path.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn post(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Result<Response> {
        self.client.post(self.url(path)).form(form).send().await
    }

    /// Render the current page as text.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn page(&self) -> reqwest::Result<String> {
        self.get("/").await?.text().await
    }

    /// Switch the active view (`products` or `cart`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn navigate(&self, to: &str) -> reqwest::Result<Response> {
        self.post("/navigate", &[("to", to)]).await
    }

    /// Post a cart control (`add`, `increment`, `decrement`, `remove`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn cart(&self, op: &str, product_id: &str) -> reqwest::Result<Response> {
        self.post(&format!("/cart/{op}"), &[("product_id", product_id)])
            .await
    }
}
