//! Shared utilities for integration testing.

use product_api::config::ApiConfig;
use product_api::lifecycle::{self, RunningServer};
use reqwest::{Client, RequestBuilder};

pub const API_KEY: &str = "test-key";

/// A running server on an ephemeral port plus a client aimed at it.
pub struct TestApp {
    pub server: RunningServer,
    pub client: Client,
    pub base_url: String,
}

#[allow(dead_code)]
impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Request with the valid API key attached.
    pub fn authed(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, self.url(path))
            .header("x-api-key", API_KEY)
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.authed(reqwest::Method::GET, path)
    }

    pub fn post(&self, path: &str) -> RequestBuilder {
        self.authed(reqwest::Method::POST, path)
    }

    pub fn put(&self, path: &str) -> RequestBuilder {
        self.authed(reqwest::Method::PUT, path)
    }

    pub fn delete(&self, path: &str) -> RequestBuilder {
        self.authed(reqwest::Method::DELETE, path)
    }

    pub fn product_count(&self) -> usize {
        self.server.store().len()
    }
}

/// Config bound to 127.0.0.1:0 with the test key.
pub fn test_config() -> ApiConfig {
    let mut config = ApiConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.auth.api_key = API_KEY.into();
    config
}

/// Start the API with seed data.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(test_config()).await
}

/// Start the API with a custom config.
pub async fn spawn_app_with(config: ApiConfig) -> TestApp {
    let server = lifecycle::start(config).await.expect("server failed to start");
    let base_url = format!("http://{}", server.local_addr());
    let client = Client::builder().no_proxy().build().unwrap();

    TestApp {
        server,
        client,
        base_url,
    }
}
