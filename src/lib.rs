//! Product catalog HTTP API library.

pub mod catalog;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use catalog::{Product, ProductStore};
pub use config::schema::ApiConfig;
pub use http::ApiServer;
pub use lifecycle::Shutdown;
