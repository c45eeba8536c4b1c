//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (tracing, request ID, panics, timeouts, body limits)
//! - Guard the product routes with the API key gate
//! - Bind the server to a listener and drain it on shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::Request,
    middleware,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::catalog::{sample_products, ProductStore};
use crate::config::ApiConfig;
use crate::http::auth::require_api_key;
use crate::http::error::{panic_response, timeout_as_json};
use crate::http::handlers;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ProductStore>,
    pub config: Arc<ApiConfig>,
}

/// HTTP server for the product API.
pub struct ApiServer {
    router: Router,
    state: AppState,
}

/// Wrap routes in the server's middleware stack and attach state.
///
/// Layers run outermost first: request id, trace, panic catcher, JSON timeout
/// rewrite, timeout, body limit, API key gate. The gate wraps the fallback too,
/// so unmatched `/products/...` paths still answer 401 without a key.
#[allow(deprecated)]
pub fn with_middleware(routes: Router<AppState>, state: AppState) -> Router {
    let config = state.config.clone();

    routes
        .layer(middleware::from_fn_with_state(state.clone(), require_api_key))
        .layer(DefaultBodyLimit::max(config.security.max_body_size))
        .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
        .layer(middleware::map_response(timeout_as_json))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    let request_id = request
                        .headers()
                        .get("x-request-id")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("unknown");
                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id,
                    )
                }))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(CatchPanicLayer::custom(panic_response)),
        )
}

impl ApiServer {
    /// Create a server with a fresh store, seeded if the config asks for it.
    pub fn new(config: ApiConfig) -> Self {
        let store = if config.seed.enabled {
            ProductStore::with_products(sample_products())
        } else {
            ProductStore::new()
        };
        Self::with_store(config, Arc::new(store))
    }

    /// Create a server around an existing store.
    pub fn with_store(config: ApiConfig, store: Arc<ProductStore>) -> Self {
        let state = AppState {
            store,
            config: Arc::new(config),
        };
        let router = Self::build_router(state.clone());
        Self { router, state }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        let routes = Router::new()
            .route("/", get(handlers::welcome))
            .route(
                "/products",
                get(handlers::list_products).post(handlers::create_product),
            )
            // Static segments outrank `{id}` in the matcher regardless of order.
            .route("/products/stats", get(handlers::product_stats))
            .route(
                "/products/{id}",
                get(handlers::get_product)
                    .put(handlers::update_product)
                    .delete(handlers::delete_product),
            )
            .fallback(handlers::route_not_found);

        with_middleware(routes, state)
    }

    /// The assembled router, for serving or in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Shared store behind this server.
    pub fn store(&self) -> Arc<ProductStore> {
        self.state.store.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ApiConfig {
        &self.state.config
    }

    /// Run the server until the shutdown channel fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            products = self.state.store.len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
