//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the store and router from a validated configuration
//! - Bind the listener and begin accepting traffic
//! - Hand back a handle that can stop the server
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The listener is bound last (traffic only when ready)

use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::catalog::ProductStore;
use crate::config::ApiConfig;
use crate::http::ApiServer;
use crate::lifecycle::shutdown::Shutdown;

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// A server accepting connections in a background task.
pub struct RunningServer {
    local_addr: SocketAddr,
    store: Arc<ProductStore>,
    shutdown: Shutdown,
    handle: JoinHandle<Result<(), std::io::Error>>,
}

impl RunningServer {
    /// Address actually bound (resolves port 0).
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Store backing the running server.
    pub fn store(&self) -> Arc<ProductStore> {
        self.store.clone()
    }

    /// Coordinator that stops this server when triggered.
    pub fn shutdown_handle(&self) -> Shutdown {
        self.shutdown.clone()
    }

    /// Wait for the server task to finish.
    pub async fn wait(self) -> Result<(), std::io::Error> {
        match self.handle.await {
            Ok(result) => result,
            Err(e) => Err(std::io::Error::new(std::io::ErrorKind::Other, e)),
        }
    }

    /// Trigger shutdown and wait for in-flight requests to drain.
    pub async fn stop(self) -> Result<(), std::io::Error> {
        self.shutdown.trigger();
        self.wait().await
    }
}

/// Bind the configured address and serve in the background.
pub async fn start(config: ApiConfig) -> Result<RunningServer, StartupError> {
    let address = config.listener.bind_address.clone();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind {
            address: address.clone(),
            source,
        })?;
    let local_addr = listener.local_addr().map_err(|source| StartupError::Bind {
        address: address.clone(),
        source,
    })?;

    let server = ApiServer::new(config);
    let store = server.store();
    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();

    let handle = tokio::spawn(async move { server.run(listener, receiver).await });

    tracing::info!(address = %local_addr, "Listening for connections");

    Ok(RunningServer {
        local_addr,
        store,
        shutdown,
        handle,
    })
}
