//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → auth.rs (x-api-key gate on /products*)
//!     → handlers.rs (validate, call catalog)
//!     → error.rs (failures rendered as {"error": ...})
//!     → Send to client
//! ```

pub mod auth;
pub mod error;
pub mod handlers;
pub mod server;

pub use error::{ApiError, ApiResult, ErrorBody};
pub use server::{with_middleware, ApiServer, AppState};
