//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers, auth gate, store mutations:
//!     → tracing events with structured fields
//! Every request:
//!     → request-id layer (x-request-id)
//!     → TraceLayer span (method, uri, request_id, status, latency)
//! Subscriber (logging.rs):
//!     → stdout, pretty or JSON
//! ```

pub mod logging;

pub use logging::init_logging;
