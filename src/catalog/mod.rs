//! Product catalog subsystem.
//!
//! # Data Flow
//! ```text
//! Create / update body
//!     → validation.rs (required fields, types)
//!     → product.rs (NewProduct / ProductPatch)
//!     → store.rs (insert / in-place update)
//!
//! List request
//!     → query.rs (normalize page/limit, filter, search)
//!     → store.rs (run against a read-locked snapshot)
//!     → ProductPage
//! ```
//!
//! # Design Decisions
//! - The store is the only owner of product data; callers get clones
//! - Insertion order is the only ordering and pagination relies on it
//! - Handlers never see the lock

pub mod product;
pub mod query;
pub mod store;
pub mod validation;

pub use product::{sample_products, NewProduct, Product, ProductPatch};
pub use query::{ListParams, ListQuery, ProductPage};
pub use store::{ProductStore, StoreError};
pub use validation::{ProductPayload, ProductValidationError};
