//! In-memory product store.
//!
//! # Responsibilities
//! - Own the authoritative, insertion-ordered product collection
//! - Provide list/find/insert/update/delete primitives
//! - Run queries and aggregations against a consistent snapshot
//!
//! # Design Decisions
//! - A single `RwLock<Vec<_>>`: reads share, every mutation is exclusive
//! - Ids are minted under the write lock so uniqueness is checked atomically
//! - A poisoned lock is recovered; each mutation is a single step so the
//!   collection is never left half-written

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;
use uuid::Uuid;

use crate::catalog::product::{NewProduct, Product, ProductPatch};
use crate::catalog::query::{ListQuery, ProductPage};

/// Errors raised by store mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("product id '{0}' already exists")]
    DuplicateId(String),
}

/// Thread-safe owner of the product collection.
#[derive(Debug, Default)]
pub struct ProductStore {
    products: RwLock<Vec<Product>>,
}

impl ProductStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given products, in order.
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: RwLock::new(products),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Product>> {
        self.products.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Product>> {
        self.products.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of every product in insertion order.
    pub fn list(&self) -> Vec<Product> {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn find_by_id(&self, id: &str) -> Option<Product> {
        self.read().iter().find(|p| p.id == id).cloned()
    }

    /// Append a product whose id the caller chose.
    pub fn insert(&self, product: Product) -> Result<Product, StoreError> {
        let mut products = self.write();
        if products.iter().any(|p| p.id == product.id) {
            return Err(StoreError::DuplicateId(product.id));
        }
        products.push(product.clone());
        Ok(product)
    }

    /// Mint a fresh id and append the product.
    pub fn create(&self, new: NewProduct) -> Product {
        let mut products = self.write();
        let id = loop {
            let candidate = Uuid::new_v4().to_string();
            if !products.iter().any(|p| p.id == candidate) {
                break candidate;
            }
        };
        let product = new.with_id(id);
        products.push(product.clone());
        product
    }

    /// Apply a patch in place. Returns the updated record, or `None` if absent.
    pub fn update(&self, id: &str, patch: ProductPatch) -> Option<Product> {
        let mut products = self.write();
        let product = products.iter_mut().find(|p| p.id == id)?;
        product.apply(patch);
        Some(product.clone())
    }

    /// Remove a product. Returns whether one was removed.
    pub fn delete(&self, id: &str) -> bool {
        let mut products = self.write();
        match products.iter().position(|p| p.id == id) {
            Some(index) => {
                products.remove(index);
                true
            }
            None => false,
        }
    }

    /// Run a list query under a single read lock.
    pub fn query(&self, query: &ListQuery) -> ProductPage {
        query.apply(&self.read())
    }

    /// Number of products per category. Uncategorized products are not counted.
    pub fn category_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for category in self.read().iter().filter_map(|p| p.category.as_ref()) {
            *counts.entry(category.clone()).or_insert(0) += 1;
        }
        counts
    }
}
