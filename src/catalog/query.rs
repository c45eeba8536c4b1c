//! Filtering, search and pagination over a product snapshot.
//!
//! # Responsibilities
//! - Exact, case-sensitive category filter
//! - Case-insensitive substring search on the name
//! - Page/limit slicing with totals computed before slicing
//!
//! # Design Decisions
//! - `page` and `limit` are parsed like a lenient integer parse: leading
//!   digits count, anything unparseable or zero falls back to the default
//! - Negative values clamp to 1; `limit` is only capped when configured
//! - A repeated query key keeps its first value
//! - Out-of-range pages yield an empty slice, never an error

use serde::{Deserialize, Serialize};

use crate::catalog::product::Product;
use crate::config::PaginationConfig;

/// Raw query string parameters for `GET /products`.
///
/// Kept as strings so malformed numbers fall back to defaults instead of
/// failing extraction.
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub category: Option<String>,
    pub search: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListParams {
    /// Collect decoded key/value pairs. Unknown keys are ignored and the first
    /// occurrence of a repeated key wins.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "category" => &mut params.category,
                "search" => &mut params.search,
                "page" => &mut params.page,
                "limit" => &mut params.limit,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }
}

/// A normalized list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    pub page: u64,
    pub limit: u64,
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    /// Size of the filtered set before slicing.
    pub total: usize,
    pub page: u64,
    pub limit: u64,
    pub products: Vec<Product>,
}

impl ListQuery {
    pub fn from_params(params: ListParams, pagination: &PaginationConfig) -> Self {
        let page = effective_number(params.page.as_deref(), pagination.default_page);
        let mut limit = effective_number(params.limit.as_deref(), pagination.default_limit);
        if let Some(max_limit) = pagination.max_limit {
            limit = limit.min(max_limit);
        }

        Self {
            category: params.category.filter(|c| !c.is_empty()),
            search: params.search.filter(|s| !s.is_empty()).map(|s| s.to_lowercase()),
            page,
            limit,
        }
    }

    fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category {
            if product.category.as_deref() != Some(category.as_str()) {
                return false;
            }
        }
        if let Some(search) = &self.search {
            if !product.name.to_lowercase().contains(search.as_str()) {
                return false;
            }
        }
        true
    }

    /// Run the query over products in insertion order.
    pub fn apply(&self, products: &[Product]) -> ProductPage {
        let filtered: Vec<&Product> = products.iter().filter(|p| self.matches(p)).collect();

        let start = to_usize(self.page.saturating_sub(1).saturating_mul(self.limit));
        let limit = to_usize(self.limit);

        let page = filtered
            .iter()
            .skip(start)
            .take(limit)
            .map(|p| (*p).clone())
            .collect();

        ProductPage {
            total: filtered.len(),
            page: self.page,
            limit: self.limit,
            products: page,
        }
    }
}

fn to_usize(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

fn effective_number(raw: Option<&str>, default: u64) -> u64 {
    match raw.and_then(parse_leading_int) {
        None | Some(0) => default,
        Some(n) if n < 0 => 1,
        Some(n) => n.unsigned_abs(),
    }
}

/// Parse an optional sign followed by leading decimal digits, ignoring the rest.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let magnitude: i64 = rest[..digits_len].parse().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}
