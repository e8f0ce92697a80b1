//! Authenticated query context supplied by the outer layers

use serde::{Deserialize, Serialize};

/// Read-only request context produced by the auth/brand-resolution layer
///
/// Shared by every component of one request; nothing in the engine mutates
/// it. An empty `brand_scope` means the caller is unscoped and queries
/// match any brand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryContext {
    pub brand_scope: Vec<i64>,
    pub customer_key: String,
    pub page: usize,
    /// Requested page size; 0 defers to the data layer's default
    pub count: usize,
}

impl QueryContext {
    pub fn new(brand_scope: Vec<i64>, customer_key: impl Into<String>) -> Self {
        Self {
            brand_scope,
            customer_key: customer_key.into(),
            page: 0,
            count: 0,
        }
    }

    /// Context for a caller with no brand restriction
    pub fn unscoped() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: usize, count: usize) -> Self {
        self.page = page;
        self.count = count;
        self
    }

    pub fn is_unscoped(&self) -> bool {
        self.brand_scope.is_empty()
    }
}
