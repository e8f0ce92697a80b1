//! Data-access contract the engine resolves against

use async_trait::async_trait;

use fitment_core::{ConfigurationOption, PartsBatch, VehicleDescriptor, VehicleInquiry};

use crate::error::CatalogResult;

/// Query operations the fitment engine needs from the catalog backend
///
/// The engine operates exclusively through this trait; connection pooling,
/// schemas, and caching are the implementor's concern. An empty
/// `brand_scope` means unscoped: the query matches any brand.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Distinct years with any fitment data in scope
    async fn years_for(&self, brand_scope: &[i64]) -> CatalogResult<Vec<i32>>;

    /// Distinct makes for a year
    async fn makes_for(&self, year: i32, brand_scope: &[i64]) -> CatalogResult<Vec<String>>;

    /// Distinct models for a year and make
    async fn models_for(&self, year: i32, make: &str) -> CatalogResult<Vec<String>>;

    /// Distinct submodels for the resolved base vehicle
    async fn submodels_for(&self, descriptor: &VehicleDescriptor) -> CatalogResult<Vec<String>>;

    /// Legal configuration options for the resolved submodel, including
    /// dimensions the descriptor may already have pinned
    async fn configurations_for(
        &self,
        descriptor: &VehicleDescriptor,
    ) -> CatalogResult<Vec<ConfigurationOption>>;

    /// One page of parts fitting the descriptor; `count` 0 means the data
    /// layer's default page size
    async fn parts_for(
        &self,
        descriptor: &VehicleDescriptor,
        page: usize,
        count: usize,
        brand_scope: &[i64],
    ) -> CatalogResult<PartsBatch>;

    /// Persist a customer fitment inquiry
    async fn push_inquiry(&self, inquiry: &VehicleInquiry) -> CatalogResult<()>;
}
