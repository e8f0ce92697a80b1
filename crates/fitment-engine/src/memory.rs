//! In-memory catalog backend for tests and development
//!
//! Seedable fitment data plus failure and latency injection, so suites can
//! exercise every engine path without a database.

use std::collections::{BTreeSet, HashSet};
use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;

use fitment_core::{
    ConfigurationOption, ConfigurationPair, Part, PartsBatch, VehicleDescriptor, VehicleInquiry,
};

use crate::error::{CatalogError, CatalogResult};
use crate::source::CatalogSource;

/// Catalog operations that can be told to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogOp {
    Years,
    Makes,
    Models,
    Submodels,
    Configurations,
    Parts,
    Inquiry,
}

impl CatalogOp {
    fn as_str(&self) -> &'static str {
        match self {
            CatalogOp::Years => "years",
            CatalogOp::Makes => "makes",
            CatalogOp::Models => "models",
            CatalogOp::Submodels => "submodels",
            CatalogOp::Configurations => "configurations",
            CatalogOp::Parts => "parts",
            CatalogOp::Inquiry => "inquiry",
        }
    }
}

#[derive(Debug, Clone)]
struct VehicleRow {
    brand_id: i64,
    year: i32,
    make: String,
    model: String,
    submodel: String,
    configurations: Vec<ConfigurationPair>,
}

#[derive(Debug, Clone)]
struct PartRow {
    brand_id: i64,
    year: i32,
    make: String,
    model: String,
    part: Part,
}

/// Seedable in-memory [`CatalogSource`]
#[derive(Default)]
pub struct MemoryCatalog {
    vehicles: RwLock<Vec<VehicleRow>>,
    parts: RwLock<Vec<PartRow>>,
    inquiries: RwLock<Vec<VehicleInquiry>>,
    failures: RwLock<HashSet<CatalogOp>>,
    parts_delay: RwLock<Option<Duration>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed one vehicle row with no open configuration dimensions
    pub fn add_vehicle(
        &self,
        brand_id: i64,
        year: i32,
        make: impl Into<String>,
        model: impl Into<String>,
        submodel: impl Into<String>,
    ) {
        self.add_vehicle_with_configurations(brand_id, year, make, model, submodel, vec![]);
    }

    /// Seed one vehicle row along with its legal configuration pairs
    pub fn add_vehicle_with_configurations(
        &self,
        brand_id: i64,
        year: i32,
        make: impl Into<String>,
        model: impl Into<String>,
        submodel: impl Into<String>,
        configurations: Vec<ConfigurationPair>,
    ) {
        self.vehicles
            .write()
            .expect("catalog lock poisoned")
            .push(VehicleRow {
                brand_id,
                year,
                make: make.into(),
                model: model.into(),
                submodel: submodel.into(),
                configurations,
            });
    }

    /// Seed one part as fitting a base vehicle
    pub fn add_part(
        &self,
        part: Part,
        brand_id: i64,
        year: i32,
        make: impl Into<String>,
        model: impl Into<String>,
    ) {
        self.parts
            .write()
            .expect("catalog lock poisoned")
            .push(PartRow {
                brand_id,
                year,
                make: make.into(),
                model: model.into(),
                part,
            });
    }

    /// Make every subsequent call to `op` fail
    pub fn fail_on(&self, op: CatalogOp) {
        self.failures
            .write()
            .expect("catalog lock poisoned")
            .insert(op);
    }

    /// Delay every subsequent parts query, for exercising the fetch ceiling
    pub fn delay_parts(&self, delay: Duration) {
        *self.parts_delay.write().expect("catalog lock poisoned") = Some(delay);
    }

    /// Inquiries pushed so far
    pub fn inquiries(&self) -> Vec<VehicleInquiry> {
        self.inquiries
            .read()
            .expect("catalog lock poisoned")
            .clone()
    }

    fn check(&self, op: CatalogOp) -> CatalogResult<()> {
        if self
            .failures
            .read()
            .expect("catalog lock poisoned")
            .contains(&op)
        {
            return Err(CatalogError::Query(format!(
                "injected {} failure",
                op.as_str()
            )));
        }
        Ok(())
    }
}

fn in_scope(brand_scope: &[i64], brand_id: i64) -> bool {
    brand_scope.is_empty() || brand_scope.contains(&brand_id)
}

fn matches_base(row_year: i32, row_make: &str, row_model: &str, d: &VehicleDescriptor) -> bool {
    row_year == d.year
        && row_make.eq_ignore_ascii_case(&d.make)
        && row_model.eq_ignore_ascii_case(&d.model)
}

#[async_trait]
impl CatalogSource for MemoryCatalog {
    async fn years_for(&self, brand_scope: &[i64]) -> CatalogResult<Vec<i32>> {
        self.check(CatalogOp::Years)?;
        let vehicles = self.vehicles.read().expect("catalog lock poisoned");
        let years: BTreeSet<i32> = vehicles
            .iter()
            .filter(|v| in_scope(brand_scope, v.brand_id))
            .map(|v| v.year)
            .collect();
        // newest first
        Ok(years.into_iter().rev().collect())
    }

    async fn makes_for(&self, year: i32, brand_scope: &[i64]) -> CatalogResult<Vec<String>> {
        self.check(CatalogOp::Makes)?;
        let vehicles = self.vehicles.read().expect("catalog lock poisoned");
        let makes: BTreeSet<String> = vehicles
            .iter()
            .filter(|v| v.year == year && in_scope(brand_scope, v.brand_id))
            .map(|v| v.make.clone())
            .collect();
        Ok(makes.into_iter().collect())
    }

    async fn models_for(&self, year: i32, make: &str) -> CatalogResult<Vec<String>> {
        self.check(CatalogOp::Models)?;
        let vehicles = self.vehicles.read().expect("catalog lock poisoned");
        let models: BTreeSet<String> = vehicles
            .iter()
            .filter(|v| v.year == year && v.make.eq_ignore_ascii_case(make))
            .map(|v| v.model.clone())
            .collect();
        Ok(models.into_iter().collect())
    }

    async fn submodels_for(&self, descriptor: &VehicleDescriptor) -> CatalogResult<Vec<String>> {
        self.check(CatalogOp::Submodels)?;
        let vehicles = self.vehicles.read().expect("catalog lock poisoned");
        let submodels: BTreeSet<String> = vehicles
            .iter()
            .filter(|v| matches_base(v.year, &v.make, &v.model, descriptor))
            .map(|v| v.submodel.clone())
            .collect();
        Ok(submodels.into_iter().collect())
    }

    async fn configurations_for(
        &self,
        descriptor: &VehicleDescriptor,
    ) -> CatalogResult<Vec<ConfigurationOption>> {
        self.check(CatalogOp::Configurations)?;
        let vehicles = self.vehicles.read().expect("catalog lock poisoned");

        let mut options: Vec<ConfigurationOption> = Vec::new();
        for row in vehicles.iter().filter(|v| {
            matches_base(v.year, &v.make, &v.model, descriptor)
                && v.submodel.eq_ignore_ascii_case(&descriptor.submodel)
        }) {
            for pair in &row.configurations {
                match options
                    .iter_mut()
                    .find(|o| o.key.eq_ignore_ascii_case(&pair.key))
                {
                    Some(option) => {
                        if !option.values.iter().any(|v| v == &pair.value) {
                            option.values.push(pair.value.clone());
                        }
                    }
                    None => options.push(ConfigurationOption::new(
                        pair.key.clone(),
                        vec![pair.value.clone()],
                    )),
                }
            }
        }
        Ok(options)
    }

    async fn parts_for(
        &self,
        descriptor: &VehicleDescriptor,
        page: usize,
        count: usize,
        brand_scope: &[i64],
    ) -> CatalogResult<PartsBatch> {
        self.check(CatalogOp::Parts)?;

        let delay = *self.parts_delay.read().expect("catalog lock poisoned");
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let parts = self.parts.read().expect("catalog lock poisoned");
        let matching: Vec<Part> = parts
            .iter()
            .filter(|p| {
                in_scope(brand_scope, p.brand_id)
                    && matches_base(p.year, &p.make, &p.model, descriptor)
            })
            .map(|p| p.part.clone())
            .collect();

        // page is 1-based; count 0 means no explicit limit
        let window: Vec<Part> = if count > 0 {
            matching
                .into_iter()
                .skip(page.saturating_sub(1) * count)
                .take(count)
                .collect()
        } else {
            matching
        };

        Ok(PartsBatch::new(window, brand_scope.to_vec(), page, count))
    }

    async fn push_inquiry(&self, inquiry: &VehicleInquiry) -> CatalogResult<()> {
        self.check(CatalogOp::Inquiry)?;
        self.inquiries
            .write()
            .expect("catalog lock poisoned")
            .push(inquiry.clone());
        Ok(())
    }
}
