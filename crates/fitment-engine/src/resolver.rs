//! Stage dispatch for progressive fitment lookup

use std::sync::Arc;
use std::time::Instant;

use fitment_core::{
    parse_descriptor, DisclosureStage, LookupConfig, LookupResult, QueryContext, QueryInput,
    VehicleDescriptor, VehicleInquiry,
};

use crate::error::{EngineError, Result};
use crate::fetcher::{spawn_parts_fetch, PartsFetch};
use crate::metrics;
use crate::response::LookupResponse;
use crate::source::CatalogSource;

/// Resolves partial vehicle descriptors against a catalog backend
///
/// One resolution is a single pass with no backtracking: derive the stage,
/// run that stage's lookup, and, once the descriptor is specific enough,
/// fetch matching parts concurrently under the configured ceiling. Every
/// entity involved lives for one request; the resolver itself holds only
/// the backend handle and config and is freely shared.
pub struct FitmentResolver {
    source: Arc<dyn CatalogSource>,
    config: LookupConfig,
}

impl FitmentResolver {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self::with_config(source, LookupConfig::default())
    }

    pub fn with_config(source: Arc<dyn CatalogSource>, config: LookupConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    /// Extract a descriptor from raw request data under this resolver's
    /// parser rules
    pub fn parse(&self, input: &QueryInput) -> VehicleDescriptor {
        parse_descriptor(input, &self.config.parser)
    }

    /// Resolve one lookup: stage-specific choices plus, when eligible,
    /// parts and facets
    ///
    /// Fails only on a stage lookup error; the parts fetch can never fail
    /// a resolution.
    pub async fn resolve(
        &self,
        descriptor: &VehicleDescriptor,
        ctx: &QueryContext,
    ) -> Result<LookupResponse> {
        let started = Instant::now();
        let stage = descriptor.stage();

        tracing::debug!(
            %stage,
            year = descriptor.year,
            make = %descriptor.make,
            model = %descriptor.model,
            submodel = %descriptor.submodel,
            configurations = descriptor.configurations.len(),
            "resolving fitment lookup"
        );

        let result = self.resolve_stage(descriptor, ctx, stage).await;

        let outcome = if result.is_ok() {
            metrics::OUTCOME_OK
        } else {
            metrics::OUTCOME_ERROR
        };
        metrics::record_resolve(stage.as_str(), outcome, started.elapsed());

        result
    }

    async fn resolve_stage(
        &self,
        descriptor: &VehicleDescriptor,
        ctx: &QueryContext,
        stage: DisclosureStage,
    ) -> Result<LookupResponse> {
        match stage {
            DisclosureStage::NeedYear => {
                let years = self
                    .source
                    .years_for(&ctx.brand_scope)
                    .await
                    .map_err(|e| EngineError::lookup(stage, e))?;
                Ok(LookupResponse::without_parts(
                    descriptor.clone(),
                    stage,
                    LookupResult::Years(years),
                    ctx,
                ))
            }
            DisclosureStage::NeedMake => {
                let makes = self
                    .source
                    .makes_for(descriptor.year, &ctx.brand_scope)
                    .await
                    .map_err(|e| EngineError::lookup(stage, e))?;
                Ok(LookupResponse::without_parts(
                    descriptor.clone(),
                    stage,
                    LookupResult::Makes(makes),
                    ctx,
                ))
            }
            DisclosureStage::NeedModel => {
                let models = self
                    .source
                    .models_for(descriptor.year, &descriptor.make)
                    .await
                    .map_err(|e| EngineError::lookup(stage, e))?;
                Ok(LookupResponse::without_parts(
                    descriptor.clone(),
                    stage,
                    LookupResult::Models(models),
                    ctx,
                ))
            }
            DisclosureStage::NeedSubmodel
            | DisclosureStage::NeedConfiguration
            | DisclosureStage::Resolved => self.resolve_with_parts(descriptor, ctx, stage).await,
        }
    }

    /// The only branch that fetches parts: a submodel or configuration is
    /// specific enough to plausibly match real catalog entries
    async fn resolve_with_parts(
        &self,
        descriptor: &VehicleDescriptor,
        ctx: &QueryContext,
        stage: DisclosureStage,
    ) -> Result<LookupResponse> {
        let fetch = self.start_parts_fetch(descriptor, ctx);

        let lookup = if stage == DisclosureStage::NeedSubmodel {
            let submodels = self
                .source
                .submodels_for(descriptor)
                .await
                .map_err(|e| EngineError::lookup(stage, e))?;
            LookupResult::Submodels(submodels)
        } else {
            let options = self
                .source
                .configurations_for(descriptor)
                .await
                .map_err(|e| EngineError::lookup(stage, e))?;
            let remaining = options
                .into_iter()
                .filter(|o| !descriptor.has_configuration(&o.key))
                .collect();
            LookupResult::Configurations(remaining)
        };

        // No unpinned dimensions left: the descriptor is fully resolved.
        let stage = match &lookup {
            LookupResult::Configurations(options) if options.is_empty() => {
                DisclosureStage::Resolved
            }
            _ => stage,
        };

        let parts = fetch.join().await;
        Ok(LookupResponse::with_parts(
            descriptor.clone(),
            stage,
            lookup,
            parts,
        ))
    }

    fn start_parts_fetch(&self, descriptor: &VehicleDescriptor, ctx: &QueryContext) -> PartsFetch {
        let count = if ctx.count > 0 {
            ctx.count
        } else {
            self.config.default_page_size
        };
        spawn_parts_fetch(
            Arc::clone(&self.source),
            descriptor.clone(),
            ctx.brand_scope.clone(),
            ctx.page,
            count,
            self.config.parts_fetch_timeout(),
        )
    }

    /// Validate and persist a customer fitment inquiry
    pub async fn submit_inquiry(&self, inquiry: &VehicleInquiry) -> Result<()> {
        if let Err(err) = inquiry.validate() {
            metrics::record_inquiry(metrics::OUTCOME_ERROR);
            return Err(EngineError::InvalidInquiry(err));
        }
        match self.source.push_inquiry(inquiry).await {
            Ok(()) => {
                metrics::record_inquiry(metrics::OUTCOME_OK);
                Ok(())
            }
            Err(err) => {
                metrics::record_inquiry(metrics::OUTCOME_ERROR);
                Err(EngineError::Inquiry(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{CatalogOp, MemoryCatalog};
    use fitment_core::{ConfigurationPair, Part};

    fn seeded() -> Arc<MemoryCatalog> {
        let catalog = MemoryCatalog::new();
        catalog.add_vehicle_with_configurations(
            1,
            2015,
            "Ford",
            "F-150",
            "XLT",
            vec![
                ConfigurationPair::new("bed length", "6.5 ft"),
                ConfigurationPair::new("bed length", "8 ft"),
                ConfigurationPair::new("cab size", "crew"),
            ],
        );
        catalog.add_vehicle(1, 2015, "Ford", "F-150", "Lariat");
        catalog.add_vehicle(1, 2016, "Ford", "Escape", "SE");
        catalog.add_vehicle(2, 2015, "Dodge", "Ram 1500", "SLT");
        catalog.add_part(
            Part::new(11_000).with_attribute("finish", "black"),
            1,
            2015,
            "Ford",
            "F-150",
        );
        catalog.add_part(
            Part::new(11_001).with_attribute("finish", "chrome"),
            1,
            2015,
            "Ford",
            "F-150",
        );
        Arc::new(catalog)
    }

    fn resolver() -> (FitmentResolver, Arc<MemoryCatalog>) {
        let catalog = seeded();
        (FitmentResolver::new(Arc::clone(&catalog) as _), catalog)
    }

    #[tokio::test]
    async fn test_need_year_returns_years_and_no_parts() {
        let (resolver, _) = resolver();
        let response = resolver
            .resolve(&VehicleDescriptor::new(), &QueryContext::unscoped())
            .await
            .unwrap();

        assert_eq!(response.stage, DisclosureStage::NeedYear);
        assert_eq!(response.lookup, LookupResult::Years(vec![2016, 2015]));
        assert!(response.parts.is_empty());
        assert!(response.facets.is_empty());
    }

    #[tokio::test]
    async fn test_brand_scope_narrows_years() {
        let (resolver, _) = resolver();
        let ctx = QueryContext::new(vec![2], "abc");
        let response = resolver
            .resolve(&VehicleDescriptor::new(), &ctx)
            .await
            .unwrap();
        assert_eq!(response.lookup, LookupResult::Years(vec![2015]));
    }

    #[tokio::test]
    async fn test_need_make_and_need_model() {
        let (resolver, _) = resolver();

        let year_only = VehicleDescriptor::new().with_year(2015);
        let response = resolver
            .resolve(&year_only, &QueryContext::unscoped())
            .await
            .unwrap();
        assert_eq!(response.stage, DisclosureStage::NeedMake);
        assert_eq!(
            response.lookup,
            LookupResult::Makes(vec!["Dodge".into(), "Ford".into()])
        );

        let with_make = year_only.with_make("Ford");
        let response = resolver
            .resolve(&with_make, &QueryContext::unscoped())
            .await
            .unwrap();
        assert_eq!(response.stage, DisclosureStage::NeedModel);
        assert_eq!(response.lookup, LookupResult::Models(vec!["F-150".into()]));
    }

    #[tokio::test]
    async fn test_need_submodel_fetches_parts_and_facets() {
        let (resolver, _) = resolver();
        let base = VehicleDescriptor::new()
            .with_year(2015)
            .with_make("Ford")
            .with_model("F-150");

        let response = resolver
            .resolve(&base, &QueryContext::unscoped())
            .await
            .unwrap();
        assert_eq!(response.stage, DisclosureStage::NeedSubmodel);
        assert_eq!(
            response.lookup,
            LookupResult::Submodels(vec!["Lariat".into(), "XLT".into()])
        );
        assert_eq!(response.parts.len(), 2);
        assert_eq!(
            response.facets.get("finish").unwrap().values,
            vec!["black".to_string(), "chrome".to_string()]
        );
    }

    #[tokio::test]
    async fn test_need_configuration_filters_pinned_keys() {
        let (resolver, _) = resolver();
        let descriptor = VehicleDescriptor::new()
            .with_year(2015)
            .with_make("Ford")
            .with_model("F-150")
            .with_submodel("XLT")
            .with_configuration("bed length", "6.5 ft");

        let response = resolver
            .resolve(&descriptor, &QueryContext::unscoped())
            .await
            .unwrap();
        assert_eq!(response.stage, DisclosureStage::NeedConfiguration);
        match &response.lookup {
            LookupResult::Configurations(options) => {
                assert_eq!(options.len(), 1);
                assert_eq!(options[0].key, "cab size");
            }
            other => panic!("expected configurations, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_exhausted_configurations_resolve_the_descriptor() {
        let (resolver, _) = resolver();
        let descriptor = VehicleDescriptor::new()
            .with_year(2015)
            .with_make("Ford")
            .with_model("F-150")
            .with_submodel("XLT")
            .with_configuration("bed length", "8 ft")
            .with_configuration("cab size", "crew");

        let response = resolver
            .resolve(&descriptor, &QueryContext::unscoped())
            .await
            .unwrap();
        assert_eq!(response.stage, DisclosureStage::Resolved);
        assert_eq!(response.lookup, LookupResult::Configurations(vec![]));
        assert_eq!(response.parts.len(), 2);
    }

    #[tokio::test]
    async fn test_lookup_failure_is_fatal_and_tagged_with_stage() {
        let (resolver, catalog) = resolver();
        catalog.fail_on(CatalogOp::Submodels);

        let base = VehicleDescriptor::new()
            .with_year(2015)
            .with_make("Ford")
            .with_model("F-150");
        let err = resolver
            .resolve(&base, &QueryContext::unscoped())
            .await
            .unwrap_err();

        match err {
            EngineError::Lookup { stage, .. } => {
                assert_eq!(stage, DisclosureStage::NeedSubmodel)
            }
            other => panic!("expected lookup failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_parts_failure_is_not_fatal() {
        let (resolver, catalog) = resolver();
        catalog.fail_on(CatalogOp::Parts);

        let base = VehicleDescriptor::new()
            .with_year(2015)
            .with_make("Ford")
            .with_model("F-150");
        let response = resolver
            .resolve(&base, &QueryContext::unscoped())
            .await
            .unwrap();
        assert_eq!(response.stage, DisclosureStage::NeedSubmodel);
        assert!(response.parts.is_empty());
        assert!(response.facets.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_fetch_is_bounded_by_the_ceiling() {
        let catalog = seeded();
        catalog.delay_parts(std::time::Duration::from_secs(30));
        let resolver = FitmentResolver::new(Arc::clone(&catalog) as _);

        let base = VehicleDescriptor::new()
            .with_year(2015)
            .with_make("Ford")
            .with_model("F-150");

        let started = tokio::time::Instant::now();
        let response = resolver
            .resolve(&base, &QueryContext::unscoped())
            .await
            .unwrap();

        // bounded by the 5s ceiling, not the 30s fetch
        assert!(started.elapsed() < std::time::Duration::from_secs(6));
        assert!(response.parts.is_empty());
        assert_eq!(
            response.lookup,
            LookupResult::Submodels(vec!["Lariat".into(), "XLT".into()])
        );
    }

    #[tokio::test]
    async fn test_pagination_flows_through_to_the_fetch() {
        let (resolver, _) = resolver();
        let base = VehicleDescriptor::new()
            .with_year(2015)
            .with_make("Ford")
            .with_model("F-150");
        let ctx = QueryContext::unscoped().with_page(2, 1);

        let response = resolver.resolve(&base, &ctx).await.unwrap();
        assert_eq!(response.parts.page, 2);
        assert_eq!(response.parts.count, 1);
        let ids: Vec<i64> = response.parts.parts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![11_001]);
    }

    #[tokio::test]
    async fn test_resolution_is_idempotent() {
        let (resolver, _) = resolver();
        let base = VehicleDescriptor::new()
            .with_year(2015)
            .with_make("Ford")
            .with_model("F-150");
        let ctx = QueryContext::unscoped();

        let first = resolver.resolve(&base, &ctx).await.unwrap();
        let second = resolver.resolve(&base, &ctx).await.unwrap();
        assert_eq!(first.lookup, second.lookup);
        assert_eq!(first.facets, second.facets);
        assert_eq!(first.stage, second.stage);
    }

    #[tokio::test]
    async fn test_inquiry_roundtrip() {
        let (resolver, catalog) = resolver();
        let inquiry = VehicleInquiry {
            name: "Sam Carter".into(),
            phone: "555-0100".into(),
            year: 2015,
            make: "Ford".into(),
            model: "F-150".into(),
            ..Default::default()
        };

        resolver.submit_inquiry(&inquiry).await.unwrap();
        assert_eq!(catalog.inquiries(), vec![inquiry]);
    }

    #[tokio::test]
    async fn test_invalid_inquiry_is_rejected_before_the_sink() {
        let (resolver, catalog) = resolver();
        let inquiry = VehicleInquiry::default();

        let err = resolver.submit_inquiry(&inquiry).await.unwrap_err();
        assert!(matches!(err, EngineError::InvalidInquiry(_)));
        assert!(catalog.inquiries().is_empty());
    }
}
