//! Composed lookup response

use serde::Serialize;

use fitment_core::{
    derive_facets, DisclosureStage, FacetSet, LookupResult, PartsBatch, QueryContext,
    VehicleDescriptor,
};

/// Everything one resolution produced, in a uniform shape
///
/// `parts` and `facets` are always present (empty for stages that never
/// fetch), so consumers see the same fields regardless of stage. Wire
/// encoding belongs to the calling handler.
#[derive(Debug, Clone, Serialize)]
pub struct LookupResponse {
    pub descriptor: VehicleDescriptor,
    pub stage: DisclosureStage,
    pub lookup: LookupResult,
    pub parts: PartsBatch,
    pub facets: FacetSet,
}

impl LookupResponse {
    /// Assemble a response for a stage that fetched parts
    pub fn with_parts(
        descriptor: VehicleDescriptor,
        stage: DisclosureStage,
        lookup: LookupResult,
        parts: PartsBatch,
    ) -> Self {
        let facets = derive_facets(&parts);
        Self {
            descriptor,
            stage,
            lookup,
            parts,
            facets,
        }
    }

    /// Assemble a response for a stage too early to fetch parts
    pub fn without_parts(
        descriptor: VehicleDescriptor,
        stage: DisclosureStage,
        lookup: LookupResult,
        ctx: &QueryContext,
    ) -> Self {
        Self {
            descriptor,
            stage,
            lookup,
            parts: PartsBatch::empty(ctx.brand_scope.clone(), ctx.page, ctx.count),
            facets: FacetSet::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitment_core::Part;

    #[test]
    fn test_early_stage_response_has_empty_parts_and_facets() {
        let ctx = QueryContext::new(vec![1], "abc").with_page(0, 10);
        let response = LookupResponse::without_parts(
            VehicleDescriptor::new(),
            DisclosureStage::NeedYear,
            LookupResult::Years(vec![2016, 2015]),
            &ctx,
        );
        assert!(response.parts.is_empty());
        assert!(response.facets.is_empty());
        assert_eq!(response.parts.brand_scope, vec![1]);
    }

    #[test]
    fn test_parts_response_derives_facets() {
        let batch = PartsBatch::new(
            vec![
                Part::new(1).with_attribute("color", "red"),
                Part::new(2).with_attribute("color", "blue"),
            ],
            vec![],
            0,
            0,
        );
        let response = LookupResponse::with_parts(
            VehicleDescriptor::new().with_year(2015),
            DisclosureStage::NeedSubmodel,
            LookupResult::Submodels(vec!["XLT".into()]),
            batch,
        );
        assert_eq!(response.facets.get("color").unwrap().values.len(), 2);
    }

    #[test]
    fn test_response_serializes_all_fields() {
        let ctx = QueryContext::unscoped();
        let response = LookupResponse::without_parts(
            VehicleDescriptor::new(),
            DisclosureStage::NeedYear,
            LookupResult::Years(vec![]),
            &ctx,
        );
        let json = serde_json::to_value(&response).unwrap();
        // never absent, even when empty
        assert!(json.get("parts").is_some());
        assert!(json.get("facets").is_some());
        assert_eq!(json["stage"], "need_year");
    }
}
