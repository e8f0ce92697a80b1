//! fitment-lookup: progressive vehicle-fitment lookup engine
//!
//! Facade over the workspace crates:
//! - `fitment-core`: descriptors, disclosure stages, parsing, facets
//! - `fitment-engine`: async stage resolution and the bounded parts fetch

pub use fitment_core::{
    constants, derive_facets, parse_descriptor, ConfigurationOption, ConfigurationPair,
    DisclosureStage, Facet, FacetSet, LookupConfig, LookupResult, Part, PartAttribute, PartsBatch,
    ParserRules, QueryContext, QueryInput, VehicleDescriptor, VehicleInquiry,
};
pub use fitment_engine::{
    CatalogError, CatalogOp, CatalogSource, EngineError, FitmentResolver, LookupResponse,
    MemoryCatalog,
};
