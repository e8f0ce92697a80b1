//! fitment-core: Types and pure logic for progressive vehicle-fitment lookup
//!
//! A fitment query starts from a partial vehicle description and narrows it
//! one stage at a time: year -> make -> model -> submodel -> configuration.
//! This crate owns everything about that process that needs no I/O:
//! - the [`VehicleDescriptor`] and its derived [`DisclosureStage`]
//! - parsing a descriptor out of raw request data ([`parse_descriptor`])
//! - deriving filter facets over a fetched [`PartsBatch`] ([`derive_facets`])
//!
//! The async half (stage dispatch against a catalog backend, the bounded
//! concurrent parts fetch) lives in the companion `fitment-engine` crate.

mod config;
mod context;
mod descriptor;
mod error;
mod facet;
mod inquiry;
mod lookup;
mod parser;
mod parts;

pub use config::LookupConfig;
pub use context::QueryContext;
pub use descriptor::{ConfigurationPair, DisclosureStage, VehicleDescriptor};
pub use error::Error;
pub use facet::{derive_facets, Facet, FacetSet};
pub use inquiry::VehicleInquiry;
pub use lookup::{ConfigurationOption, LookupResult};
pub use parser::{parse_descriptor, ParserRules, QueryInput};
pub use parts::{Part, PartAttribute, PartsBatch};

pub type Result<T> = std::result::Result<T, Error>;

/// Defaults shared between the parser, config, and engine
pub mod constants {
    /// Wall-clock ceiling on the concurrent parts fetch
    pub const DEFAULT_PARTS_FETCH_TIMEOUT_MS: u64 = 5_000;

    /// Request fields that are never configuration pairs: the auth key,
    /// pagination, and brand selection all belong to outer layers
    pub const DEFAULT_EXCLUDED_FIELDS: &[&str] = &["key", "page", "count", "brandid"];
}
