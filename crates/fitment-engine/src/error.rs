//! Engine error types

use fitment_core::DisclosureStage;
use thiserror::Error;

/// Failure surface of the external data-access layer
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("catalog unavailable: {0}")]
    Unavailable(String),

    #[error("catalog query failed: {0}")]
    Query(String),

    #[error("invalid catalog request: {0}")]
    Invalid(String),
}

/// Fatal errors surfaced to the calling handler layer
///
/// A parts-fetch failure or timeout is deliberately absent: both are
/// absorbed as an empty batch and never abort a response.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A stage-specific lookup query failed; the whole resolution is
    /// discarded, no partial disclosure result is returned
    #[error("vehicle lookup failed at stage {stage}")]
    Lookup {
        stage: DisclosureStage,
        #[source]
        source: CatalogError,
    },

    /// Inquiry validation failed; nothing was persisted
    #[error(transparent)]
    InvalidInquiry(#[from] fitment_core::Error),

    #[error("inquiry submission failed")]
    Inquiry(#[source] CatalogError),
}

impl EngineError {
    pub fn lookup(stage: DisclosureStage, source: CatalogError) -> Self {
        EngineError::Lookup { stage, source }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
