//! Vehicle descriptor and disclosure stage derivation

use serde::{Deserialize, Serialize};
use std::fmt;

/// One chosen configuration option on a vehicle (e.g. "bed length" -> "6.5 ft")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationPair {
    pub key: String,
    pub value: String,
}

impl ConfigurationPair {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Partial vehicle description driving progressive disclosure
///
/// Fields are meaningful in strict order: `make` only counts once `year` is
/// set, `model` once `make` is set, and so on down the chain. A zero-value
/// descriptor is valid input and simply selects the earliest stage. The
/// descriptor is rebuilt fresh for every request and never mutated after
/// construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleDescriptor {
    pub year: i32,
    pub make: String,
    pub model: String,
    pub submodel: String,
    pub configurations: Vec<ConfigurationPair>,
}

impl VehicleDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    pub fn with_make(mut self, make: impl Into<String>) -> Self {
        self.make = make.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_submodel(mut self, submodel: impl Into<String>) -> Self {
        self.submodel = submodel.into();
        self
    }

    pub fn with_configuration(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.configurations.push(ConfigurationPair::new(key, value));
        self
    }

    /// Derive the active disclosure stage from the populated fields
    ///
    /// Computed on demand, never cached, so resolution stays idempotent for
    /// a given descriptor. A populated submodel always reports
    /// `NeedConfiguration`; whether the configuration chain is exhausted
    /// depends on backing data the descriptor cannot see, so `Resolved` is
    /// only ever assigned by the resolver after it has queried the
    /// remaining options.
    pub fn stage(&self) -> DisclosureStage {
        if self.year == 0 {
            DisclosureStage::NeedYear
        } else if self.make.is_empty() {
            DisclosureStage::NeedMake
        } else if self.model.is_empty() {
            DisclosureStage::NeedModel
        } else if self.submodel.is_empty() {
            DisclosureStage::NeedSubmodel
        } else {
            DisclosureStage::NeedConfiguration
        }
    }

    /// Whether a configuration key has already been pinned on this descriptor
    ///
    /// Keys compare case-insensitively, matching how form fields arrive.
    pub fn has_configuration(&self, key: &str) -> bool {
        self.configurations
            .iter()
            .any(|c| c.key.eq_ignore_ascii_case(key))
    }
}

/// Where a descriptor currently sits in the year -> make -> model ->
/// submodel -> configuration chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisclosureStage {
    NeedYear,
    NeedMake,
    NeedModel,
    NeedSubmodel,
    NeedConfiguration,
    Resolved,
}

impl DisclosureStage {
    /// Whether the descriptor is specific enough to plausibly match parts
    ///
    /// Only a resolved submodel (or beyond) warrants kicking off the
    /// concurrent parts fetch.
    pub fn fetches_parts(&self) -> bool {
        matches!(
            self,
            DisclosureStage::NeedSubmodel
                | DisclosureStage::NeedConfiguration
                | DisclosureStage::Resolved
        )
    }

    /// Stable label for logs and metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            DisclosureStage::NeedYear => "need_year",
            DisclosureStage::NeedMake => "need_make",
            DisclosureStage::NeedModel => "need_model",
            DisclosureStage::NeedSubmodel => "need_submodel",
            DisclosureStage::NeedConfiguration => "need_configuration",
            DisclosureStage::Resolved => "resolved",
        }
    }
}

impl fmt::Display for DisclosureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
