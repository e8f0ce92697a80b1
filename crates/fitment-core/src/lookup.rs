//! Stage-specific lookup results

use serde::{Deserialize, Serialize};

/// A configuration dimension still open on a vehicle, with its legal values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationOption {
    pub key: String,
    pub values: Vec<String>,
}

impl ConfigurationOption {
    pub fn new(key: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            key: key.into(),
            values,
        }
    }
}

/// The legal next choices for whichever disclosure stage is active
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupResult {
    Years(Vec<i32>),
    Makes(Vec<String>),
    Models(Vec<String>),
    Submodels(Vec<String>),
    Configurations(Vec<ConfigurationOption>),
}

impl LookupResult {
    /// Stable label for logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            LookupResult::Years(_) => "years",
            LookupResult::Makes(_) => "makes",
            LookupResult::Models(_) => "models",
            LookupResult::Submodels(_) => "submodels",
            LookupResult::Configurations(_) => "configurations",
        }
    }

    /// Number of choices offered
    pub fn len(&self) -> usize {
        match self {
            LookupResult::Years(v) => v.len(),
            LookupResult::Makes(v) => v.len(),
            LookupResult::Models(v) => v.len(),
            LookupResult::Submodels(v) => v.len(),
            LookupResult::Configurations(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
