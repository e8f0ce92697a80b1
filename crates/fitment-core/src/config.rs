//! Lookup engine configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::DEFAULT_PARTS_FETCH_TIMEOUT_MS;
use crate::parser::ParserRules;

/// Tunables for the fitment lookup engine
///
/// Injected into the resolver and parser; nothing reads module-level
/// globals, so suites can vary any of this per instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupConfig {
    /// Wall-clock ceiling on the concurrent parts fetch, in milliseconds
    #[serde(default = "default_parts_fetch_timeout_ms")]
    pub parts_fetch_timeout_ms: u64,
    /// Parser policy for configuration-pair extraction
    #[serde(default)]
    pub parser: ParserRules,
    /// Page size used when the caller requests none; 0 defers to the data
    /// layer's default
    #[serde(default)]
    pub default_page_size: usize,
}

fn default_parts_fetch_timeout_ms() -> u64 {
    DEFAULT_PARTS_FETCH_TIMEOUT_MS
}

impl LookupConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the parts-fetch ceiling
    pub fn with_parts_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.parts_fetch_timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Override the parser's excluded-field set
    pub fn with_excluded_fields(mut self, fields: Vec<String>) -> Self {
        self.parser = ParserRules::new(fields);
        self
    }

    pub fn with_default_page_size(mut self, count: usize) -> Self {
        self.default_page_size = count;
        self
    }

    pub fn parts_fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.parts_fetch_timeout_ms)
    }

    /// Load configuration from a JSON file
    pub fn load(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            parts_fetch_timeout_ms: DEFAULT_PARTS_FETCH_TIMEOUT_MS,
            parser: ParserRules::default(),
            default_page_size: 0,
        }
    }
}
