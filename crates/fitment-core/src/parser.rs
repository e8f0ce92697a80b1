//! Descriptor extraction from raw request data
//!
//! Parsing never fails: missing or malformed fields simply yield a
//! descriptor that stops at an earlier disclosure stage. The transport
//! layer hands us a [`QueryInput`]; nothing here touches HTTP.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_EXCLUDED_FIELDS;
use crate::descriptor::{ConfigurationPair, VehicleDescriptor};

/// Transport-agnostic view of one inbound request
///
/// `fields` holds query-string and form fields in the order the transport
/// enumerated them; duplicate keys are allowed and the first occurrence
/// wins. That enumeration order is what configuration-pair order follows,
/// and it is not guaranteed stable across transport encodings.
#[derive(Debug, Clone, Default)]
pub struct QueryInput {
    pub content_type: Option<String>,
    pub body: Option<String>,
    pub fields: Vec<(String, String)>,
}

impl QueryInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json_body(mut self, body: impl Into<String>) -> Self {
        self.content_type = Some("application/json".to_string());
        self.body = Some(body.into());
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((key.into(), value.into()));
        self
    }

    /// First value supplied for a field, if any
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Parser policy: which request fields never become configuration pairs
///
/// Injected rather than hard-coded so suites can vary the exclusion set
/// without touching shared state. Matching is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserRules {
    pub excluded_fields: Vec<String>,
}

impl ParserRules {
    pub fn new(excluded_fields: Vec<String>) -> Self {
        Self { excluded_fields }
    }

    pub fn is_excluded(&self, key: &str) -> bool {
        self.excluded_fields
            .iter()
            .any(|f| f.eq_ignore_ascii_case(key))
    }
}

impl Default for ParserRules {
    fn default() -> Self {
        Self {
            excluded_fields: DEFAULT_EXCLUDED_FIELDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Extract a vehicle descriptor from raw request data
///
/// A JSON body carrying a non-zero year is accepted as-is. Otherwise the
/// chain `year -> make -> model -> submodel` is walked in strict order,
/// stopping at the first absent field; whatever fields remain after a full
/// chain become configuration pairs.
pub fn parse_descriptor(input: &QueryInput, rules: &ParserRules) -> VehicleDescriptor {
    if let Some(descriptor) = decode_structured(input) {
        return descriptor;
    }

    let mut descriptor = VehicleDescriptor::new();

    descriptor.year = input
        .field("year")
        .and_then(|y| y.parse::<i32>().ok())
        .unwrap_or(0);
    if descriptor.year == 0 {
        return descriptor;
    }

    match input.field("make") {
        Some(make) if !make.is_empty() => descriptor.make = make.to_string(),
        _ => return descriptor,
    }

    match input.field("model") {
        Some(model) if !model.is_empty() => descriptor.model = model.to_string(),
        _ => return descriptor,
    }

    match input.field("submodel") {
        Some(submodel) if !submodel.is_empty() => descriptor.submodel = submodel.to_string(),
        _ => return descriptor,
    }

    descriptor.configurations = collect_configurations(input, rules);
    descriptor
}

/// JSON fast path: a structured payload with a real year short-circuits
/// field-by-field parsing; anything else falls through
fn decode_structured(input: &QueryInput) -> Option<VehicleDescriptor> {
    let content_type = input.content_type.as_deref()?;
    if !content_type.to_ascii_lowercase().contains("json") {
        return None;
    }
    let body = input.body.as_deref()?;
    let descriptor: VehicleDescriptor = serde_json::from_str(body).ok()?;
    (descriptor.year > 0).then_some(descriptor)
}

/// Every remaining field becomes one configuration pair, in enumeration
/// order, first value per key winning
fn collect_configurations(input: &QueryInput, rules: &ParserRules) -> Vec<ConfigurationPair> {
    const CHAIN_FIELDS: [&str; 4] = ["year", "make", "model", "submodel"];

    let mut pairs: Vec<ConfigurationPair> = Vec::new();
    for (key, value) in &input.fields {
        if CHAIN_FIELDS.contains(&key.as_str()) || rules.is_excluded(key) {
            continue;
        }
        if pairs.iter().any(|p| p.key == *key) {
            continue;
        }
        pairs.push(ConfigurationPair::new(key.clone(), value.clone()));
    }
    pairs
}
