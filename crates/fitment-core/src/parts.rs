//! Catalog part records as consumed from the data layer

use serde::{Deserialize, Serialize};

/// One declared attribute dimension on a part (e.g. "finish" -> "black")
///
/// Attributes are the only piece of a part this crate interprets; they feed
/// facet derivation. Everything else rides along opaquely in [`Part::data`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartAttribute {
    pub name: String,
    pub value: String,
}

impl PartAttribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Opaque catalog record returned by the data layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub id: i64,
    #[serde(default)]
    pub attributes: Vec<PartAttribute>,
    /// Remainder of the catalog record, passed through untouched
    #[serde(default)]
    pub data: serde_json::Value,
}

impl Part {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            attributes: Vec::new(),
            data: serde_json::Value::Null,
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(PartAttribute::new(name, value));
        self
    }
}

/// An ordered page of parts, tagged with the scope and window that produced it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartsBatch {
    pub parts: Vec<Part>,
    pub brand_scope: Vec<i64>,
    pub page: usize,
    /// Requested page size; 0 defers to the data layer's default
    pub count: usize,
}

impl PartsBatch {
    pub fn new(parts: Vec<Part>, brand_scope: Vec<i64>, page: usize, count: usize) -> Self {
        Self {
            parts,
            brand_scope,
            page,
            count,
        }
    }

    /// The batch a response carries when the fetch never ran, failed, or
    /// timed out
    pub fn empty(brand_scope: Vec<i64>, page: usize, count: usize) -> Self {
        Self {
            parts: Vec::new(),
            brand_scope,
            page,
            count,
        }
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}
