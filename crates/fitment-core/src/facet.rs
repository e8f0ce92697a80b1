//! Filter facet derivation over a fetched parts batch

use serde::{Deserialize, Serialize};

use crate::parts::PartsBatch;

/// A named filter dimension with the distinct values observed for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facet {
    pub name: String,
    pub values: Vec<String>,
}

/// Facets derived over one parts batch, in first-seen order
///
/// Recomputed per response, never persisted. Singleton facets are kept;
/// display policy belongs to the client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FacetSet {
    facets: Vec<Facet>,
}

impl FacetSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one observed value, creating the facet on first sight and
    /// dropping duplicate values
    pub fn insert(&mut self, name: &str, value: &str) {
        match self.facets.iter_mut().find(|f| f.name == name) {
            Some(facet) => {
                if !facet.values.iter().any(|v| v == value) {
                    facet.values.push(value.to_string());
                }
            }
            None => self.facets.push(Facet {
                name: name.to_string(),
                values: vec![value.to_string()],
            }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Facet> {
        self.facets.iter().find(|f| f.name == name)
    }

    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }

    pub fn len(&self) -> usize {
        self.facets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }
}

/// Derive the selectable filter facets for a parts batch
///
/// Pure scan: facet names and values both keep first-seen order across the
/// batch. An empty batch yields an empty set.
pub fn derive_facets(batch: &PartsBatch) -> FacetSet {
    let mut set = FacetSet::new();
    for part in &batch.parts {
        for attr in &part.attributes {
            set.insert(&attr.name, &attr.value);
        }
    }
    set
}
