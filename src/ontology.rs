//! Concept lookup.
//!
//! The engine classifies words through an [`Ontology`]: "avenue" is a
//! `road_type` concept, "north" is a `direction` concept. Concepts are
//! read-only here. [`ConceptTable`] is a small in-memory implementation that
//! keeps concepts in declaration order, which is the order direction concepts
//! are tried in.

use crate::error::{AnalyzerError, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

pub const CATEGORY_ROAD_TYPE: &str = "road_type";
pub const CATEGORY_DIRECTION: &str = "direction";

/// Data property marking a road type that ends at the junction.
pub const PROP_ENDS_AT_JUNCTION: &str = "is_single_road_piece";

/// An ontology node.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Concept {
    pub name: String,
    /// Leaf-level category tag, e.g. `road_type` or `direction`.
    pub category: String,
    #[serde(default)]
    pub data_properties: BTreeMap<String, String>,
}

impl Concept {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Concept { name: name.into(), category: category.into(), data_properties: BTreeMap::new() }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data_properties.insert(key.into(), value.into());
        self
    }

    pub fn is_road_type(&self) -> bool {
        self.category == CATEGORY_ROAD_TYPE
    }

    pub fn is_direction(&self) -> bool {
        self.category == CATEGORY_DIRECTION
    }

    /// Read a boolean data property; `"1"` and `"true"` count as set.
    pub fn flag(&self, key: &str) -> Option<bool> {
        self.data_properties.get(key).map(|v| matches!(v.trim(), "1" | "true" | "True" | "TRUE"))
    }
}

/// Concept lookup used by every analysis pass.
pub trait Ontology {
    /// Exact (case-insensitive) lookup of a single word.
    fn find_concept(&self, word: &str) -> Option<&Concept>;

    /// Direction concepts in the order they should be tried.
    fn direction_concepts(&self) -> Vec<&Concept>;

    /// Road-type concepts in declaration order.
    fn road_concepts(&self) -> Vec<&Concept>;

    fn is_road_type(&self, word: &str) -> bool {
        self.find_concept(word).is_some_and(Concept::is_road_type)
    }
}

#[derive(Debug, Deserialize)]
struct ConceptDocument {
    concepts: Vec<Concept>,
}

/// In-memory ontology keyed by lowercased concept name.
#[derive(Debug, Clone, Default)]
pub struct ConceptTable {
    concepts: Vec<Concept>,
    index: HashMap<String, usize>,
}

impl ConceptTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `{ "concepts": [ { "name", "category", "data_properties"? } ] }`.
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: ConceptDocument =
            serde_json::from_str(json).map_err(|source| AnalyzerError::Document { what: "ontology", source })?;
        Ok(doc.concepts.into_iter().collect())
    }

    /// Add a concept; a later concept with the same name replaces the earlier one
    /// but keeps its original position.
    pub fn insert(&mut self, concept: Concept) {
        let key = concept.name.to_lowercase();
        match self.index.get(&key) {
            Some(&idx) => self.concepts[idx] = concept,
            None => {
                self.index.insert(key, self.concepts.len());
                self.concepts.push(concept);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    fn by_category(&self, category: &str) -> Vec<&Concept> {
        self.concepts.iter().filter(|c| c.category == category).collect()
    }
}

impl FromIterator<Concept> for ConceptTable {
    fn from_iter<I: IntoIterator<Item = Concept>>(iter: I) -> Self {
        let mut table = ConceptTable::new();
        for concept in iter {
            table.insert(concept);
        }
        table
    }
}

impl Ontology for ConceptTable {
    fn find_concept(&self, word: &str) -> Option<&Concept> {
        self.index.get(&word.to_lowercase()).map(|&idx| &self.concepts[idx])
    }

    fn direction_concepts(&self) -> Vec<&Concept> {
        self.by_category(CATEGORY_DIRECTION)
    }

    fn road_concepts(&self) -> Vec<&Concept> {
        self.by_category(CATEGORY_ROAD_TYPE)
    }
}

impl<O: Ontology + ?Sized> Ontology for &O {
    fn find_concept(&self, word: &str) -> Option<&Concept> {
        (**self).find_concept(word)
    }

    fn direction_concepts(&self) -> Vec<&Concept> {
        (**self).direction_concepts()
    }

    fn road_concepts(&self) -> Vec<&Concept> {
        (**self).road_concepts()
    }
}
