//! Turn accident-scene narratives into a structured road-network model.
//!
//! The crate reads a paragraph such as
//!
//! ```text
//! There is a road going north. The car was on a 2-lane southbound road.
//! ```
//!
//! and produces [`Street`]s with cardinal direction, lane count, road type,
//! junction role and parking configuration. It does not parse English: a
//! [`DependencyParser`] supplies each sentence's grammatical relations and an
//! [`Ontology`] says which words are road types and which are directions.
//! [`PreparsedParser`] and [`ConceptTable`] are ready-made implementations
//! backed by JSON fixtures.
//!
//! Entry point: [`RoadAnalyzer::analyze_paragraph`].

#[macro_use]
mod macros;
mod api;
pub mod dependency;
pub mod engine;
mod error;
pub mod model;
pub mod ontology;
mod rules;

pub use api::{AnalysisReport, Options, RoadAnalyzer};
pub use dependency::{DependencyParser, Edge, ParsedSentence, PreparsedParser, SentenceGraph, Token};
pub use engine::{AnalysisMetrics, IntersectionKind, JunctionOutcome, ParkingChanges, PassMetrics};
pub use error::{AnalyzerError, Result};
pub use model::{Cardinal, JunctionRole, ParkLineSide, Scenario, Street, StreetId, Vehicle};
pub use ontology::{Concept, ConceptTable, Ontology};
