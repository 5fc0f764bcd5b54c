//! Error types shared by the engine, its collaborators and the CLI.
//!
//! The analysis passes themselves never fail: missing evidence is modelled
//! as unset attributes. Errors only surface at the boundaries (parsing a
//! sentence, loading fixtures, writing through the string property view).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// The dependency parser could not produce a graph for a sentence.
    #[error("dependency parse failed for sentence \"{sentence}\": {reason}")]
    ParseFailed { sentence: String, reason: String },

    /// A known street property key received a value it cannot hold.
    #[error("invalid value \"{value}\" for street property `{key}`")]
    InvalidProperty { key: &'static str, value: String },

    /// A relation string did not have the `label(gov-N, dep-M)` shape.
    #[error("malformed dependency relation: \"{0}\"")]
    MalformedRelation(String),

    /// An ontology, options or fixture document failed to deserialize.
    #[error("invalid {what} document: {source}")]
    Document {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid option: {0}")]
    InvalidOption(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
