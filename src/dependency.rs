//! Dependency-graph input: tokens, relation edges and the parser seam.
//!
//! The engine never parses English itself. A [`DependencyParser`] turns one
//! sentence into a [`ParsedSentence`]: a tagged token list plus an ordered
//! list of grammatical relations. Relations arrive as Stanford-style strings
//!
//! ```text
//! amod(road-6, southbound-5)
//! nmod:of(side-3, road-6)
//! compound(road-7, 2-lane-6)      <- word "2-lane", position 6
//! ```
//!
//! and are parsed into [`Edge`]s. Strings that do not have this shape are
//! skipped with a warning rather than failing the sentence.

use crate::error::{AnalyzerError, Result};
use crate::rules::vocabulary::split_sentences;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// A word at a 1-based position inside its sentence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    /// Surface form as emitted by the parser.
    pub word: String,
    /// Lowercased form used for all matching.
    pub norm: String,
    pub position: u32,
}

impl Token {
    pub fn new(word: impl Into<String>, position: u32) -> Self {
        let word = word.into();
        let norm = word.to_lowercase();
        Token { word, norm, position }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.word, self.position)
    }
}

/// A directed grammatical relation `label(governor, dependent)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub label: String,
    pub governor: Token,
    pub dependent: Token,
}

impl Edge {
    pub fn new(label: impl Into<String>, governor: Token, dependent: Token) -> Self {
        Edge { label: label.into(), governor, dependent }
    }

    pub fn tokens(&self) -> [&Token; 2] {
        [&self.governor, &self.dependent]
    }
}

impl FromStr for Edge {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self> {
        let re = regex!(r"^\s*([^\s(]+)\((.+?)-(\d+)'*,\s*(.+)-(\d+)'*\)\s*$");
        let caps = re.captures(s).ok_or_else(|| AnalyzerError::MalformedRelation(s.to_string()))?;
        let position = |idx: usize| {
            caps[idx].parse::<u32>().map_err(|_| AnalyzerError::MalformedRelation(s.to_string()))
        };

        Ok(Edge {
            label: caps[1].to_string(),
            governor: Token::new(&caps[2], position(3)?),
            dependent: Token::new(&caps[4], position(5)?),
        })
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}, {})", self.label, self.governor, self.dependent)
    }
}

/// A token with its part-of-speech tag.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaggedToken {
    pub word: String,
    #[serde(default)]
    pub tag: String,
}

/// Parser output for one sentence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSentence {
    pub tokens: Vec<TaggedToken>,
    pub edges: Vec<Edge>,
}

impl ParsedSentence {
    /// Build from relation strings, skipping any that are malformed.
    pub fn from_relations<I, S>(relations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ParsedSentence { tokens: Vec::new(), edges: parse_relations(relations) }
    }

    pub fn with_tokens(mut self, tokens: Vec<TaggedToken>) -> Self {
        self.tokens = tokens;
        self
    }
}

/// Parse relation strings in order; malformed entries are logged and dropped.
pub fn parse_relations<I, S>(relations: I) -> Vec<Edge>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    relations
        .into_iter()
        .filter_map(|rel| match rel.as_ref().parse::<Edge>() {
            Ok(edge) => Some(edge),
            Err(err) => {
                tracing::warn!(%err, "skipping dependency relation");
                None
            }
        })
        .collect()
}

/// Turns a sentence into its dependency graph.
///
/// Implementations may be arbitrarily slow; the engine calls them
/// synchronously, once per sentence, and does not retry.
pub trait DependencyParser {
    fn parse(&self, sentence: &str) -> Result<ParsedSentence>;
}

impl<P: DependencyParser + ?Sized> DependencyParser for &P {
    fn parse(&self, sentence: &str) -> Result<ParsedSentence> {
        (**self).parse(sentence)
    }
}

// --- Pre-parsed parser -------------------------------------------------------

#[derive(Debug, Deserialize)]
struct PreparsedDocument {
    sentences: Vec<PreparsedEntry>,
}

#[derive(Debug, Deserialize)]
struct PreparsedEntry {
    text: String,
    #[serde(default)]
    tokens: Vec<TaggedToken>,
    relations: Vec<String>,
}

/// A [`DependencyParser`] that replays captured parser output.
///
/// Sentences are looked up after normalization (lowercase, collapsed
/// whitespace, trailing period dropped), so `"The road."` and `"the road"`
/// share an entry.
///
/// JSON shape accepted by [`PreparsedParser::from_json`]:
///
/// ```text
/// { "sentences": [ { "text": "...", "tokens": [{"word": "...", "tag": "NN"}],
///                    "relations": ["det(road-2, The-1)", ...] } ] }
/// ```
#[derive(Debug, Clone, Default)]
pub struct PreparsedParser {
    entries: HashMap<String, ParsedSentence>,
}

impl PreparsedParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let doc: PreparsedDocument =
            serde_json::from_str(json).map_err(|source| AnalyzerError::Document { what: "dependency", source })?;

        let mut parser = PreparsedParser::new();
        for entry in doc.sentences {
            let parsed = ParsedSentence::from_relations(&entry.relations).with_tokens(entry.tokens);
            parser.entries.insert(sentence_key(&entry.text), parsed);
        }
        Ok(parser)
    }

    /// Register relation strings for a sentence.
    pub fn insert<I, S>(&mut self, sentence: &str, relations: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.entries.insert(sentence_key(sentence), ParsedSentence::from_relations(relations));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DependencyParser for PreparsedParser {
    fn parse(&self, sentence: &str) -> Result<ParsedSentence> {
        self.entries.get(&sentence_key(sentence)).cloned().ok_or_else(|| AnalyzerError::ParseFailed {
            sentence: sentence.to_string(),
            reason: "no pre-parsed entry".to_string(),
        })
    }
}

// --- Paragraph parsing -------------------------------------------------------

/// One sentence of a paragraph together with its parsed edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceGraph {
    pub text: String,
    pub edges: Vec<Edge>,
}

/// Split `paragraph` into sentences and parse each one once.
///
/// Sentences the parser rejects are logged and dropped; the second value is
/// how many were dropped.
pub fn parse_paragraph<P: DependencyParser>(paragraph: &str, parser: &P) -> (Vec<SentenceGraph>, usize) {
    let mut graphs = Vec::new();
    let mut skipped = 0;

    for sentence in split_sentences(paragraph) {
        match parser.parse(sentence) {
            Ok(parsed) => graphs.push(SentenceGraph { text: sentence.to_string(), edges: parsed.edges }),
            Err(err) => {
                tracing::warn!(%err, "skipping sentence");
                skipped += 1;
            }
        }
    }

    (graphs, skipped)
}

fn sentence_key(sentence: &str) -> String {
    let collapsed = sentence.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
    collapsed.trim_end_matches('.').trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_stanford_relation() {
        let edge: Edge = "amod(road-6, southbound-5)".parse().unwrap();
        assert_eq!(edge.label, "amod");
        assert_eq!(edge.governor, Token::new("road", 6));
        assert_eq!(edge.dependent.word, "southbound");
        assert_eq!(edge.dependent.position, 5);
    }

    #[test]
    fn parses_hyphenated_words_and_subtyped_labels() {
        let edge: Edge = "nmod:of(side-3, 2-lane-6)".parse().unwrap();
        assert_eq!(edge.label, "nmod:of");
        assert_eq!(edge.dependent.word, "2-lane");
        assert_eq!(edge.dependent.position, 6);

        let copy: Edge = "conj:and(road-4', Main-7)".parse().unwrap();
        assert_eq!(copy.governor.position, 4);
        assert_eq!(copy.dependent.norm, "main");
    }

    #[test]
    fn malformed_relations_are_skipped() {
        let parsed = ParsedSentence::from_relations(["amod(road-2, north-1)", "garbage", "det(road, the)"]);
        assert_eq!(parsed.edges.len(), 1);
        assert!(matches!("garbage".parse::<Edge>(), Err(AnalyzerError::MalformedRelation(_))));
    }

    #[test]
    fn preparsed_parser_normalizes_sentence_keys() {
        let mut parser = PreparsedParser::new();
        parser.insert("The road goes north.", ["det(road-2, The-1)"]);

        assert_eq!(parser.parse("the  road goes north").unwrap().edges.len(), 1);
        assert!(matches!(parser.parse("A lane."), Err(AnalyzerError::ParseFailed { .. })));
    }

    #[test]
    fn preparsed_parser_loads_json() {
        let json = r#"{"sentences": [
            {"text": "This is a 3-lane road.",
             "tokens": [{"word": "This", "tag": "DT"}],
             "relations": ["nsubj(road-5, This-1)", "amod(road-5, 3-lane-4)"]}
        ]}"#;
        let parser = PreparsedParser::from_json(json).unwrap();
        let parsed = parser.parse("This is a 3-lane road").unwrap();

        assert_eq!(parsed.tokens[0].tag, "DT");
        assert_eq!(parsed.edges[1].dependent.word, "3-lane");
        assert!(matches!(PreparsedParser::from_json("{"), Err(AnalyzerError::Document { .. })));
    }

    #[test]
    fn paragraph_parsing_skips_failed_sentences() {
        let mut parser = PreparsedParser::new();
        parser.insert("There is a road going north", ["advmod(going-5, north-6)"]);

        let (graphs, skipped) = parse_paragraph("There is a road going north. Nobody parsed this one.", &parser);
        assert_eq!(skipped, 1);
        assert_eq!(graphs.len(), 1);
        assert_eq!(graphs[0].text, "There is a road going north");
        assert_eq!(graphs[0].edges[0].dependent.norm, "north");
    }
}
