//! Bounded dependency-graph search.
//!
//! Every pass asks the same question: "which words are attached to word X
//! within N hops?". This module answers it once, parametrized by start word,
//! depth bound and an optional label filter.
//!
//! ```text
//! amod(road-6, southbound-5)      start = "southbound", max_depth = 2
//! amod(road-6, 2-lane-4)
//! prep(was-3, road-6)             depth 0: southbound
//!                                 depth 1: road            (amod)
//!                                 depth 2: 2-lane, was      (amod, prep)
//! ```
//!
//! Expansion is undirected (governor -> dependent and back) and breadth-first,
//! so a word is always expanded at the shallowest depth it is reachable at.
//! Nodes are keyed by lowercased text, not position: two "road" tokens in one
//! sentence are the same node. An edge is reported unless it leads back to a
//! node discovered at the same or a shallower depth, so a word reachable
//! through two parents is listed twice. Each node is expanded at most once,
//! which keeps cyclic (malformed) graphs finite.

use crate::dependency::{Edge, Token};
use std::collections::{HashMap, VecDeque};
use std::fmt;

/// How the start node(s) of a search are selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartWord {
    /// Words equal to this (lowercased) text.
    Exact(String),
    /// Words beginning with this stem: "park" finds "parked".
    Prefix(String),
}

impl StartWord {
    fn matches(&self, norm: &str) -> bool {
        match self {
            StartWord::Exact(word) => norm == word,
            StartWord::Prefix(stem) => norm.starts_with(stem.as_str()),
        }
    }
}

/// Parameters of one bounded search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub start: StartWord,
    /// Only follow edges whose label starts with this prefix.
    pub label_filter: Option<String>,
    pub start_depth: usize,
    pub max_depth: usize,
}

impl SearchQuery {
    pub fn exact(word: &str, max_depth: usize) -> Self {
        SearchQuery { start: StartWord::Exact(word.to_lowercase()), label_filter: None, start_depth: 0, max_depth }
    }

    pub fn prefix(stem: &str, max_depth: usize) -> Self {
        SearchQuery { start: StartWord::Prefix(stem.to_lowercase()), label_filter: None, start_depth: 0, max_depth }
    }

    pub fn with_label_filter(mut self, label: impl Into<String>) -> Self {
        self.label_filter = Some(label.into());
        self
    }

    pub fn starting_at(mut self, depth: usize) -> Self {
        self.start_depth = depth;
        self
    }

    fn follows(&self, edge: &Edge) -> bool {
        self.label_filter.as_deref().is_none_or(|prefix| edge.label.starts_with(prefix))
    }
}

/// A word reached by the search, with the label of the edge that reached it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub label: String,
    pub token: Token,
    pub depth: usize,
}

impl Connection {
    pub fn norm(&self) -> &str {
        &self.token.norm
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.label, self.token)
    }
}

/// Ordered search result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Connections(Vec<Connection>);

impl Connections {
    pub fn iter(&self) -> std::slice::Iter<'_, Connection> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lowercased words in discovery order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(Connection::norm)
    }

    pub fn any_word(&self, pred: impl Fn(&str) -> bool) -> bool {
        self.words().any(pred)
    }

    /// Comma-joined `label-word-pos` rendering, used in traces.
    pub fn joined(&self) -> String {
        self.0.iter().map(ToString::to_string).collect::<Vec<_>>().join(",")
    }
}

impl<'a> IntoIterator for &'a Connections {
    type Item = &'a Connection;
    type IntoIter = std::slice::Iter<'a, Connection>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Run a bounded, undirected breadth-first search over `edges`.
pub fn connected(edges: &[Edge], query: &SearchQuery) -> Connections {
    let mut out = Vec::new();
    // Depth at which each node was first discovered.
    let mut discovered: HashMap<&str, usize> = HashMap::new();
    let mut queue: VecDeque<(&str, usize)> = VecDeque::new();

    for token in edges.iter().flat_map(Edge::tokens) {
        if query.start.matches(&token.norm) && !discovered.contains_key(token.norm.as_str()) {
            discovered.insert(token.norm.as_str(), query.start_depth);
            queue.push_back((token.norm.as_str(), query.start_depth));
        }
    }

    while let Some((node, depth)) = queue.pop_front() {
        if depth >= query.max_depth {
            continue;
        }

        for edge in edges.iter().filter(|e| query.follows(e)) {
            let other = if edge.governor.norm == node {
                &edge.dependent
            } else if edge.dependent.norm == node {
                &edge.governor
            } else {
                continue;
            };

            match discovered.get(other.norm.as_str()) {
                Some(&seen) if seen <= depth => continue,
                Some(_) => {}
                None => {
                    discovered.insert(other.norm.as_str(), depth + 1);
                    queue.push_back((other.norm.as_str(), depth + 1));
                }
            }
            out.push(Connection { label: edge.label.clone(), token: other.clone(), depth: depth + 1 });
        }
    }

    Connections(out)
}
