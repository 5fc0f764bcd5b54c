//! Lane-count extraction.
//!
//! Two sources of evidence, tried in order over the whole sentence:
//!
//! ```text
//! direct   amod(road-5, 3-lane-4)            -> 3
//! nearby   nummod(lane-4, 2-5)   (1 hop)     -> 2
//! ```
//!
//! A direct numeral compound always beats a numeral found near a "lane"
//! word. Zero means "no lane information".

use super::search::{Connections, SearchQuery, connected};
use crate::dependency::Edge;
use crate::rules::numeral::{numeral_value, ordinal_value};
use crate::rules::predicates::{is_kerbside_word, is_lane_word, lane_compound};

/// Number of lanes stated in a sentence's dependency edges, or 0.
pub fn extract_lane_count(edges: &[Edge], depth: usize) -> u32 {
    let tokens = || edges.iter().flat_map(Edge::tokens);

    if let Some(count) = tokens().find_map(|t| lane_compound(&t.norm).filter(|&n| n > 0)) {
        tracing::debug!(count, "lane count from numeral compound");
        return count;
    }

    for token in tokens().filter(|t| is_lane_word(&t.norm)) {
        let related = connected(edges, &SearchQuery::exact(&token.norm, depth));
        if let Some(count) = related.words().find_map(|w| numeral_value(w).filter(|&n| n > 0)) {
            tracing::debug!(count, lane_word = %token, "lane count from nearby numeral");
            return count;
        }
    }

    0
}

/// Guess which lane a vehicle occupies from the words around it.
///
/// An ordinal ("second", "2nd") names the lane directly. A bare numeral counts
/// only if the context also talks about a lane. Kerbside words ("right",
/// "curb", "shoulder") mean the outermost lane, numbered 1.
pub fn detect_travel_lane(context: &Connections) -> Option<u32> {
    if let Some(lane) = context.words().find_map(ordinal_value) {
        return Some(lane);
    }
    if context.any_word(is_lane_word) {
        if let Some(lane) = context.words().find_map(|w| numeral_value(w).filter(|&n| n > 0)) {
            return Some(lane);
        }
    }
    if context.any_word(is_kerbside_word) {
        return Some(1);
    }
    None
}
