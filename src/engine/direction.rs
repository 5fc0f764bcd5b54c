//! Direction and road-slot assignment.
//!
//! For every sentence, each direction concept the ontology knows is looked up
//! among the sentence's words. A hit starts a bounded search from the matched
//! word, and the connected words decide which street the direction belongs to:
//!
//! ```text
//! "The car was on a 2-lane southbound road."
//!
//!   southbound ──amod── road ──amod── 2-lane
//!        │                │              │
//!   cardinal S      road-type word   lane vocabulary
//!        │                │              │
//!   street on N/S axis?   │        lane_count = 2
//!     yes: reuse it       │
//!     no:  first street without a direction, else a new one
//! ```
//!
//! Streets on the same axis are the same street: "north" and "southbound" in
//! one paragraph describe one road seen from two ends.
//!
//! A sentence with no direction word but with lane vocabulary still feeds its
//! lane count to the first street that lacks one. A sentence with neither is
//! skipped.

use super::junction::{apply_junction_outcome, classify_junction_role};
use super::lanes::extract_lane_count;
use super::search::{Connections, SearchQuery, connected};
use super::trigger::{CueMask, IntersectionKind, ParagraphCues};
use crate::Options;
use crate::dependency::{Edge, SentenceGraph};
use crate::model::{Cardinal, Scenario, StreetId};
use crate::ontology::Ontology;
use crate::rules::predicates::is_lane_vocabulary;
use crate::rules::vocabulary::{cardinal_for_word, is_direction_form, words};
use std::collections::HashSet;

/// Run direction assignment over parsed sentences.
///
/// Returns whether every street ends up with a direction (and at least one
/// street exists).
pub fn assign_directions<O: Ontology>(
    kind: IntersectionKind,
    sentences: &[SentenceGraph],
    ontology: &O,
    options: &Options,
    scenario: &mut Scenario,
) -> bool {
    let span = tracing::debug_span!("assign_directions", %kind, sentences = sentences.len());
    let _enter = span.enter();

    for sentence in sentences {
        assign_sentence(sentence, ontology, options, scenario);
    }

    all_streets_have_direction(scenario)
}

/// Whether the scenario is non-empty and no street lacks a direction.
pub fn all_streets_have_direction(scenario: &Scenario) -> bool {
    !scenario.is_empty() && scenario.streets().iter().all(|s| s.navigation.is_some())
}

fn assign_sentence<O: Ontology>(sentence: &SentenceGraph, ontology: &O, options: &Options, scenario: &mut Scenario) {
    let cues = ParagraphCues::scan(&sentence.text);
    if !cues.has(CueMask::DIRECTIONAL) && !cues.has(CueMask::LANE) {
        return;
    }

    let sentence_words: Vec<String> = words(&sentence.text).collect();
    let mut matched: HashSet<&str> = HashSet::new();

    for concept in ontology.direction_concepts() {
        let name = concept.name.to_lowercase();
        if name.is_empty() {
            continue;
        }
        let Some(word) = sentence_words.iter().find(|w| is_direction_form(w, &name)) else {
            continue;
        };
        // "south" and "southbound" can both match the word "southbound".
        if !matched.insert(word.as_str()) {
            continue;
        }

        let Some(cardinal) = cardinal_for_word(&name).or_else(|| cardinal_for_word(word)) else {
            tracing::debug!(concept = %concept.name, "direction concept has no compass stem");
            continue;
        };
        assign_direction(&sentence.edges, word, cardinal, ontology, options, scenario);
    }

    if matched.is_empty() && cues.has(CueMask::LANE) {
        assign_lanes_only(&sentence.edges, options, scenario);
    }
}

fn assign_direction<O: Ontology>(
    edges: &[Edge],
    word: &str,
    cardinal: Cardinal,
    ontology: &O,
    options: &Options,
    scenario: &mut Scenario,
) {
    let related = connected(edges, &SearchQuery::exact(word, options.direction_depth));
    tracing::debug!(word, connections = %related.joined(), "direction context");

    let street = match scenario.first_street_where(|s| s.navigation.is_some_and(|n| n.same_axis(cardinal))) {
        Some(id) => {
            tracing::debug!(direction = %cardinal, street = id.index(), "direction already on this axis");
            id
        }
        None => match claim_street(&related, cardinal, ontology, scenario) {
            Some((id, trigger)) => {
                // Only a freshly claimed street takes the role of the word that claimed it.
                let outcome = classify_junction_role(edges, trigger, ontology, options.junction_depth);
                apply_junction_outcome(outcome, &mut scenario[id]);
                id
            }
            None => {
                tracing::debug!(word, "no road or lane word near direction");
                return;
            }
        },
    };

    if related.any_word(is_lane_vocabulary) && scenario[street].lane_count.is_none() {
        let lanes = extract_lane_count(edges, options.lane_depth);
        if lanes > 0 {
            scenario[street].lane_count = Some(lanes);
            tracing::debug!(lanes, street = street.index(), "assigned lane count");
        }
    }
}

/// Pick the street a new direction lands on, triggered by the first road-type
/// or lane word in `related`. Returns the street and that trigger word.
fn claim_street<'r, O: Ontology>(
    related: &'r Connections,
    cardinal: Cardinal,
    ontology: &O,
    scenario: &mut Scenario,
) -> Option<(StreetId, &'r str)> {
    let trigger = related.words().find(|w| ontology.is_road_type(w) || is_lane_vocabulary(w))?;

    let id = scenario.first_street_where(|s| s.navigation.is_none()).unwrap_or_else(|| scenario.create_street());
    let street = &mut scenario[id];
    street.navigation = Some(cardinal);
    if street.road_type.is_none() && ontology.is_road_type(trigger) {
        street.road_type = Some(trigger.to_string());
    }

    tracing::debug!(direction = %cardinal, street = id.index(), trigger, "assigned direction");
    Some((id, trigger))
}

fn assign_lanes_only(edges: &[Edge], options: &Options, scenario: &mut Scenario) {
    let lanes = extract_lane_count(edges, options.lane_depth);
    if lanes == 0 {
        return;
    }

    let target = match scenario.first_street_where(|s| s.lane_count.is_none()) {
        Some(id) => id,
        None if scenario.is_empty() => scenario.create_street(),
        None => return,
    };
    scenario[target].lane_count = Some(lanes);
    tracing::debug!(lanes, street = target.index(), "assigned lane count without direction");
}
