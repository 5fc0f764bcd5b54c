//! Junction roles: which street is the main road and which one ends at the
//! junction.
//!
//! A T-junction scene has one continuous street and one that terminates
//! into it; a four-way intersection has no such asymmetry. Evidence, in
//! priority order:
//!
//! ```text
//! 1. road concept carries is_single_road_piece = 1   ("alley")   -> T
//! 2. a "main" modifier within two hops                ("Main St") -> F
//!    a "cross*" / "end*" modifier within two hops                 -> T
//! 3. nothing                                                      -> Unclassified
//! ```

use super::search::{SearchQuery, connected};
use super::trigger::IntersectionKind;
use crate::dependency::Edge;
use crate::model::{JunctionRole, Scenario, Street};
use crate::ontology::{Ontology, PROP_ENDS_AT_JUNCTION};
use crate::rules::predicates::{is_main_modifier, is_terminating_modifier};

/// Result of classifying one road mention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JunctionOutcome {
    Resolved(JunctionRole),
    /// No rule fired; the role stays deferred.
    Unclassified,
}

/// Classify the junction role of `road_word` from its concept and nearby modifiers.
pub fn classify_junction_role<O: Ontology>(edges: &[Edge], road_word: &str, ontology: &O, depth: usize) -> JunctionOutcome {
    if ontology.find_concept(road_word).and_then(|c| c.flag(PROP_ENDS_AT_JUNCTION)) == Some(true) {
        return JunctionOutcome::Resolved(JunctionRole::Terminating);
    }

    let related = connected(edges, &SearchQuery::exact(road_word, depth));
    for word in related.words() {
        if is_main_modifier(word) {
            return JunctionOutcome::Resolved(JunctionRole::Continuous);
        }
        if is_terminating_modifier(word) {
            return JunctionOutcome::Resolved(JunctionRole::Terminating);
        }
    }

    JunctionOutcome::Unclassified
}

/// Write a resolved role into an unset slot. Returns whether the street changed.
///
/// A street that already holds the opposite role keeps it.
pub fn apply_junction_outcome(outcome: JunctionOutcome, street: &mut Street) -> bool {
    let JunctionOutcome::Resolved(role) = outcome else {
        return false;
    };

    match street.junction_role {
        None => {
            street.junction_role = Some(role);
            true
        }
        Some(existing) if existing == role => false,
        Some(existing) => {
            tracing::debug!(existing = existing.code(), observed = role.code(), "conflicting junction role ignored");
            false
        }
    }
}

/// Create the two streets implied by a junction.
///
/// For a T-intersection the second street is the one ending at the junction.
/// Returns the number of streets created.
pub fn create_junction_streets(kind: IntersectionKind, scenario: &mut Scenario) -> usize {
    if kind == IntersectionKind::None {
        return 0;
    }

    scenario.create_street();
    let crossing = scenario.create_street();
    if kind == IntersectionKind::TIntersection {
        scenario[crossing].junction_role = Some(JunctionRole::Terminating);
    }

    tracing::debug!(%kind, streets = scenario.len(), "created junction streets");
    2
}
