//! Parking configuration: parked vehicles and parking lines along a street.
//!
//! Two independent effects, both driven by one sentence's edges:
//!
//! - **Vehicles.** Words around "park*" decide whether unplaced vehicles are
//!   moved onto the carriageway, and into which lane.
//! - **Parking lines.** A `nmod:of` edge joining "side" to a road-type word
//!   ("the side of the road"), where the side is "lined"/"filled" with cars,
//!   marks the street's parking line as occupied.
//!
//! ```text
//! "Both sides of the street were lined with parked cars."
//!
//!   nmod:of(sides-3, street-6)     side edge, road word "street"
//!   nsubjpass(lined-8, sides-3)    side evidence "lined"  (1 hop)
//!   nmod:with(lined-8, cars-12)    car evidence near "lined" (<= 2 hops)
//!                                  -> filled = true, side = both
//! ```

use super::lanes::detect_travel_lane;
use super::search::{SearchQuery, connected};
use crate::Options;
use crate::dependency::{Edge, Token};
use crate::model::{ParkLineSide, Scenario, StreetId};
use crate::ontology::Ontology;
use crate::rules::predicates::{is_car_word, is_park_line_word};
use crate::rules::vocabulary::{PARK_STEM, SIDE_OF_LABEL, SIDE_STEM};
use regex::Regex;

/// What one parking extraction changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParkingChanges {
    pub vehicles_placed: usize,
    pub streets_marked: usize,
}

/// Apply parking evidence from one sentence's edges to the scenario.
pub fn extract_parking_config<O: Ontology>(
    edges: &[Edge],
    ontology: &O,
    options: &Options,
    vehicle_id: &Regex,
    scenario: &mut Scenario,
) -> ParkingChanges {
    let mut changes = ParkingChanges::default();
    let context = connected(edges, &SearchQuery::prefix(PARK_STEM, options.parking_depth));
    tracing::debug!(connections = %context.joined(), "parking context");

    if context.any_word(|w| vehicle_id.is_match(w)) {
        tracing::debug!("parked vehicle named explicitly; vehicles untouched");
    } else if !context.is_empty() {
        let lane = detect_travel_lane(&context);
        for vehicle in scenario.vehicles_mut().iter_mut().filter(|v| !v.on_roadway) {
            if lane.is_some() {
                vehicle.travel_lane = lane;
            }
            vehicle.on_roadway = true;
            changes.vehicles_placed += 1;
            tracing::debug!(vehicle = %vehicle.id, lane = ?vehicle.travel_lane, "parked vehicle placed on roadway");
        }
    }

    for edge in edges.iter().filter(|e| e.label.starts_with(SIDE_OF_LABEL)) {
        let Some(side) = edge.tokens().into_iter().find(|t| t.norm.starts_with(SIDE_STEM)) else {
            continue;
        };
        for road in edge.tokens().into_iter().filter(|t| ontology.is_road_type(&t.norm)) {
            if mark_parking_line(edges, side, road, options, scenario) {
                changes.streets_marked += 1;
            }
        }
    }

    changes
}

/// Street a parking description refers to.
///
/// With one street there is no ambiguity. With several, the road-type word
/// must pick out exactly one of them.
pub fn resolve_parked_street(scenario: &Scenario, road_word: &str) -> Option<StreetId> {
    if let Some(id) = scenario.sole_street() {
        return Some(id);
    }

    let mut matching = scenario.street_ids().filter(|&id| scenario[id].road_type.as_deref() == Some(road_word));
    match (matching.next(), matching.next()) {
        (Some(id), None) => Some(id),
        _ => None,
    }
}

fn mark_parking_line(edges: &[Edge], side: &Token, road: &Token, options: &Options, scenario: &mut Scenario) -> bool {
    let side_context = connected(edges, &SearchQuery::prefix(SIDE_STEM, options.side_depth));
    let Some(line_word) = side_context.words().find(|w| is_park_line_word(w)) else {
        return false;
    };

    let line_context = connected(edges, &SearchQuery::exact(line_word, options.line_depth));
    if !line_context.any_word(is_car_word) {
        tracing::debug!(side = %side, line = line_word, "parking line without cars");
        return false;
    }

    let Some(id) = resolve_parked_street(scenario, &road.norm) else {
        tracing::debug!(road = %road, streets = scenario.len(), "no unique street for parking line");
        return false;
    };

    let observed = match (side_context.any_word(|w| w == "left"), side_context.any_word(|w| w == "right")) {
        (true, true) => Some(ParkLineSide::Both),
        (false, true) => Some(ParkLineSide::Right),
        (true, false) => Some(ParkLineSide::Left),
        (false, false) => None,
    };

    let street = &mut scenario[id];
    street.park_line_filled = Some(true);
    street.park_line_side = Some(match observed {
        Some(side) => ParkLineSide::merge(street.park_line_side, side),
        None => match street.park_line_side {
            None | Some(ParkLineSide::NoLine) => ParkLineSide::Both,
            Some(side) => side,
        },
    });

    tracing::debug!(street = id.index(), side = ?street.park_line_side, "parking line filled with cars");
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependency::parse_relations;
    use crate::model::Vehicle;
    use crate::ontology::{CATEGORY_ROAD_TYPE, Concept, ConceptTable};

    fn ontology() -> ConceptTable {
        [Concept::new("street", CATEGORY_ROAD_TYPE), Concept::new("road", CATEGORY_ROAD_TYPE)].into_iter().collect()
    }

    fn vehicle_id() -> Regex {
        Regex::new(&Options::default().vehicle_id_pattern).unwrap()
    }

    fn lined_street(qualifier: Option<&str>) -> Vec<Edge> {
        // [The right] side of the street was lined with parked cars.
        let mut relations = vec![
            "nsubjpass(lined-8, side-3)",
            "case(street-6, of-4)",
            "det(street-6, the-5)",
            "nmod:of(side-3, street-6)",
            "auxpass(lined-8, was-7)",
            "case(cars-11, with-9)",
            "amod(cars-11, parked-10)",
            "nmod:with(lined-8, cars-11)",
        ];
        if let Some(q) = qualifier {
            relations.push(match q {
                "left" => "amod(side-3, left-2)",
                _ => "amod(side-3, right-2)",
            });
        }
        parse_relations(relations)
    }

    fn one_street() -> Scenario {
        let mut scenario = Scenario::with_vehicles(vec![Vehicle::new("v1"), Vehicle::new("v2")]);
        scenario.create_street();
        scenario
    }

    #[test]
    fn lined_with_cars_defaults_to_both_sides() {
        let mut scenario = one_street();
        let changes = extract_parking_config(&lined_street(None), &ontology(), &Options::default(), &vehicle_id(), &mut scenario);

        assert_eq!(changes.streets_marked, 1);
        let street = &scenario.streets()[0];
        assert_eq!(street.park_line_filled, Some(true));
        assert_eq!(street.park_line_side, Some(ParkLineSide::Both));
    }

    #[test]
    fn cars_along_an_unlined_street_line_both_sides() {
        let mut scenario = Scenario::new();
        let id = scenario.create_street();
        scenario[id].park_line_side = Some(ParkLineSide::NoLine);

        extract_parking_config(&lined_street(None), &ontology(), &Options::default(), &vehicle_id(), &mut scenario);

        assert_eq!(scenario[id].park_line_filled, Some(true));
        assert_eq!(scenario[id].park_line_side, Some(ParkLineSide::Both));
    }

    #[test]
    fn qualifier_narrows_then_escalates() {
        let mut scenario = one_street();
        let (options, ids, onto) = (Options::default(), vehicle_id(), ontology());

        extract_parking_config(&lined_street(Some("right")), &onto, &options, &ids, &mut scenario);
        assert_eq!(scenario.streets()[0].park_line_side, Some(ParkLineSide::Right));

        extract_parking_config(&lined_street(Some("left")), &onto, &options, &ids, &mut scenario);
        assert_eq!(scenario.streets()[0].park_line_side, Some(ParkLineSide::Both));
    }

    #[test]
    fn parked_vehicles_move_onto_roadway() {
        let mut scenario = one_street();
        let edges = parse_relations(["nsubjpass(parked-3, car-2)", "nmod:in(parked-3, lane-6)", "amod(lane-6, second-5)"]);
        let changes = extract_parking_config(&edges, &ontology(), &Options::default(), &vehicle_id(), &mut scenario);

        assert_eq!(changes.vehicles_placed, 2);
        assert!(scenario.vehicles().iter().all(|v| v.on_roadway && v.travel_lane == Some(2)));
        assert_eq!(changes.streets_marked, 0);
    }

    #[test]
    fn named_vehicle_leaves_vehicles_alone() {
        let mut scenario = one_street();
        let edges = parse_relations(["nsubjpass(parked-3, V1-1)", "nmod:at(parked-3, curb-6)"]);
        let changes = extract_parking_config(&edges, &ontology(), &Options::default(), &vehicle_id(), &mut scenario);

        assert_eq!(changes.vehicles_placed, 0);
        assert!(scenario.vehicles().iter().all(|v| !v.on_roadway));
    }

    #[test]
    fn on_roadway_vehicles_keep_their_lane() {
        let mut scenario = one_street();
        scenario.vehicles_mut()[0].on_roadway = true;
        scenario.vehicles_mut()[0].travel_lane = Some(3);

        let edges = parse_relations(["nmod:along(parked-3, curb-6)"]);
        extract_parking_config(&edges, &ontology(), &Options::default(), &vehicle_id(), &mut scenario);

        assert_eq!(scenario.vehicles()[0].travel_lane, Some(3));
        assert_eq!(scenario.vehicles()[1].travel_lane, Some(1));
    }

    #[test]
    fn parked_street_resolution() {
        let mut scenario = Scenario::new();
        assert_eq!(resolve_parked_street(&scenario, "street"), None);

        let a = scenario.create_street();
        assert_eq!(resolve_parked_street(&scenario, "anything"), Some(a));

        let b = scenario.create_street();
        scenario[a].road_type = Some("road".to_string());
        scenario[b].road_type = Some("street".to_string());
        assert_eq!(resolve_parked_street(&scenario, "street"), Some(b));

        scenario[a].road_type = Some("street".to_string());
        assert_eq!(resolve_parked_street(&scenario, "street"), None);
    }

    #[test]
    fn ambiguous_street_is_a_no_op() {
        let mut scenario = Scenario::new();
        scenario.create_street();
        scenario.create_street();
        let changes = extract_parking_config(&lined_street(None), &ontology(), &Options::default(), &vehicle_id(), &mut scenario);

        assert_eq!(changes.streets_marked, 0);
        assert!(scenario.streets().iter().all(|s| s.park_line_filled.is_none()));
    }
}
