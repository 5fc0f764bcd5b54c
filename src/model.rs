//! Road-network entities produced by the engine.
//!
//! A [`Scenario`] owns two insertion-ordered collections: the [`Street`]s the
//! engine creates and fills, and the [`Vehicle`]s supplied by the caller.
//! Creation order is part of the contract: "first street with an empty slot"
//! tie-breaks walk the streets in the order they were created.
//!
//! Street attributes are typed (`Option<Cardinal>`, `Option<u32>`, ...). The
//! legacy key/value view used by scenario consumers is still available via
//! [`Street::property`] / [`Street::set_property`]:
//!
//! ```text
//! road_navigation       N | S | E | W
//! lane_num              decimal
//! road_type             concept name
//! is_single_road_piece  T | F
//! road_park_line        0 none | 1 left | 2 right | 3 both
//! road_park_line_fill   1 | 0
//! ```
//!
//! An unset slot reads as `""` through that view.

use crate::error::{AnalyzerError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Index, IndexMut};

pub const KEY_NAVIGATION: &str = "road_navigation";
pub const KEY_LANE_COUNT: &str = "lane_num";
pub const KEY_ROAD_TYPE: &str = "road_type";
pub const KEY_JUNCTION_ROLE: &str = "is_single_road_piece";
pub const KEY_PARK_LINE: &str = "road_park_line";
pub const KEY_PARK_LINE_FILL: &str = "road_park_line_fill";

// --- Attribute value types ---------------------------------------------------

/// Cardinal direction of a street segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cardinal {
    #[serde(rename = "N")]
    North,
    #[serde(rename = "S")]
    South,
    #[serde(rename = "E")]
    East,
    #[serde(rename = "W")]
    West,
}

/// The two physical axes a street can run along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    NorthSouth,
    EastWest,
}

impl Cardinal {
    pub fn code(self) -> &'static str {
        match self {
            Cardinal::North => "N",
            Cardinal::South => "S",
            Cardinal::East => "E",
            Cardinal::West => "W",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "N" => Some(Cardinal::North),
            "S" => Some(Cardinal::South),
            "E" => Some(Cardinal::East),
            "W" => Some(Cardinal::West),
            _ => None,
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Cardinal::North | Cardinal::South => Axis::NorthSouth,
            Cardinal::East | Cardinal::West => Axis::EastWest,
        }
    }

    /// True when both directions describe travel along the same road axis,
    /// e.g. "north" and "southbound".
    pub fn same_axis(self, other: Cardinal) -> bool {
        self.axis() == other.axis()
    }
}

impl fmt::Display for Cardinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Role of a street at a junction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JunctionRole {
    /// Ends at (or crosses into) the junction.
    #[serde(rename = "T")]
    Terminating,
    /// The main road that continues through the junction.
    #[serde(rename = "F")]
    Continuous,
}

impl JunctionRole {
    pub fn code(self) -> &'static str {
        match self {
            JunctionRole::Terminating => "T",
            JunctionRole::Continuous => "F",
        }
    }
}

/// Which kerb(s) of a street carry a parking line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParkLineSide {
    #[serde(rename = "none")]
    NoLine,
    Left,
    Right,
    Both,
}

impl ParkLineSide {
    pub fn code(self) -> u8 {
        match self {
            ParkLineSide::NoLine => 0,
            ParkLineSide::Left => 1,
            ParkLineSide::Right => 2,
            ParkLineSide::Both => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(ParkLineSide::NoLine),
            1 => Some(ParkLineSide::Left),
            2 => Some(ParkLineSide::Right),
            3 => Some(ParkLineSide::Both),
            _ => None,
        }
    }

    /// Combine the current side with newly observed side evidence.
    ///
    /// ```text
    /// current      evidence   result
    /// unset/none   L or R     L or R
    /// both         L or R     L or R   (narrowing)
    /// L            R          both
    /// R            L          both
    /// any          both       both
    /// ```
    pub fn merge(current: Option<ParkLineSide>, observed: ParkLineSide) -> ParkLineSide {
        match (current, observed) {
            (_, ParkLineSide::Both) => ParkLineSide::Both,
            (_, ParkLineSide::NoLine) => current.unwrap_or(ParkLineSide::NoLine),
            (None | Some(ParkLineSide::NoLine) | Some(ParkLineSide::Both), side) => side,
            (Some(existing), side) if existing == side => side,
            (Some(_), _) => ParkLineSide::Both,
        }
    }
}

// --- Street ------------------------------------------------------------------

/// Stable handle to a street inside its owning [`Scenario`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StreetId(usize);

impl StreetId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A modelled road segment. Every attribute starts unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Street {
    pub navigation: Option<Cardinal>,
    pub lane_count: Option<u32>,
    pub road_type: Option<String>,
    pub junction_role: Option<JunctionRole>,
    pub park_line_side: Option<ParkLineSide>,
    pub park_line_filled: Option<bool>,
    /// Extension fields not covered by the typed slots.
    pub extra: BTreeMap<String, String>,
}

impl Street {
    /// Read a property through the legacy string view; unset slots read as `""`.
    pub fn property(&self, key: &str) -> String {
        match key {
            KEY_NAVIGATION => self.navigation.map(|c| c.code().to_string()).unwrap_or_default(),
            KEY_LANE_COUNT => self.lane_count.map(|n| n.to_string()).unwrap_or_default(),
            KEY_ROAD_TYPE => self.road_type.clone().unwrap_or_default(),
            KEY_JUNCTION_ROLE => self.junction_role.map(|r| r.code().to_string()).unwrap_or_default(),
            KEY_PARK_LINE => self.park_line_side.map(|s| s.code().to_string()).unwrap_or_default(),
            KEY_PARK_LINE_FILL => self.park_line_filled.map(|f| if f { "1" } else { "0" }.to_string()).unwrap_or_default(),
            other => self.extra.get(other).cloned().unwrap_or_default(),
        }
    }

    /// Write a property through the legacy string view.
    ///
    /// An empty `value` clears the slot. Unknown keys land in [`Street::extra`].
    pub fn set_property(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            KEY_NAVIGATION => {
                self.navigation = parse_slot(KEY_NAVIGATION, value, Cardinal::from_code)?;
            }
            KEY_LANE_COUNT => {
                self.lane_count = parse_slot(KEY_LANE_COUNT, value, |v| v.parse::<u32>().ok())?;
            }
            KEY_ROAD_TYPE => {
                self.road_type = if value.is_empty() { None } else { Some(value.to_string()) };
            }
            KEY_JUNCTION_ROLE => {
                self.junction_role = parse_slot(KEY_JUNCTION_ROLE, value, |v| match v {
                    "T" => Some(JunctionRole::Terminating),
                    "F" => Some(JunctionRole::Continuous),
                    _ => None,
                })?;
            }
            KEY_PARK_LINE => {
                self.park_line_side =
                    parse_slot(KEY_PARK_LINE, value, |v| v.parse::<u8>().ok().and_then(ParkLineSide::from_code))?;
            }
            KEY_PARK_LINE_FILL => {
                self.park_line_filled = parse_slot(KEY_PARK_LINE_FILL, value, |v| match v {
                    "1" | "true" => Some(true),
                    "0" | "false" => Some(false),
                    _ => None,
                })?;
            }
            other => {
                if value.is_empty() {
                    self.extra.remove(other);
                } else {
                    self.extra.insert(other.to_string(), value.to_string());
                }
            }
        }
        Ok(())
    }

    /// All properties in the legacy string view, known keys first.
    pub fn properties(&self) -> BTreeMap<String, String> {
        let mut out: BTreeMap<String, String> =
            [KEY_NAVIGATION, KEY_LANE_COUNT, KEY_ROAD_TYPE, KEY_JUNCTION_ROLE, KEY_PARK_LINE, KEY_PARK_LINE_FILL]
                .into_iter()
                .map(|k| (k.to_string(), self.property(k)))
                .collect();
        out.extend(self.extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        out
    }
}

fn parse_slot<T>(key: &'static str, value: &str, parse: impl FnOnce(&str) -> Option<T>) -> Result<Option<T>> {
    if value.is_empty() {
        return Ok(None);
    }
    parse(value).map(Some).ok_or_else(|| AnalyzerError::InvalidProperty { key, value: value.to_string() })
}

// --- Vehicle -----------------------------------------------------------------

/// A vehicle taking part in the scenario. Supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    /// `false` means the vehicle sits off the carriageway (sidewalk, lot).
    #[serde(default)]
    pub on_roadway: bool,
    #[serde(default)]
    pub travel_lane: Option<u32>,
}

impl Vehicle {
    pub fn new(id: impl Into<String>) -> Self {
        Vehicle { id: id.into(), on_roadway: false, travel_lane: None }
    }
}

// --- Scenario ----------------------------------------------------------------

/// Per-scenario aggregate: the sole owner and factory of streets.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Scenario {
    streets: Vec<Street>,
    vehicles: Vec<Vehicle>,
}

impl Scenario {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vehicles(vehicles: Vec<Vehicle>) -> Self {
        Scenario { streets: Vec::new(), vehicles }
    }

    /// Append a fresh street with every slot unset.
    pub fn create_street(&mut self) -> StreetId {
        self.streets.push(Street::default());
        StreetId(self.streets.len() - 1)
    }

    pub fn streets(&self) -> &[Street] {
        &self.streets
    }

    pub fn street_ids(&self) -> impl Iterator<Item = StreetId> + use<> {
        (0..self.streets.len()).map(StreetId)
    }

    pub fn len(&self) -> usize {
        self.streets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streets.is_empty()
    }

    /// First street, in creation order, that satisfies `pred`.
    ///
    /// This is the tie-break used whenever the engine needs "a street with an
    /// empty slot": the earliest created one wins.
    pub fn first_street_where(&self, pred: impl Fn(&Street) -> bool) -> Option<StreetId> {
        self.streets.iter().position(pred).map(StreetId)
    }

    /// The only street in the scenario, if there is exactly one.
    pub fn sole_street(&self) -> Option<StreetId> {
        if self.streets.len() == 1 { Some(StreetId(0)) } else { None }
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn vehicles_mut(&mut self) -> &mut [Vehicle] {
        &mut self.vehicles
    }

    pub fn add_vehicle(&mut self, vehicle: Vehicle) {
        self.vehicles.push(vehicle);
    }
}

impl Index<StreetId> for Scenario {
    type Output = Street;

    fn index(&self, id: StreetId) -> &Street {
        &self.streets[id.0]
    }
}

impl IndexMut<StreetId> for Scenario {
    fn index_mut(&mut self, id: StreetId) -> &mut Street {
        &mut self.streets[id.0]
    }
}
