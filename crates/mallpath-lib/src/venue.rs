//! Venue reference data: file format, loading, and validation.
//!
//! Venue data is a JSON document listing every waypoint with its optional
//! plan coordinates and its neighbours. Array order is significant: it fixes
//! the iteration order used for nearest-waypoint tie-breaks and for the order
//! in which breadth-first search expands neighbours.
//!
//! ```json
//! {
//!   "name": "Example Mall",
//!   "waypoints": [
//!     { "id": "DS1", "position": { "x": 200, "y": 150 }, "neighbours": ["MA9"] },
//!     { "id": "MA9", "position": { "x": 250, "y": 200 }, "neighbours": ["DS1"] }
//!   ]
//! }
//! ```

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::Point;

/// Venue reference data compiled into the library.
///
/// The West Mall, Sky Bridge and East Mall table is incomplete: most
/// waypoints have no coordinates and several neighbours are never declared.
/// It only loads in [`ValidationMode::Lenient`].
pub const BUNDLED_VENUE_JSON: &str = include_str!("../data/mall.json");

/// Raw venue data as read from a data file, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct VenueData {
    /// Human-readable venue name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Waypoints in canonical order.
    #[serde(default)]
    pub waypoints: Vec<WaypointRecord>,
}

/// A single waypoint entry in the venue data file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaypointRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    #[serde(default)]
    pub neighbours: Vec<String>,
}

impl WaypointRecord {
    /// Convenience constructor for a positioned waypoint.
    pub fn new<I, S>(id: impl Into<String>, position: Option<Point>, neighbours: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            position,
            neighbours: neighbours.into_iter().map(Into::into).collect(),
        }
    }
}

impl VenueData {
    /// Parse venue data from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let data: VenueData = serde_json::from_str(json)?;
        debug!(
            name = data.name.as_deref().unwrap_or("-"),
            waypoints = data.waypoints.len(),
            "parsed venue data"
        );
        Ok(data)
    }

    /// Read and parse venue data from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::VenueNotFound {
                path: path.to_path_buf(),
            });
        }
        let contents = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), bytes = contents.len(), "loading venue data");
        Self::from_json_str(&contents)
    }

    /// Parse the venue data compiled into the library.
    pub fn bundled() -> Result<Self> {
        Self::from_json_str(BUNDLED_VENUE_JSON)
    }
}

/// How validation findings are treated when building a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Any finding rejects the venue data.
    #[default]
    Strict,
    /// Findings are logged and recorded on the graph; malformed entries are
    /// dropped or kept as described on [`VenueIssue`].
    Lenient,
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            ValidationMode::Strict => "strict",
            ValidationMode::Lenient => "lenient",
        };
        f.write_str(value)
    }
}

impl FromStr for ValidationMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(ValidationMode::Strict),
            "lenient" => Ok(ValidationMode::Lenient),
            _ => Err(Error::UnknownValidationMode {
                value: s.to_string(),
            }),
        }
    }
}

/// A defect found in venue reference data.
///
/// In lenient mode, duplicate declarations keep the first entry, unknown
/// neighbours are dropped from adjacency, non-finite positions are discarded,
/// and asymmetric edges are kept as listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VenueIssue {
    /// The venue declares no waypoints at all.
    Empty,
    /// The same identifier is declared more than once.
    DuplicateWaypoint { waypoint: String },
    /// A waypoint lists itself as a neighbour.
    SelfLoop { waypoint: String },
    /// A waypoint references a neighbour that is never declared.
    UnknownNeighbour { waypoint: String, neighbour: String },
    /// `waypoint` lists `neighbour`, but not the other way round.
    AsymmetricEdge { waypoint: String, neighbour: String },
    /// A declared waypoint has no coordinates.
    MissingPosition { waypoint: String },
    /// A declared waypoint has NaN or infinite coordinates.
    NonFinitePosition { waypoint: String },
}

impl fmt::Display for VenueIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VenueIssue::Empty => write!(f, "venue declares no waypoints"),
            VenueIssue::DuplicateWaypoint { waypoint } => {
                write!(f, "waypoint {waypoint} is declared more than once")
            }
            VenueIssue::SelfLoop { waypoint } => {
                write!(f, "waypoint {waypoint} lists itself as a neighbour")
            }
            VenueIssue::UnknownNeighbour {
                waypoint,
                neighbour,
            } => write!(
                f,
                "waypoint {waypoint} references undeclared neighbour {neighbour}"
            ),
            VenueIssue::AsymmetricEdge {
                waypoint,
                neighbour,
            } => write!(
                f,
                "waypoint {waypoint} lists {neighbour} but {neighbour} does not list {waypoint}"
            ),
            VenueIssue::MissingPosition { waypoint } => {
                write!(f, "waypoint {waypoint} has no coordinates")
            }
            VenueIssue::NonFinitePosition { waypoint } => {
                write!(f, "waypoint {waypoint} has non-finite coordinates")
            }
        }
    }
}

/// Check venue data against the graph invariants.
///
/// Returns every finding in declaration order; an empty vector means the data
/// describes a symmetric graph in which every waypoint has finite coordinates.
pub fn validate(data: &VenueData) -> Vec<VenueIssue> {
    let mut issues = Vec::new();
    if data.waypoints.is_empty() {
        issues.push(VenueIssue::Empty);
        return issues;
    }

    let mut declared: HashMap<&str, &WaypointRecord> = HashMap::new();
    let mut duplicates: HashSet<&str> = HashSet::new();
    for record in &data.waypoints {
        if declared.contains_key(record.id.as_str()) {
            if duplicates.insert(record.id.as_str()) {
                issues.push(VenueIssue::DuplicateWaypoint {
                    waypoint: record.id.clone(),
                });
            }
            continue;
        }
        declared.insert(record.id.as_str(), record);
    }

    for record in &data.waypoints {
        // Only the first declaration of an id counts.
        if !std::ptr::eq(declared[record.id.as_str()], record) {
            continue;
        }

        match record.position {
            None => issues.push(VenueIssue::MissingPosition {
                waypoint: record.id.clone(),
            }),
            Some(position) if !position.is_finite() => {
                issues.push(VenueIssue::NonFinitePosition {
                    waypoint: record.id.clone(),
                })
            }
            Some(_) => {}
        }

        for neighbour in &record.neighbours {
            if neighbour == &record.id {
                issues.push(VenueIssue::SelfLoop {
                    waypoint: record.id.clone(),
                });
                continue;
            }
            match declared.get(neighbour.as_str()) {
                None => issues.push(VenueIssue::UnknownNeighbour {
                    waypoint: record.id.clone(),
                    neighbour: neighbour.clone(),
                }),
                Some(other) if !other.neighbours.contains(&record.id) => {
                    issues.push(VenueIssue::AsymmetricEdge {
                        waypoint: record.id.clone(),
                        neighbour: neighbour.clone(),
                    })
                }
                Some(_) => {}
            }
        }
    }

    issues
}
