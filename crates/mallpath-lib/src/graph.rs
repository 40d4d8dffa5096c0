use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::venue::{validate, ValidationMode, VenueData, VenueIssue};

/// Plan coordinates, in the same units as the venue floor plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Half the Euclidean distance to another point.
    ///
    /// Finite for any pair of finite points, so it orders candidates correctly
    /// even where the full distance would overflow.
    pub fn half_distance_to(&self, other: &Self) -> f64 {
        let dx = self.x / 2.0 - other.x / 2.0;
        let dy = self.y / 2.0 - other.y / 2.0;
        dx.hypot(dy)
    }

    /// Calculate the Euclidean distance to another point.
    pub fn distance_to(&self, other: &Self) -> f64 {
        self.half_distance_to(other) * 2.0
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A named node in the venue graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    pub id: String,
    pub position: Option<Point>,
    pub neighbours: Vec<String>,
}

/// Immutable waypoint graph used by the resolver and pathfinding.
///
/// Cloning is cheap; the waypoint table is shared behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct VenueGraph {
    name: Option<String>,
    waypoints: Arc<Vec<Waypoint>>,
    index: Arc<HashMap<String, usize>>,
    issues: Arc<Vec<VenueIssue>>,
}

impl VenueGraph {
    /// Validate venue data and build the graph.
    ///
    /// In [`ValidationMode::Strict`] any finding fails with
    /// [`Error::InvalidVenue`]. In [`ValidationMode::Lenient`] findings are
    /// logged, kept on the graph (see [`VenueGraph::issues`]), and malformed
    /// entries are dropped.
    pub fn build(data: VenueData, mode: ValidationMode) -> Result<Self> {
        let issues = validate(&data);
        if !issues.is_empty() {
            match mode {
                ValidationMode::Strict => return Err(Error::InvalidVenue { issues }),
                ValidationMode::Lenient => {
                    for issue in &issues {
                        warn!(%issue, "venue data issue");
                    }
                }
            }
        }

        let mut waypoints: Vec<Waypoint> = Vec::with_capacity(data.waypoints.len());
        let mut index: HashMap<String, usize> = HashMap::new();
        for record in data.waypoints {
            if index.contains_key(&record.id) {
                continue;
            }
            index.insert(record.id.clone(), waypoints.len());
            waypoints.push(Waypoint {
                id: record.id,
                position: record.position.filter(Point::is_finite),
                neighbours: record.neighbours,
            });
        }

        for waypoint in &mut waypoints {
            let own_id = waypoint.id.clone();
            waypoint
                .neighbours
                .retain(|neighbour| *neighbour != own_id && index.contains_key(neighbour));
        }

        debug!(
            waypoints = waypoints.len(),
            positioned = waypoints.iter().filter(|w| w.position.is_some()).count(),
            issues = issues.len(),
            %mode,
            "built venue graph"
        );

        Ok(Self {
            name: data.name,
            waypoints: Arc::new(waypoints),
            index: Arc::new(index),
            issues: Arc::new(issues),
        })
    }

    /// Parse and build the venue compiled into the library.
    pub fn bundled(mode: ValidationMode) -> Result<Self> {
        Self::build(VenueData::bundled()?, mode)
    }

    /// Venue name from the data file, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Return the neighbours for a given waypoint identifier.
    ///
    /// Unknown identifiers behave as isolated waypoints.
    pub fn neighbours(&self, id: &str) -> &[String] {
        self.waypoint(id)
            .map(|waypoint| waypoint.neighbours.as_slice())
            .unwrap_or(&[])
    }

    /// Return the coordinates registered for a waypoint.
    pub fn coordinates(&self, id: &str) -> Result<Point> {
        self.waypoint(id)
            .and_then(|waypoint| waypoint.position)
            .ok_or_else(|| Error::MissingCoordinates {
                waypoint: id.to_string(),
            })
    }

    /// Lookup a waypoint by its case-sensitive identifier.
    pub fn waypoint(&self, id: &str) -> Option<&Waypoint> {
        self.index.get(id).map(|&slot| &self.waypoints[slot])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All waypoints in declaration order.
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Waypoints that carry coordinates, in declaration order.
    pub fn positioned(&self) -> impl Iterator<Item = (&str, Point)> + '_ {
        self.waypoints
            .iter()
            .filter_map(|waypoint| waypoint.position.map(|pos| (waypoint.id.as_str(), pos)))
    }

    /// Findings recorded while building in lenient mode.
    pub fn issues(&self) -> &[VenueIssue] {
        &self.issues
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::venue::WaypointRecord;

    fn chain() -> VenueData {
        VenueData {
            name: Some("chain".to_string()),
            waypoints: vec![
                WaypointRecord::new("A", Some(Point::new(0.0, 0.0)), ["B"]),
                WaypointRecord::new("B", Some(Point::new(3.0, 4.0)), ["A"]),
            ],
        }
    }

    #[test]
    fn distance_helpers_agree() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.half_distance_to(&b), 2.5);
        assert_eq!(a.distance_to(&b), 5.0);
    }

    #[test]
    fn strict_build_keeps_declaration_order() {
        let graph = VenueGraph::build(chain(), ValidationMode::Strict).unwrap();
        let ids: Vec<_> = graph.waypoints().iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
        assert_eq!(graph.name(), Some("chain"));
        assert!(graph.issues().is_empty());
    }

    #[test]
    fn lenient_build_drops_undeclared_neighbours() {
        let mut data = chain();
        data.waypoints[0].neighbours.push("GHOST".to_string());
        data.waypoints
            .push(WaypointRecord::new("C", None, Vec::<String>::new()));

        let graph = VenueGraph::build(data, ValidationMode::Lenient).unwrap();
        assert_eq!(graph.neighbours("A"), ["B".to_string()]);
        assert_eq!(graph.issues().len(), 2);
        assert!(graph.contains("C"));
        assert!(matches!(
            graph.coordinates("C"),
            Err(Error::MissingCoordinates { .. })
        ));
    }

    #[test]
    fn unknown_ids_are_isolated() {
        let graph = VenueGraph::build(chain(), ValidationMode::Strict).unwrap();
        assert!(graph.neighbours("nowhere").is_empty());
        assert!(!graph.contains("nowhere"));
        assert!(graph.coordinates("nowhere").is_err());
    }
}
