//! Nearest-waypoint resolution.
//!
//! Maps an arbitrary plan coordinate to the closest positioned waypoint by
//! Euclidean distance. The scan is linear; venue graphs are small and static.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::graph::{Point, VenueGraph};

/// The waypoint a point snapped to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Nearest {
    pub id: String,
    pub position: Point,
    /// Distance from the input point to the waypoint.
    pub distance: f64,
}

/// Find the positioned waypoint closest to `point`.
///
/// Candidates are scanned in declaration order and only a strictly smaller
/// distance replaces the current best, so the first declared waypoint wins
/// ties.
pub fn nearest_waypoint(graph: &VenueGraph, point: Point) -> Result<Nearest> {
    let mut best: Option<(&str, Point, f64)> = None;

    for (id, position) in graph.positioned() {
        let distance = point.half_distance_to(&position);
        match best {
            Some((_, _, best_distance)) if distance >= best_distance => {}
            _ => best = Some((id, position, distance)),
        }
    }

    best.map(|(id, position, distance)| Nearest {
        id: id.to_string(),
        position,
        distance: distance * 2.0,
    })
    .ok_or(Error::NoWaypoints)
}

/// Identifier of the positioned waypoint closest to `point`.
pub fn resolve_nearest(graph: &VenueGraph, point: Point) -> Result<String> {
    nearest_waypoint(graph, point).map(|nearest| nearest.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::venue::{ValidationMode, VenueData, WaypointRecord};

    fn graph(records: Vec<WaypointRecord>) -> VenueGraph {
        VenueGraph::build(
            VenueData {
                name: None,
                waypoints: records,
            },
            ValidationMode::Lenient,
        )
        .unwrap()
    }

    #[test]
    fn first_declared_waypoint_wins_ties() {
        let graph = graph(vec![
            WaypointRecord::new("L", Some(Point::new(-1.0, 0.0)), Vec::<String>::new()),
            WaypointRecord::new("R", Some(Point::new(1.0, 0.0)), Vec::<String>::new()),
        ]);

        let id = resolve_nearest(&graph, Point::new(0.0, 0.0)).unwrap();
        assert_eq!(id, "L");
    }

    #[test]
    fn waypoints_without_coordinates_are_skipped() {
        let graph = graph(vec![
            WaypointRecord::new("HIDDEN", None, Vec::<String>::new()),
            WaypointRecord::new("SEEN", Some(Point::new(50.0, 50.0)), Vec::<String>::new()),
        ]);

        let nearest = nearest_waypoint(&graph, Point::new(0.0, 0.0)).unwrap();
        assert_eq!(nearest.id, "SEEN");
        assert!((nearest.distance - 50.0 * 2f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn large_finite_coordinates_still_pick_the_closest() {
        let graph = graph(vec![
            WaypointRecord::new("FAR", Some(Point::new(0.0, 0.0)), Vec::<String>::new()),
            WaypointRecord::new("NEAR", Some(Point::new(9e199, 0.0)), Vec::<String>::new()),
        ]);

        let nearest = nearest_waypoint(&graph, Point::new(1e200, 0.0)).unwrap();
        assert_eq!(nearest.id, "NEAR");
        assert!(nearest.distance.is_finite());
        assert!((nearest.distance - 1e199).abs() <= 1e185);
    }

    #[test]
    fn opposite_extremes_do_not_overflow_the_comparison() {
        let graph = graph(vec![
            WaypointRecord::new("WEST", Some(Point::new(-1e308, 0.0)), Vec::<String>::new()),
            WaypointRecord::new("EAST", Some(Point::new(1e308, 0.0)), Vec::<String>::new()),
        ]);

        let id = resolve_nearest(&graph, Point::new(9e307, 0.0)).unwrap();
        assert_eq!(id, "EAST");
    }

    #[test]
    fn empty_coordinate_set_is_an_error() {
        let graph = graph(vec![WaypointRecord::new(
            "ONLY",
            None,
            Vec::<String>::new(),
        )]);
        let error = resolve_nearest(&graph, Point::new(0.0, 0.0)).unwrap_err();
        assert!(matches!(error, Error::NoWaypoints));

        let empty = VenueGraph::default();
        assert!(matches!(
            resolve_nearest(&empty, Point::new(1.0, 1.0)),
            Err(Error::NoWaypoints)
        ));
    }
}
