//! Path planning between two plan coordinates.
//!
//! This module provides:
//! - [`PathRequest`] - Start and end coordinates picked on the venue plan
//! - [`PathPlan`] - Snapped waypoints, the waypoint path, and its coordinates
//! - [`plan_path`] - Main entry point: resolve, search, then render
//!
//! # Example
//!
//! ```
//! use mallpath_lib::{plan_path, PathRequest, Point, ValidationMode, VenueGraph};
//!
//! let graph = VenueGraph::bundled(ValidationMode::Lenient)?;
//! let request = PathRequest::new(Point::new(205.0, 150.0), Point::new(100.0, 55.0));
//! let plan = plan_path(&graph, &request)?;
//! assert_eq!(plan.waypoints, vec!["DS1", "W11"]);
//! # Ok::<(), mallpath_lib::Error>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::graph::{Point, VenueGraph};
use crate::path::shortest_path;
use crate::resolver::{nearest_waypoint, Nearest};

/// High-level path planning request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathRequest {
    pub start: Point,
    pub end: Point,
}

impl PathRequest {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }
}

/// Planned path result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathPlan {
    /// Waypoint the start point snapped to.
    pub start: Nearest,
    /// Waypoint the end point snapped to.
    pub end: Nearest,
    /// Waypoint identifiers from start to end inclusive.
    pub waypoints: Vec<String>,
    /// Coordinates of each entry in `waypoints`.
    pub points: Vec<Point>,
}

impl PathPlan {
    /// Number of edges traversed.
    pub fn hop_count(&self) -> usize {
        self.waypoints.len().saturating_sub(1)
    }
}

/// Compute a path between two plan coordinates.
///
/// Both points are snapped to their nearest positioned waypoint, the
/// fewest-edges path between those waypoints is found, and every waypoint on
/// it is mapped back to coordinates. Fails with
/// [`Error::NoWaypoints`](crate::Error::NoWaypoints) when nothing can be
/// snapped to, [`Error::PathNotFound`](crate::Error::PathNotFound) when the
/// waypoints are disconnected, and
/// [`Error::MissingCoordinates`](crate::Error::MissingCoordinates) when a
/// waypoint on the path has no coordinates. A partial path is never returned.
pub fn plan_path(graph: &VenueGraph, request: &PathRequest) -> Result<PathPlan> {
    let start = nearest_waypoint(graph, request.start)?;
    let end = nearest_waypoint(graph, request.end)?;

    let waypoints = shortest_path(graph, &start.id, &end.id)?;
    let points = waypoints
        .iter()
        .map(|id| graph.coordinates(id))
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(
        start = %start.id,
        end = %end.id,
        hops = waypoints.len().saturating_sub(1),
        "planned path"
    );

    Ok(PathPlan {
        start,
        end,
        waypoints,
        points,
    })
}
