//! Mallpath library entry points.
//!
//! This crate loads and validates venue reference data, builds the immutable
//! waypoint graph, snaps arbitrary plan coordinates to their nearest waypoint,
//! and runs breadth-first pathfinding between waypoints. Higher-level
//! consumers (CLI, HTTP service) should only depend on the functions exported
//! here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod error;
pub mod graph;
pub mod path;
pub mod resolver;
pub mod routing;
pub mod venue;

pub use error::{Error, Result};
pub use graph::{Point, VenueGraph, Waypoint};
pub use path::{find_path, shortest_path};
pub use resolver::{nearest_waypoint, resolve_nearest, Nearest};
pub use routing::{plan_path, PathPlan, PathRequest};
pub use venue::{
    validate, ValidationMode, VenueData, VenueIssue, WaypointRecord, BUNDLED_VENUE_JSON,
};
