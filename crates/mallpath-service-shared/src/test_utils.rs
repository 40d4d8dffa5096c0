//! Test utilities for microservice handler testing.
//!
//! Provides a shared [`AppState`] built from the minimal fixture venue and
//! the coordinates of its waypoints.

use std::path::PathBuf;
use std::sync::OnceLock;

use mallpath_lib::ValidationMode;

use crate::state::AppState;

/// Path to the fixture venue.
pub const TEST_FIXTURE_PATH: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../docs/fixtures/venue_minimal.json"
);

static TEST_STATE: OnceLock<AppState> = OnceLock::new();

/// Get a shared test AppState loaded from the fixture venue.
///
/// # Panics
///
/// Panics if the fixture cannot be loaded, which indicates a broken test
/// setup.
pub fn test_state() -> AppState {
    TEST_STATE
        .get_or_init(|| {
            let path = fixture_venue_path();
            AppState::load(&path, ValidationMode::Strict)
                .unwrap_or_else(|e| panic!("failed to load test fixture from {:?}: {}", path, e))
        })
        .clone()
}

pub fn fixture_venue_path() -> PathBuf {
    PathBuf::from(TEST_FIXTURE_PATH)
}

/// Waypoints of the fixture venue and their coordinates.
///
/// `A`-`B`-`C` form a chain, `X` is isolated, and `Y`-`Z` is a second
/// component.
pub mod fixture_waypoints {
    pub const A: (f64, f64) = (0.0, 0.0);
    pub const B: (f64, f64) = (10.0, 0.0);
    pub const C: (f64, f64) = (20.0, 0.0);
    pub const X: (f64, f64) = (0.0, 100.0);
    pub const Y: (f64, f64) = (100.0, 100.0);
    pub const Z: (f64, f64) = (120.0, 100.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_path_exists() {
        let path = fixture_venue_path();
        assert!(path.exists(), "fixture venue not found at {:?}", path);
    }

    #[test]
    fn test_state_matches_fixture_waypoints() {
        let state = test_state();
        let graph = state.graph();

        assert_eq!(graph.len(), 6);
        let (x, y) = fixture_waypoints::C;
        assert_eq!(
            graph.coordinates("C").unwrap(),
            mallpath_lib::Point::new(x, y)
        );
    }
}
