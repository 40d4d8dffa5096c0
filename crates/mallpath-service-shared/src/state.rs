//! Application state for HTTP microservices.
//!
//! This module provides the shared state structure that axum handlers use to
//! access the loaded venue graph.

use std::path::Path;
use std::sync::Arc;

use mallpath_lib::{Error as LibError, ValidationMode, VenueData, VenueGraph};

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// Failed to read, parse or validate the venue data.
    VenueLoad(LibError),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VenueLoad(e) => write!(f, "failed to load venue: {}", e),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::VenueLoad(e) => Some(e),
        }
    }
}

impl From<LibError> for AppStateError {
    fn from(err: LibError) -> Self {
        Self::VenueLoad(err)
    }
}

/// Shared application state for all axum handlers.
///
/// This struct is cheaply cloneable (using `Arc` internally) and should be
/// shared via axum's `State` extractor. The graph is read-only, so handlers
/// never need to lock it.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, routing::post, extract::State};
/// use mallpath_lib::ValidationMode;
/// use mallpath_service_shared::AppState;
///
/// async fn handler(State(state): State<AppState>) {
///     let graph = state.graph();
///     // ... use graph
/// }
///
/// let state = AppState::load("path/to/venue.json", ValidationMode::Strict).unwrap();
/// let app = Router::new()
///     .route("/find-path", post(handler))
///     .with_state(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    graph: VenueGraph,
    mode: ValidationMode,
}

impl AppState {
    /// Load application state from a venue data file.
    ///
    /// # Arguments
    ///
    /// * `venue_path` - Path to the venue JSON file
    /// * `mode` - How validation findings are treated
    pub fn load(venue_path: impl AsRef<Path>, mode: ValidationMode) -> Result<Self, AppStateError> {
        let venue_path = venue_path.as_ref();
        tracing::info!(path = %venue_path.display(), %mode, "loading venue");
        let data = VenueData::from_path(venue_path)?;
        Self::build(data, mode)
    }

    /// Load application state from the venue compiled into the library.
    pub fn bundled(mode: ValidationMode) -> Result<Self, AppStateError> {
        tracing::info!(%mode, "loading bundled venue");
        Self::build(VenueData::bundled()?, mode)
    }

    fn build(data: VenueData, mode: ValidationMode) -> Result<Self, AppStateError> {
        let graph = VenueGraph::build(data, mode)?;
        tracing::info!(
            waypoints = graph.len(),
            issues = graph.issues().len(),
            "venue loaded successfully"
        );
        Ok(Self::from_graph(graph, mode))
    }

    /// Create application state from a pre-built graph.
    ///
    /// This is useful for testing or when the graph is assembled in code.
    pub fn from_graph(graph: VenueGraph, mode: ValidationMode) -> Self {
        Self {
            inner: Arc::new(AppStateInner { graph, mode }),
        }
    }

    /// Access the loaded venue graph.
    pub fn graph(&self) -> &VenueGraph {
        &self.inner.graph
    }

    /// Validation mode the graph was built with.
    pub fn validation_mode(&self) -> ValidationMode {
        self.inner.mode
    }

    /// Number of waypoints that carry coordinates.
    pub fn positioned_count(&self) -> usize {
        self.inner.graph.positioned().count()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("waypoint_count", &self.inner.graph.len())
            .field("issue_count", &self.inner.graph.issues().len())
            .field("validation_mode", &self.inner.mode)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mallpath_lib::{Point, WaypointRecord};

    fn minimal_graph() -> VenueGraph {
        let data = VenueData {
            name: Some("Test".to_string()),
            waypoints: vec![WaypointRecord::new(
                "ONLY",
                Some(Point::new(0.0, 0.0)),
                Vec::<String>::new(),
            )],
        };
        VenueGraph::build(data, ValidationMode::Strict).unwrap()
    }

    #[test]
    fn test_app_state_from_graph() {
        let state = AppState::from_graph(minimal_graph(), ValidationMode::Strict);

        assert_eq!(state.graph().len(), 1);
        assert_eq!(state.positioned_count(), 1);
        assert_eq!(state.validation_mode(), ValidationMode::Strict);
    }

    #[test]
    fn test_app_state_clone() {
        let state1 = AppState::from_graph(minimal_graph(), ValidationMode::Strict);
        let state2 = state1.clone();

        assert!(Arc::ptr_eq(&state1.inner, &state2.inner));
    }

    #[test]
    fn test_app_state_debug() {
        let state = AppState::from_graph(minimal_graph(), ValidationMode::Lenient);
        let debug = format!("{:?}", state);

        assert!(debug.contains("AppState"));
        assert!(debug.contains("waypoint_count"));
        assert!(debug.contains("Lenient"));
    }

    #[test]
    fn test_app_state_load_nonexistent() {
        let err = AppState::load("/nonexistent/path/to/venue.json", ValidationMode::Strict)
            .unwrap_err();

        match &err {
            AppStateError::VenueLoad(LibError::VenueNotFound { path }) => {
                assert!(path.ends_with("venue.json"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(err.to_string().contains("/nonexistent/path/to/venue.json"));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_bundled_state_requires_lenient_mode() {
        assert!(matches!(
            AppState::bundled(ValidationMode::Strict),
            Err(AppStateError::VenueLoad(LibError::InvalidVenue { .. }))
        ));

        let state = AppState::bundled(ValidationMode::Lenient).unwrap();
        assert_eq!(state.positioned_count(), 3);
    }
}
