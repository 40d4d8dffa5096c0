//! Health check handlers for Kubernetes probes.
//!
//! Provides `/health/live` and `/health/ready` endpoints that return JSON
//! status responses for Kubernetes liveness and readiness probes.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Health status response for liveness and readiness probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Status indicator: "ok" or "not_ready: <reason>".
    pub status: String,

    /// Service name for identification.
    pub service: String,

    /// Service version from build-time.
    pub version: String,

    /// Number of waypoints in the venue graph (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waypoints_loaded: Option<usize>,

    /// Number of waypoints that points can snap to (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub positioned_waypoints: Option<usize>,

    /// Validation findings tolerated at load time (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue_issues: Option<usize>,
}

impl HealthStatus {
    /// Create a healthy liveness status.
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            waypoints_loaded: None,
            positioned_waypoints: None,
            venue_issues: None,
        }
    }

    /// Create a ready status with venue information.
    pub fn ready(
        service: &str,
        version: &str,
        waypoints: usize,
        positioned: usize,
        issues: usize,
    ) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            waypoints_loaded: Some(waypoints),
            positioned_waypoints: Some(positioned),
            venue_issues: Some(issues),
        }
    }

    /// Create a not-ready status.
    pub fn not_ready(service: &str, version: &str, reason: &str) -> Self {
        Self {
            status: format!("not_ready: {}", reason),
            service: service.to_string(),
            version: version.to_string(),
            waypoints_loaded: None,
            positioned_waypoints: None,
            venue_issues: None,
        }
    }
}

/// Liveness probe handler.
///
/// Returns 200 OK if the service is running. This is a simple check that does
/// not depend on the venue graph.
///
/// ```text
/// GET /health/live
/// {"status":"ok","service":"mallpath-service-shared","version":"0.1.0"}
/// ```
pub async fn health_live() -> impl IntoResponse {
    let status = HealthStatus::alive(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// Readiness probe handler.
///
/// Returns 200 OK when at least one waypoint carries coordinates; otherwise
/// no request could be resolved and the probe reports 503.
///
/// ```text
/// GET /health/ready
/// {"status":"ok","service":"mallpath-service-shared","version":"0.1.0","waypoints_loaded":29,"positioned_waypoints":3,"venue_issues":30}
/// ```
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let service = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    let graph = state.graph();
    let positioned = state.positioned_count();

    if positioned == 0 {
        let status = HealthStatus::not_ready(service, version, "no positioned waypoints loaded");
        return (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response();
    }

    let status = HealthStatus::ready(
        service,
        version,
        graph.len(),
        positioned,
        graph.issues().len(),
    );
    (StatusCode::OK, Json(status)).into_response()
}
