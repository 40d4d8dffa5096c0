//! Mall pathfinding HTTP microservice.
//!
//! Snaps two plan coordinates to their nearest waypoints and returns the
//! fewest-hops walking path between them as a list of coordinates.
//!
//! # Endpoints
//!
//! - `POST /find-path` - Compute a path between two points
//! - `GET /metrics` - Prometheus metrics endpoint
//! - `GET /health/live` - Kubernetes liveness probe
//! - `GET /health/ready` - Kubernetes readiness probe
//!
//! # Configuration
//!
//! - `MALLPATH_VENUE_PATH` - Venue JSON file (default: the bundled venue)
//! - `MALLPATH_VALIDATION` - `strict` (default) or `lenient`
//! - `SERVICE_PORT` - HTTP port (default: 5000)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `METRICS_ENABLED`, `METRICS_PATH` - Prometheus exporter settings

use std::env;
use std::net::SocketAddr;

use axum::{
    Extension, Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Serialize;
use tracing::{error, info, warn};

use mallpath_lib::{Point, ValidationMode, plan_path};
use mallpath_service_shared::{
    AppState, FindPathRequest, LoggingConfig, MetricsConfig, MetricsLayer, ProblemDetails,
    RequestId, ServiceResponse, cors_layer, failure_reason, from_lib_error, health_live,
    health_ready, init_logging, init_metrics, metrics_handler, record_path_calculated,
    record_path_failed, record_path_hops, record_snap_distance,
};

const SERVICE: &str = "path";
const DEFAULT_PORT: u16 = 5000;

/// Path response returned to the caller.
#[derive(Debug, Serialize)]
struct FindPathResponse {
    /// Coordinates to draw, start to end inclusive.
    path: Vec<Point>,
    /// Waypoint identifiers matching `path`.
    waypoints: Vec<String>,
    /// Number of edges walked.
    hops: usize,
}

/// HTTP response - either success or RFC 9457 error.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Response {
    Success(ServiceResponse<FindPathResponse>),
    Error(ProblemDetails),
}

impl IntoResponse for Response {
    fn into_response(self) -> axum::response::Response {
        match self {
            Response::Success(data) => (StatusCode::OK, Json(data)).into_response(),
            Response::Error(problem) => problem.into_response(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_config = LoggingConfig::from_env().with_service(SERVICE);
    init_logging(&logging_config);

    let metrics_config = MetricsConfig::from_env();
    if let Err(e) = init_metrics(&metrics_config) {
        // Metrics are optional; keep serving without them.
        warn!(error = %e, "failed to initialize metrics, continuing without metrics");
    }

    let mode = match env::var("MALLPATH_VALIDATION") {
        Ok(value) => value.parse::<ValidationMode>()?,
        Err(_) => ValidationMode::default(),
    };
    let venue_path = env::var("MALLPATH_VENUE_PATH").ok();
    let port: u16 = env::var("SERVICE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    info!(
        venue_path = venue_path.as_deref().unwrap_or("<bundled>"),
        %mode,
        port,
        "starting path service"
    );

    let loaded = match &venue_path {
        Some(path) => AppState::load(path, mode),
        None => AppState::bundled(mode),
    };
    let state = loaded.inspect_err(|e| {
        error!(error = %e, "failed to load application state");
    })?;

    info!(
        waypoints = state.graph().len(),
        positioned = state.positioned_count(),
        issues = state.graph().issues().len(),
        "application state loaded"
    );

    let app = router(state, &metrics_config.path);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(addr = %addr, "listening on");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: AppState, metrics_path: &str) -> Router {
    Router::new()
        .route(
            "/find-path",
            post(find_path_handler).options(|| async { StatusCode::OK }),
        )
        .route(metrics_path, get(metrics_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(MetricsLayer)
        .layer(cors_layer())
        .with_state(state)
}

/// Handle POST /find-path requests.
async fn find_path_handler(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<FindPathRequest>, JsonRejection>,
) -> Response {
    let request_id = request_id.as_str();

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(request_id, error = %rejection, "rejected path request body");
            record_path_failed("validation_error", SERVICE);
            return Response::Error(ProblemDetails::bad_request(
                format!("Invalid request data: {}", rejection.body_text()),
                request_id,
            ));
        }
    };

    let lib_request = match request.to_path_request(request_id) {
        Ok(lib_request) => lib_request,
        Err(problem) => {
            record_path_failed("validation_error", SERVICE);
            return Response::Error(*problem);
        }
    };

    info!(
        request_id,
        start_x = lib_request.start.x,
        start_y = lib_request.start.y,
        end_x = lib_request.end.x,
        end_y = lib_request.end.y,
        "handling path request"
    );

    let plan = match plan_path(state.graph(), &lib_request) {
        Ok(plan) => plan,
        Err(e) => {
            let reason = failure_reason(&e);
            if reason == "no_path" {
                info!(request_id, error = %e, "no path between resolved waypoints");
            } else {
                error!(request_id, error = %e, reason, "path planning failed");
            }
            record_path_failed(reason, SERVICE);
            return Response::Error(from_lib_error(&e, request_id));
        }
    };

    record_path_calculated(SERVICE);
    record_path_hops(plan.hop_count());
    record_snap_distance(plan.start.distance, "start");
    record_snap_distance(plan.end.distance, "end");

    info!(
        request_id,
        start = %plan.start.id,
        end = %plan.end.id,
        hops = plan.hop_count(),
        "path computed successfully"
    );

    let hops = plan.hop_count();
    Response::Success(ServiceResponse::new(FindPathResponse {
        path: plan.points,
        waypoints: plan.waypoints,
        hops,
    }))
}
