use std::path::PathBuf;

use thiserror::Error;

use crate::venue::VenueIssue;

/// Convenient result alias for the Mallpath library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Venue data file could not be located at the resolved path.
    #[error("venue data not found at {path}")]
    VenueNotFound { path: PathBuf },

    /// Raised when strict validation rejects the venue reference data.
    #[error("invalid venue data: {}", format_issues(.issues))]
    InvalidVenue { issues: Vec<VenueIssue> },

    /// Raised when no waypoint carries coordinates, so no point can be resolved.
    #[error("venue has no waypoints with coordinates")]
    NoWaypoints,

    /// Raised when no path connects the two waypoints.
    #[error("no path found between {start} and {goal}")]
    PathNotFound { start: String, goal: String },

    /// Raised when a waypoint has no registered coordinates.
    #[error("waypoint {waypoint} has no coordinates")]
    MissingCoordinates { waypoint: String },

    /// Raised when a validation mode string is not recognised.
    #[error("unknown validation mode '{value}'; expected 'strict' or 'lenient'")]
    UnknownValidationMode { value: String },

    /// Wrapper for JSON parsing errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn format_issues(issues: &[VenueIssue]) -> String {
    match issues {
        [] => "no issues recorded".to_string(),
        [single] => single.to_string(),
        [first, rest @ ..] => format!("{} (and {} more)", first, rest.len()),
    }
}
