//! Request types and validation for HTTP endpoints.

use serde::{Deserialize, Serialize};

use mallpath_lib::{PathRequest, Point};

use crate::ProblemDetails;

/// A coordinate as submitted by the client.
///
/// Fields are optional so that a missing coordinate is reported with a
/// precise message instead of a generic deserialization failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

impl PointInput {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
        }
    }

    fn to_point(self, field: &str, request_id: &str) -> Result<Point, Box<ProblemDetails>> {
        let x = coordinate(self.x, field, "x", request_id)?;
        let y = coordinate(self.y, field, "y", request_id)?;
        Ok(Point::new(x, y))
    }
}

fn coordinate(
    value: Option<f64>,
    field: &str,
    axis: &str,
    request_id: &str,
) -> Result<f64, Box<ProblemDetails>> {
    match value {
        None => Err(Box::new(ProblemDetails::bad_request(
            format!("The '{field}.{axis}' field is required and must be a number"),
            request_id,
        ))),
        Some(v) if !v.is_finite() => Err(Box::new(ProblemDetails::bad_request(
            format!("The '{field}.{axis}' field must be a finite number"),
            request_id,
        ))),
        Some(v) => Ok(v),
    }
}

/// Request for computing a path between two points on the venue plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FindPathRequest {
    /// Point where the walk starts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<PointInput>,

    /// Point where the walk ends.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<PointInput>,
}

impl FindPathRequest {
    /// Validate the request and convert it into a library request.
    ///
    /// Errors are boxed `ProblemDetails` whose `instance` is `request_id`.
    pub fn to_path_request(&self, request_id: &str) -> Result<PathRequest, Box<ProblemDetails>> {
        let start = required(self.start, "start", request_id)?.to_point("start", request_id)?;
        let end = required(self.end, "end", request_id)?.to_point("end", request_id)?;
        Ok(PathRequest::new(start, end))
    }
}

fn required(
    value: Option<PointInput>,
    field: &str,
    request_id: &str,
) -> Result<PointInput, Box<ProblemDetails>> {
    value.ok_or_else(|| {
        Box::new(ProblemDetails::bad_request(
            format!("The '{field}' field is required and must be an object with 'x' and 'y'"),
            request_id,
        ))
    })
}
