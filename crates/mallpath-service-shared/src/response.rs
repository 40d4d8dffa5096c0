//! Response wrapper for successful HTTP responses.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Wrapper for successful responses with content type metadata.
///
/// Mirrors `ProblemDetails` by carrying the content type in the body, so
/// clients can branch on a single field for both outcomes.
///
/// # Example
///
/// ```
/// use mallpath_service_shared::ServiceResponse;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct PathResult {
///     hops: usize,
///     waypoints: Vec<String>,
/// }
///
/// let result = PathResult { hops: 1, waypoints: vec!["DS1".into(), "W11".into()] };
/// let response = ServiceResponse::new(result);
/// assert_eq!(response.content_type, "application/json");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceResponse<T> {
    /// Payload fields, flattened into the top-level object.
    #[serde(flatten)]
    pub data: T,

    pub content_type: String,
}

impl<T> ServiceResponse<T> {
    /// Wrap a payload with the `application/json` content type.
    pub fn new(data: T) -> Self {
        Self {
            data,
            content_type: "application/json".to_string(),
        }
    }
}

impl<T> From<T> for ServiceResponse<T> {
    fn from(data: T) -> Self {
        Self::new(data)
    }
}

impl<T: Serialize> IntoResponse for ServiceResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
