//! Cross-origin policy for browser clients.
//!
//! The floor-plan frontend is served from a different origin than the API, so
//! every route allows any origin together with the methods and headers the
//! frontend sends. Preflight `OPTIONS` requests are answered by the layer
//! without reaching the handlers.

use axum::http::{header, Method};
use tower_http::cors::{Any, CorsLayer};

/// Methods advertised in `Access-Control-Allow-Methods`.
pub const ALLOWED_METHODS: [Method; 5] = [
    Method::GET,
    Method::PUT,
    Method::POST,
    Method::DELETE,
    Method::OPTIONS,
];

/// Build the CORS layer applied to every service router.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(ALLOWED_METHODS)
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
