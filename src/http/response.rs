//! Response relay and synthesis.
//!
//! # Responsibilities
//! - Rebuild the backend response for the client, verbatim
//! - Synthesize the JSON error bodies for pipeline failures
//!
//! # Design Decisions
//! - Fully transparent proxying: status, headers, and body are copied with
//!   no transformation, compression, or header filtering
//! - The body streams through; it is never buffered in the gateway

use axum::body::Body;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use hyper::body::Incoming;
use serde_json::json;

/// Copy the backend response onto the outgoing response unchanged.
pub fn relay(upstream: axum::http::Response<Incoming>) -> Response {
    let (parts, body) = upstream.into_parts();
    Response::from_parts(parts, Body::new(body))
}

/// Build a synthesized `{"message": ...}` response.
pub fn message_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}
