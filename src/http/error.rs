//! Request pipeline error taxonomy.
//!
//! Every expected failure of the pipeline resolves locally into a
//! synthesized JSON response; nothing escapes the handler uncaught.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::http::response::message_response;

/// Terminal failures of the matching → authenticate → forward → relay
/// pipeline.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// No configured route matched the request's method and path.
    #[error("no route matches the request")]
    RouteNotFound,

    /// A guarded route was hit without an authorization header.
    #[error("authorization header is missing")]
    AuthMissing,

    /// The verifier rejected the presented token.
    #[error("token rejected by the verifier")]
    AuthInvalid,

    /// The matched route's verb is outside the forwardable set.
    #[error("method is not forwardable")]
    MethodUnsupported,

    /// The backend connection failed (refused, reset, connect timeout).
    #[error("backend unreachable: {0}")]
    BackendUnreachable(String),

    /// The backend call exceeded the configured deadline.
    #[error("backend call exceeded its deadline")]
    BackendTimeout,
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::AuthMissing | Self::AuthInvalid => StatusCode::UNAUTHORIZED,
            Self::MethodUnsupported => StatusCode::METHOD_NOT_ALLOWED,
            Self::BackendUnreachable(_) => StatusCode::BAD_GATEWAY,
            Self::BackendTimeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    /// Client-visible message. Missing and invalid tokens share one
    /// message; the distinction is never surfaced to the caller.
    pub fn message(&self) -> &'static str {
        match self {
            Self::RouteNotFound => "Route is not available",
            Self::AuthMissing | Self::AuthInvalid => "Missing token",
            Self::MethodUnsupported => "Method is not supported",
            Self::BackendUnreachable(_) => "Backend is unreachable",
            Self::BackendTimeout => "Backend timed out",
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        message_response(self.status(), self.message())
    }
}
