//! Upstream request dispatch.
//!
//! # Responsibilities
//! - Resolve the backend authority (env-var hostname + configured port)
//! - Rewrite the request URI for the backend
//! - Dispatch the supported verbs; reject everything else at the boundary
//! - Bound the backend call with a deadline
//!
//! # Design Decisions
//! - Supported verbs are a closed enum; an unmatched verb is rejected
//!   before any upstream work happens (no call is made)
//! - GET carries the original query string on the upstream URI; the
//!   JSON-body verbs carry the query parameters as a JSON object body
//! - Original request headers pass through as sent, host included; only
//!   the framing header of a replaced body is recomputed
//! - Connection failures surface as 502, deadline expiry as 504; there is
//!   no retry

use std::str::FromStr;
use std::time::Duration;

use axum::body::Body;
use axum::http::uri::{Authority, PathAndQuery, Scheme};
use axum::http::{Method, Request, Response, Uri};
use hyper::body::Incoming;
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use serde_json::Value;

use crate::config::TimeoutConfig;
use crate::http::error::GatewayError;
use crate::routing::CompiledRoute;

/// Hostname used when the route's environment variable is unset or empty.
const DEFAULT_HOST: &str = "localhost";

/// The closed set of verbs the gateway forwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl ForwardMethod {
    /// Convert a request method at the forwarding boundary.
    ///
    /// Returns None for any verb outside the supported set; the caller
    /// turns that into a 405 without contacting a backend.
    pub fn from_method(method: &Method) -> Option<Self> {
        if *method == Method::GET {
            Some(Self::Get)
        } else if *method == Method::POST {
            Some(Self::Post)
        } else if *method == Method::PUT {
            Some(Self::Put)
        } else if *method == Method::DELETE {
            Some(Self::Delete)
        } else {
            None
        }
    }

    /// Whether the verb carries its parameters as a JSON body.
    pub fn sends_json_body(&self) -> bool {
        !matches!(self, Self::Get)
    }
}

/// Resolve the backend hostname from the environment variable named by the
/// route. Unset or empty falls back to localhost.
pub fn resolve_host(var_name: &str) -> String {
    std::env::var(var_name)
        .ok()
        .filter(|host| !host.is_empty())
        .unwrap_or_else(|| DEFAULT_HOST.to_string())
}

/// Collect the request's query parameters into a JSON object.
///
/// Repeated keys keep the last value.
pub fn query_params(uri: &Uri) -> serde_json::Map<String, Value> {
    uri.query()
        .map(|query| {
            url::form_urlencoded::parse(query.as_bytes())
                .map(|(k, v)| (k.into_owned(), Value::String(v.into_owned())))
                .collect()
        })
        .unwrap_or_default()
}

/// Issues backend calls for matched, authorized requests.
pub struct Forwarder {
    client: Client<HttpConnector, Body>,
    timeouts: TimeoutConfig,
}

impl Forwarder {
    /// Create a forwarder with a connect timeout on the connector and an
    /// overall per-call deadline.
    pub fn new(timeouts: TimeoutConfig) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(timeouts.connect_secs)));

        let client = Client::builder(TokioExecutor::new()).build(connector);

        Self { client, timeouts }
    }

    /// Forward the request to the route's backend and return its response.
    pub async fn forward(
        &self,
        route: &CompiledRoute,
        request: Request<Body>,
    ) -> Result<Response<Incoming>, GatewayError> {
        let method =
            ForwardMethod::from_method(request.method()).ok_or(GatewayError::MethodUnsupported)?;

        let host = resolve_host(&route.host);
        let authority = Authority::from_str(&format!("{}:{}", host, route.port))
            .map_err(|e| GatewayError::BackendUnreachable(e.to_string()))?;

        let (parts, _body) = request.into_parts();
        let params = query_params(&parts.uri);

        // URI rewrite: scheme + backend authority, original path. GET keeps
        // the query string; the JSON-body verbs move it into the body.
        let mut uri_parts = parts.uri.clone().into_parts();
        uri_parts.scheme = Some(Scheme::HTTP);
        uri_parts.authority = Some(authority);
        if method.sends_json_body() {
            uri_parts.path_and_query = Some(
                PathAndQuery::from_str(parts.uri.path())
                    .map_err(|e| GatewayError::BackendUnreachable(e.to_string()))?,
            );
        }
        let uri = Uri::from_parts(uri_parts)
            .map_err(|e| GatewayError::BackendUnreachable(e.to_string()))?;

        let mut builder = Request::builder()
            .method(parts.method.clone())
            .uri(uri)
            .version(parts.version);

        // Headers pass through as the client sent them. The one exception:
        // when the body is replaced with the JSON parameter object, the
        // original content-length no longer frames the outgoing body and the
        // wire layer must recompute it.
        if let Some(headers) = builder.headers_mut() {
            for (name, value) in parts.headers.iter() {
                if method.sends_json_body() && *name == axum::http::header::CONTENT_LENGTH {
                    continue;
                }
                headers.insert(name.clone(), value.clone());
            }
        }

        let body = if method.sends_json_body() {
            Body::from(serde_json::to_vec(&Value::Object(params)).unwrap_or_default())
        } else {
            Body::empty()
        };

        let req = builder
            .body(body)
            .map_err(|e| GatewayError::BackendUnreachable(e.to_string()))?;

        tracing::debug!(
            method = %parts.method,
            uri = %req.uri(),
            "Forwarding to backend"
        );

        let deadline = Duration::from_secs(self.timeouts.upstream_secs);
        match tokio::time::timeout(deadline, self.client.request(req)).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(e)) => {
                tracing::error!(error = %e, "Backend call failed");
                Err(GatewayError::BackendUnreachable(e.to_string()))
            }
            Err(_) => {
                tracing::error!(deadline_secs = self.timeouts.upstream_secs, "Backend call timed out");
                Err(GatewayError::BackendTimeout)
            }
        }
    }
}
