//! Authenticating request gateway.
//!
//! Sits in front of a set of backend services: matches each incoming
//! request to a configured route, optionally enforces bearer-token
//! authentication, forwards the request to the route's backend, and
//! relays the backend response unchanged.

pub mod auth;
pub mod config;
pub mod forward;
pub mod http;
pub mod lifecycle;
pub mod routing;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
