//! Configuration schema definitions.
//!
//! Two layers of configuration exist: the gateway's own settings
//! (`GatewayConfig`, TOML, read once at startup) and the route document
//! (`RouteConfig` elements, JSON, hot-reloadable). All types derive Serde
//! traits for deserialization from their respective files.

use serde::{Deserialize, Deserializer, Serialize};

/// Root configuration for the gateway process.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Path to the route document (JSON array of routes).
    pub routes_path: String,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Token verification settings for the built-in verifier.
    pub auth: AuthConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Backend connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Deadline for one backend call (connect + response) in seconds.
    /// Exceeding it yields 504 to the client.
    pub upstream_secs: u64,

    /// Whole-request timeout applied at the server layer in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            upstream_secs: 10,
            request_secs: 30,
        }
    }
}

/// Settings for the built-in bearer-token verifier.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Shared key that tokens are checked against (Bearer token).
    pub api_key: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            // WARNING: This is a placeholder! Change this in production.
            api_key: "CHANGE_ME_IN_PRODUCTION".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            routes_path: "routes.json".to_string(),
            timeouts: TimeoutConfig::default(),
            auth: AuthConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// One element of the route document.
///
/// Routes are immutable once read; order in the document is significant
/// (first match wins).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Path pattern; may contain the literal placeholder `{id}`.
    pub path: String,

    /// HTTP verb, compared to the request method without case normalization.
    pub method: String,

    /// Whether the route requires a valid bearer token.
    pub auth: bool,

    /// Name of the environment variable holding the backend hostname.
    pub host: String,

    /// Backend port. The document may carry it as an int or a string.
    #[serde(deserialize_with = "de_port")]
    pub port: String,
}

/// Accept `"port": 8080` and `"port": "8080"` alike.
fn de_port<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Port {
        Num(u64),
        Text(String),
    }

    Ok(match Port::deserialize(deserializer)? {
        Port::Num(n) => n.to_string(),
        Port::Text(s) => s,
    })
}
