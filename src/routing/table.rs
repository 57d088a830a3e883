//! Route lookup.
//!
//! # Responsibilities
//! - Hold the compiled routes in document order
//! - Look up the matching route for (method, path)
//! - Return matched route or explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - First match in document order wins; a route is selected at most once
//!   per request
//! - Method comparison is exact string equality, no case normalization:
//!   a route configured as "get" never matches a GET request
//! - Explicit None rather than a silent default route

use crate::config::loader::ConfigError;
use crate::config::schema::RouteConfig;
use crate::routing::matcher::PathPattern;

/// One configured route with its pattern compiled.
#[derive(Debug, Clone)]
pub struct CompiledRoute {
    /// Original pattern text, kept for logging.
    pub path: String,

    /// Configured HTTP verb.
    pub method: String,

    /// Whether a valid bearer token is required.
    pub auth: bool,

    /// Name of the environment variable holding the backend hostname.
    pub host: String,

    /// Backend port.
    pub port: String,

    pattern: PathPattern,
}

impl CompiledRoute {
    fn compile(config: RouteConfig) -> Result<Self, ConfigError> {
        let pattern =
            PathPattern::compile(&config.path).map_err(|source| ConfigError::Pattern {
                pattern: config.path.clone(),
                source,
            })?;

        Ok(Self {
            path: config.path,
            method: config.method,
            auth: config.auth,
            host: config.host,
            port: config.port,
            pattern,
        })
    }

    /// Returns true if both the method and the path match this route.
    pub fn matches(&self, method: &str, path: &str) -> bool {
        self.method == method && self.pattern.matches(path)
    }
}

/// The ordered set of configured routes.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<CompiledRoute>,
}

impl RouteTable {
    /// Compile a route document into an immutable table, preserving order.
    pub fn compile(configs: Vec<RouteConfig>) -> Result<Self, ConfigError> {
        let routes = configs
            .into_iter()
            .map(CompiledRoute::compile)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { routes })
    }

    /// Select the first route matching both method and path, if any.
    pub fn match_request(&self, method: &str, path: &str) -> Option<&CompiledRoute> {
        self.routes.iter().find(|r| r.matches(method, path))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
