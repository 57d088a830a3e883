//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{GatewayConfig, RouteConfig};
use crate::routing::RouteTable;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Settings or route document could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Route document is not valid JSON or has the wrong shape.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Gateway settings file is not valid TOML.
    #[error("settings parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A route's path pattern did not compile.
    #[error("invalid path pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        source: regex::Error,
    },
}

/// Load the gateway settings from a TOML file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: GatewayConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Load the route document and compile it into an immutable table.
///
/// The document is a JSON array of routes; order is preserved because the
/// first matching route wins.
pub fn load_routes(path: &Path) -> Result<RouteTable, ConfigError> {
    let content = fs::read_to_string(path)?;
    let routes: Vec<RouteConfig> = serde_json::from_str(&content)?;
    RouteTable::compile(routes)
}
