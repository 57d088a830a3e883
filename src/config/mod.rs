//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! gateway settings (TOML)
//!     → loader.rs (parse & deserialize)
//!     → GatewayConfig (immutable, read once at startup)
//!
//! route document (JSON array)
//!     → loader.rs (parse & compile patterns)
//!     → RouteTable (immutable snapshot)
//!     → shared via ArcSwap with the request handlers
//!
//! On route document change:
//!     watcher.rs detects change
//!     → loader.rs loads & compiles new table
//!     → atomic swap of Arc<RouteTable>
//!     → in-flight requests keep the snapshot they loaded
//! ```
//!
//! # Design Decisions
//! - Tables are immutable once compiled; changes arrive as whole snapshots
//! - A failed reload keeps the current table rather than dropping routes
//! - All settings sections have defaults to allow minimal config files

pub mod loader;
pub mod schema;
pub mod watcher;

pub use loader::ConfigError;
pub use schema::GatewayConfig;
pub use schema::RouteConfig;
pub use schema::TimeoutConfig;
