//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → table.rs (ordered scan)
//!     → matcher.rs (suffix-anchored pattern match)
//!     → Return: matched CompiledRoute or None
//!
//! Table Compilation (at load/reload):
//!     RouteConfig[]
//!     → Expand {id} placeholders, compile regexes
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Patterns compiled when the table is built, immutable at runtime
//! - Deterministic: same input always selects the same route
//! - First match wins (document order)

pub mod matcher;
pub mod table;

pub use matcher::PathPattern;
pub use table::{CompiledRoute, RouteTable};
