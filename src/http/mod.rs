//! HTTP pipeline subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, timeout + trace layers)
//!     → pipeline handler (match route → authenticate → forward)
//!     → response.rs (relay backend response, or synthesize error)
//!     → Send to client
//! ```

pub mod error;
pub mod response;
pub mod server;

pub use error::GatewayError;
pub use server::HttpServer;
