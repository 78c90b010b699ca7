//! benchtab - endpoint latency benchmark harness
//!
//! Issues repeated requests against a list of HTTP(S) endpoints, times each
//! request, and renders per-request and average latencies as HTML table
//! fragments appended to a host-provided output surface.

use std::fmt;

// Public re-exports
pub mod bench;
pub mod config;
pub mod models;
pub mod net;
pub mod notify;
pub mod render;
pub mod util;

// Common error types
#[derive(Debug)]
pub enum BenchtabError {
    /// Configuration validation or construction error
    ConfigError(String),
    /// Transport or response-decoding failure
    TransportError(String),
    /// Request-body serialization error
    SerializationError(String),
}

impl fmt::Display for BenchtabError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BenchtabError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            BenchtabError::TransportError(msg) => write!(f, "Transport error: {}", msg),
            BenchtabError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for BenchtabError {}

impl From<reqwest::Error> for BenchtabError {
    fn from(err: reqwest::Error) -> Self {
        BenchtabError::TransportError(err.to_string())
    }
}

impl From<serde_json::Error> for BenchtabError {
    fn from(err: serde_json::Error) -> Self {
        BenchtabError::SerializationError(format!("JSON serialization error: {}", err))
    }
}

/// Result type alias for benchtab operations
pub type Result<T> = std::result::Result<T, BenchtabError>;

// Common constants
/// Request count at which a per-run caution notice is surfaced.
pub const REQUEST_COUNT_CAUTION_THRESHOLD: u32 = 25;
/// Request count above which the whole run is aborted before any request.
/// The cap is deliberate; lifting it requires changing this constant and
/// targeting only resources you own.
pub const REQUEST_COUNT_HARD_CAP: u32 = 100;
