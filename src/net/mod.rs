//! Network module
//!
//! Contains the network-client trait the runner issues requests through
//! and the shipped reqwest-backed implementation.

pub mod client;

// Re-export commonly used types
pub use client::{HttpMethod, HttpNetworkClient, NetworkClient, RequestOptions};
