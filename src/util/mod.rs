//! Utility functions module
//!
//! Contains pure helpers for timing-label formatting and averaging.

pub mod format;

// Re-export commonly used functions
pub use format::{average_label, elapsed_millis, request_time_label};
