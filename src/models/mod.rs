//! Data models module
//!
//! Contains the test case input model handed to the benchmark runner.

pub mod test_case;

// Re-export commonly used types
pub use test_case::TestCase;
