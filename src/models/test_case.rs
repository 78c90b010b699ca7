//! Test case data model
//!
//! One endpoint plus optional payload to benchmark. Input ordering is
//! significant: the runner executes cases in list order and renders their
//! tables in the same order.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One endpoint to benchmark, with an optional structured request body.
///
/// The URL is required for the case to run. It is modeled as optional so
/// that a case arriving without one (for instance from deserialized input)
/// can be reported and skipped instead of failing the whole run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TestCase {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl TestCase {
    /// A case benchmarked with GET requests.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            body: None,
        }
    }

    /// A case benchmarked with POST requests carrying `body`.
    pub fn post(url: impl Into<String>, body: Value) -> Self {
        Self {
            url: Some(url.into()),
            body: Some(body),
        }
    }

    /// The case's URL, when present and non-empty.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.is_empty())
    }
}
