//! Configuration management module
//!
//! Holds the runner configuration: request volume, warm-up behavior,
//! output naming, and the table templates. Immutable once a runner is
//! constructed.

use serde::{Deserialize, Serialize};

use crate::render::TemplateSet;
use crate::{BenchtabError, Result, REQUEST_COUNT_CAUTION_THRESHOLD, REQUEST_COUNT_HARD_CAP};

/// Outcome of evaluating the volume policy gate for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeDecision {
    /// Below the caution band: run silently.
    Proceed,
    /// Within [caution threshold, hard cap]: run, but surface a caution.
    ProceedWithCaution,
    /// Above the hard cap: abort before any request.
    Abort,
}

/// Runner configuration containing all benchmark parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunnerConfig {
    /// Timed repetitions per test case
    pub request_count: u32,
    /// Issue one untimed priming request before the timed loop
    pub warmup_call: bool,
    /// Name of the output-surface container tables mount into
    pub container_name: String,
    /// Prefix for generated table names (`{prefix}-{N}`)
    pub table_name_prefix: String,
    /// Markup templates for tables, headers, and rows
    pub templates: TemplateSet,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            request_count: 5,
            warmup_call: false,
            container_name: "Tables".to_string(),
            table_name_prefix: "Table".to_string(),
            templates: TemplateSet::default(),
        }
    }
}

impl RunnerConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of timed repetitions per test case.
    pub fn with_request_count(mut self, count: u32) -> Self {
        self.request_count = count;
        self
    }

    /// Enable or disable the untimed warm-up request.
    pub fn with_warmup_call(mut self, warmup: bool) -> Self {
        self.warmup_call = warmup;
        self
    }

    /// Set the output-surface container name.
    pub fn with_container_name(mut self, name: impl Into<String>) -> Self {
        self.container_name = name.into();
        self
    }

    /// Set the prefix for generated table names.
    pub fn with_table_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.table_name_prefix = prefix.into();
        self
    }

    /// Replace the markup templates.
    pub fn with_templates(mut self, templates: TemplateSet) -> Self {
        self.templates = templates;
        self
    }

    /// Validate the configuration parameters.
    pub fn validate(&self) -> Result<()> {
        if self.container_name.is_empty() {
            return Err(BenchtabError::ConfigError(
                "Container name must not be empty".to_string(),
            ));
        }

        if self.table_name_prefix.is_empty() {
            return Err(BenchtabError::ConfigError(
                "Table name prefix must not be empty".to_string(),
            ));
        }

        self.templates.validate()?;

        Ok(())
    }

    /// Evaluate the volume policy gate. Evaluated once per run, not per
    /// test case.
    pub fn volume_policy(&self) -> VolumeDecision {
        if self.request_count > REQUEST_COUNT_HARD_CAP {
            VolumeDecision::Abort
        } else if self.request_count >= REQUEST_COUNT_CAUTION_THRESHOLD {
            VolumeDecision::ProceedWithCaution
        } else {
            VolumeDecision::Proceed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_values() {
        let config = RunnerConfig::default();
        assert_eq!(config.request_count, 5);
        assert!(!config.warmup_call);
        assert_eq!(config.container_name, "Tables");
        assert_eq!(config.table_name_prefix, "Table");
        assert_eq!(config.templates, TemplateSet::default());
    }

    #[test]
    fn test_builders_override_fields() {
        let config = RunnerConfig::new()
            .with_request_count(10)
            .with_warmup_call(true)
            .with_container_name("Results")
            .with_table_name_prefix("Run");

        assert_eq!(config.request_count, 10);
        assert!(config.warmup_call);
        assert_eq!(config.container_name, "Results");
        assert_eq!(config.table_name_prefix, "Run");
    }

    #[test]
    fn test_volume_policy_bands() {
        let at = |count| RunnerConfig::new().with_request_count(count).volume_policy();

        assert_eq!(at(0), VolumeDecision::Proceed);
        assert_eq!(at(24), VolumeDecision::Proceed);
        assert_eq!(at(25), VolumeDecision::ProceedWithCaution);
        assert_eq!(at(100), VolumeDecision::ProceedWithCaution);
        assert_eq!(at(101), VolumeDecision::Abort);
    }

    #[test]
    fn test_validate_rejects_empty_names() {
        let config = RunnerConfig::new().with_container_name("");
        assert!(config.validate().is_err());

        let config = RunnerConfig::new().with_table_name_prefix("");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_checks_templates() {
        let mut templates = TemplateSet::default();
        templates.header = "<tr><th>no placeholder</th></tr>".to_string();

        let config = RunnerConfig::new().with_templates(templates);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let config = RunnerConfig::new()
            .with_request_count(7)
            .with_warmup_call(true);
        let json = serde_json::to_string(&config).expect("serialize");
        let back: RunnerConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(config, back);
    }
}
