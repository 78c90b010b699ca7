//! Table output templates
//!
//! Holds the four markup templates and the fixed placeholder substitution
//! that renders them. Substitution is a literal token replacement with no
//! escaping, no nested placeholders, and no conditional logic.

use serde::{Deserialize, Serialize};

use crate::{BenchtabError, Result};

/// Token replaced with the generated table name in the table template.
pub const TABLE_NAME_PLACEHOLDER: &str = "{{TABLE_NAME}}";
/// Token replaced with the test case URL in the header template.
pub const URL_PLACEHOLDER: &str = "{{URL}}";
/// Token replaced with the per-request timing label in the request-row template.
pub const REQUEST_TIME_PLACEHOLDER: &str = "{{REQUEST_TIME_STRING}}";
/// Token replaced with the averaged timing label in the average-row template.
pub const AVERAGE_TIME_PLACEHOLDER: &str = "{{AVERAGE_RESP_TIME}}";

/// The four templates a runner materializes into the output surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TemplateSet {
    /// Boundary markup for one whole table
    pub table: String,
    /// Header row naming the tested URL
    pub header: String,
    /// Row rendered after each timed request
    pub request_row: String,
    /// Row rendered once per table with the averaged timings
    pub average_row: String,
}

impl Default for TemplateSet {
    fn default() -> Self {
        Self {
            table: r#"<table class="{{TABLE_NAME}}"></table>"#.to_string(),
            header: "<tr><th>{{URL}}</th></tr>".to_string(),
            request_row: "<tr><td>{{REQUEST_TIME_STRING}}</td></tr>".to_string(),
            average_row: "<tr><td><strong>{{AVERAGE_RESP_TIME}}</strong></td></tr>".to_string(),
        }
    }
}

impl TemplateSet {
    /// Check that every template carries the placeholder its renderer
    /// substitutes.
    pub fn validate(&self) -> Result<()> {
        let required = [
            (&self.table, TABLE_NAME_PLACEHOLDER, "table"),
            (&self.header, URL_PLACEHOLDER, "header"),
            (&self.request_row, REQUEST_TIME_PLACEHOLDER, "request row"),
            (&self.average_row, AVERAGE_TIME_PLACEHOLDER, "average row"),
        ];

        for (template, placeholder, name) in required {
            if !template.contains(placeholder) {
                return Err(BenchtabError::ConfigError(format!(
                    "{} template is missing the {} placeholder",
                    name, placeholder
                )));
            }
        }

        Ok(())
    }

    /// Render the table-boundary fragment for a named table.
    pub fn render_table(&self, table_name: &str) -> String {
        self.table.replace(TABLE_NAME_PLACEHOLDER, table_name)
    }

    /// Render the header fragment for the tested URL.
    pub fn render_header(&self, url: &str) -> String {
        self.header.replace(URL_PLACEHOLDER, url)
    }

    /// Render one request-row fragment from its timing label.
    pub fn render_request_row(&self, time_label: &str) -> String {
        self.request_row.replace(REQUEST_TIME_PLACEHOLDER, time_label)
    }

    /// Render the average-row fragment from its averaged label.
    pub fn render_average_row(&self, average_label: &str) -> String {
        self.average_row.replace(AVERAGE_TIME_PLACEHOLDER, average_label)
    }
}
