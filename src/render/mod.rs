//! Rendering module
//!
//! Contains the output templates, the output-surface trait the runner
//! appends markup to, and the shipped in-memory HTML surface.

pub mod surface;
pub mod template;

// Re-export commonly used types
pub use surface::{HtmlSurface, MountedTable, OutputSurface, TableHandle};
pub use template::{
    TemplateSet, AVERAGE_TIME_PLACEHOLDER, REQUEST_TIME_PLACEHOLDER, TABLE_NAME_PLACEHOLDER,
    URL_PLACEHOLDER,
};
