//! Output surfaces
//!
//! The rendering target a runner appends markup fragments to. The trait
//! mirrors innerHTML-style appends: fragments are only ever added, never
//! replaced, and mounted tables persist for the lifetime of the surface.

use std::fmt;

use tracing::warn;

/// Opaque reference to one rendered table inside an output surface.
///
/// Created when a test case begins and appended to throughout its timing
/// loop; the rendered table is never destroyed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableHandle {
    name: String,
}

impl TableHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The table's name, unique within its surface.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for TableHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Rendering target for table markup.
///
/// Precondition: table names are assumed unique within one surface. The
/// runner's `{prefix}-{N}` numbering avoids collisions only among tables it
/// mounts itself; a host that mounts unrelated tables using the same naming
/// scheme gets unspecified behavior on collision.
pub trait OutputSurface {
    /// Number of tables currently mounted in the surface. Seeds the
    /// runner's table numbering at the start of each run.
    fn table_count(&self) -> usize;

    /// Append a table-boundary fragment to the container and register
    /// `handle` as a mounted table.
    fn mount_table(&mut self, handle: &TableHandle, boundary_fragment: &str);

    /// Append a row fragment to a previously mounted table.
    fn append_to_table(&mut self, handle: &TableHandle, fragment: &str);
}

/// One table mounted in an [`HtmlSurface`].
#[derive(Debug, Clone)]
pub struct MountedTable {
    name: String,
    boundary: String,
    fragments: Vec<String>,
}

impl MountedTable {
    /// The table's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The rendered boundary markup the table was mounted with.
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Row fragments in append order.
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// Serialize the table with its accumulated fragments spliced in
    /// front of the boundary's final closing tag.
    pub fn to_html(&self) -> String {
        let inner: String = self.fragments.concat();
        match self.boundary.rfind("</") {
            Some(pos) => {
                let mut html =
                    String::with_capacity(self.boundary.len() + inner.len());
                html.push_str(&self.boundary[..pos]);
                html.push_str(&inner);
                html.push_str(&self.boundary[pos..]);
                html
            }
            None => {
                let mut html = self.boundary.clone();
                html.push_str(&inner);
                html
            }
        }
    }
}

/// In-memory output surface accumulating HTML table markup.
///
/// The shipped [`OutputSurface`] implementation: a named container holding
/// mounted tables, which a host page embeds via [`HtmlSurface::to_html`].
#[derive(Debug, Clone)]
pub struct HtmlSurface {
    container_name: String,
    tables: Vec<MountedTable>,
}

impl HtmlSurface {
    /// Create an empty surface for the named container.
    pub fn new(container_name: impl Into<String>) -> Self {
        Self {
            container_name: container_name.into(),
            tables: Vec::new(),
        }
    }

    /// The container's name (class on the wrapping element).
    pub fn container_name(&self) -> &str {
        &self.container_name
    }

    /// Mounted tables in mount order.
    pub fn tables(&self) -> &[MountedTable] {
        &self.tables
    }

    /// Look up a mounted table by name.
    pub fn table(&self, name: &str) -> Option<&MountedTable> {
        self.tables.iter().find(|table| table.name == name)
    }

    /// Serialize the whole container with every mounted table.
    pub fn to_html(&self) -> String {
        let mut html = format!("<div class=\"{}\">", self.container_name);
        for table in &self.tables {
            html.push_str(&table.to_html());
        }
        html.push_str("</div>");
        html
    }
}

impl OutputSurface for HtmlSurface {
    fn table_count(&self) -> usize {
        self.tables.len()
    }

    fn mount_table(&mut self, handle: &TableHandle, boundary_fragment: &str) {
        self.tables.push(MountedTable {
            name: handle.name().to_string(),
            boundary: boundary_fragment.to_string(),
            fragments: Vec::new(),
        });
    }

    fn append_to_table(&mut self, handle: &TableHandle, fragment: &str) {
        match self.tables.iter_mut().find(|table| table.name == handle.name()) {
            Some(table) => table.fragments.push(fragment.to_string()),
            None => warn!(table = handle.name(), "append to unknown table, dropping fragment"),
        }
    }
}
