//! Output formats for the rendered dependency tree.
//!
//! The default text format is the indented tree from [`crate::render`];
//! the JSON format serializes the same traversal (same visited-set,
//! depth-bound, and collapse rules) for machine consumption.

pub mod json;

use std::io::{self, Write};

use crate::graph::ModuleGraph;
use crate::render::{self, RenderOptions};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Indented tree with box-drawing glyphs (default)
    Text,
    /// Nested JSON structure - machine-readable
    Json,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(ExportFormat::Text),
            "json" => Ok(ExportFormat::Json),
            _ => Err(format!(
                "Unknown export format: '{}'. Valid formats: text, json",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Text => write!(f, "text"),
            ExportFormat::Json => write!(f, "json"),
        }
    }
}

/// Writes the tree in the specified format.
pub fn write<W: Write>(
    format: ExportFormat,
    graph: &ModuleGraph,
    options: &RenderOptions,
    writer: &mut W,
) -> io::Result<()> {
    match format {
        ExportFormat::Text => render::render(graph, options, writer),
        ExportFormat::Json => json::write_tree(graph, options, writer),
    }
}
