//! Parser for `go mod graph` output.
//!
//! The graph command emits one edge per line as two whitespace-separated
//! fields: the dependent module and its dependency, both as
//! `name@version` identifiers (the main module carries no version).

use std::fs;
use std::path::Path;

use super::{ParseError, ParseResult};

/// A single `parent child` edge from the module graph.
///
/// Order of arrival matters only for one thing: the parent of the first
/// edge becomes the seed of the rendered tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleEdge {
    /// Identity of the dependent module.
    pub parent: String,
    /// Identity of the module it depends on.
    pub child: String,
}

impl ModuleEdge {
    /// Creates a new edge.
    pub fn new(parent: impl Into<String>, child: impl Into<String>) -> Self {
        Self {
            parent: parent.into(),
            child: child.into(),
        }
    }
}

/// Parses a module graph file from a file path.
///
/// # Arguments
///
/// * `path` - Path to a file holding `go mod graph` output
///
/// # Returns
///
/// A `ParseResult` containing the edge list or an error.
pub fn parse_file(path: &Path) -> ParseResult<Vec<ModuleEdge>> {
    let content = fs::read_to_string(path)?;
    parse_str(&content)
}

/// Parses module graph output from a string.
///
/// Blank lines are skipped. Any other line must split into exactly two
/// whitespace-separated fields; otherwise the whole parse fails with
/// [`ParseError::MalformedLine`] carrying the offending line verbatim.
///
/// # Example
///
/// ```
/// use modtree::parser::parse_str;
///
/// let edges = parse_str("app lib@v1.0.0\nlib@v1.0.0 util@v0.2.0\n").unwrap();
/// assert_eq!(edges.len(), 2);
/// assert_eq!(edges[0].parent, "app");
/// assert_eq!(edges[1].child, "util@v0.2.0");
/// ```
pub fn parse_str(content: &str) -> ParseResult<Vec<ModuleEdge>> {
    let mut edges = Vec::new();

    for line in content.lines() {
        let mut fields = line.split_whitespace();
        let (parent, child) = match (fields.next(), fields.next()) {
            (None, _) => continue,
            (Some(parent), Some(child)) if fields.next().is_none() => (parent, child),
            _ => return Err(ParseError::MalformedLine(line.to_string())),
        };
        edges.push(ModuleEdge::new(parent, child));
    }

    Ok(edges)
}
