//! Parsers for the two text sources modtree consumes.
//!
//! - **`go mod graph` output** - a flat list of `parent child` edge
//!   pairs, parsed by [`mod_graph`].
//! - **go.mod** - the module manifest, scanned by [`go_mod`] for the
//!   direct/indirect classification of declared dependencies.
//!
//! # Example
//!
//! ```
//! use modtree::parser::{parse_str, ManifestDeps};
//!
//! let edges = parse_str("app dep@v1.0.0\ndep@v1.0.0 sub@v0.1.0\n").unwrap();
//! assert_eq!(edges.len(), 2);
//!
//! let deps: ManifestDeps = "require dep v1.0.0\n".parse().unwrap();
//! assert!(deps.is_direct("dep@v1.0.0"));
//! ```

pub mod go_mod;
pub mod mod_graph;

/// Errors that can occur while reading the input text sources.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The source file could not be opened or read.
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// An edge line did not split into exactly two fields.
    #[error("invalid line format: {0}")]
    MalformedLine(String),
}

/// Result type alias for parser operations.
pub type ParseResult<T> = Result<T, ParseError>;

pub use go_mod::{parse_manifest, ManifestDeps};
pub use mod_graph::{parse_str, ModuleEdge};
