//! Graph module for dependency relationship modeling.
//!
//! This module provides the [`ModuleGraph`] struct: a rooted,
//! deduplicated tree-shaped view over the possibly-cyclic dependency
//! graph emitted by `go mod graph`.
//!
//! # Example
//!
//! ```rust
//! use modtree::graph::ModuleGraph;
//! use modtree::parser::{ManifestDeps, ModuleEdge};
//!
//! let edges = vec![
//!     ModuleEdge::new("app", "lib@v1.0.0"),
//!     ModuleEdge::new("app", "lib@v1.0.0"), // duplicate, collapses
//! ];
//! let graph = ModuleGraph::from_edges(&edges, &ManifestDeps::default());
//!
//! assert_eq!(graph.node_count(), 2);
//! assert_eq!(graph.edge_count(), 1);
//! ```

mod module_graph;

pub use module_graph::{ModuleGraph, ModuleNode};
