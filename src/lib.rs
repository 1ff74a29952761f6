//! modtree - dependency tree renderer for Go module graphs
//!
//! This crate turns the flat `parent child` edge list emitted by
//! `go mod graph` into a human-readable, indented tree rooted at the
//! main module, pruning already-rendered nodes so cyclic graphs stay
//! finite and collapsing low-interest dependency namespaces into a
//! single summary line.

pub mod export;
pub mod graph;
pub mod parser;
pub mod render;
pub mod toolchain;
