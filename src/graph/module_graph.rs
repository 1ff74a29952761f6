//! Module graph implementation using petgraph.
//!
//! Builds a rooted, deduplicated view over the edge list produced by
//! `go mod graph`. The underlying dependency graph may contain cycles
//! and a module may be reachable through many paths, but each distinct
//! identity is a single node in the arena; the renderer's visited set
//! relies on that sharing.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;

use crate::parser::{ManifestDeps, ModuleEdge};

/// Represents one distinct module in the graph.
#[derive(Debug, Clone)]
pub struct ModuleNode {
    /// Full identifier, including the `@version` suffix when present.
    pub identity: String,
    /// Display key of the node under which this module was first
    /// discovered. Set on first sighting, never mutated. `None` for the
    /// seed.
    pub first_parent: Option<String>,
}

impl ModuleNode {
    /// Returns the identity as displayed: with the version suffix kept
    /// or stripped depending on `include_version`.
    ///
    /// # Example
    ///
    /// ```
    /// use modtree::graph::ModuleNode;
    ///
    /// let node = ModuleNode::new("github.com/a/b@v1.2.3");
    /// assert_eq!(node.display_key(false), "github.com/a/b");
    /// assert_eq!(node.display_key(true), "github.com/a/b@v1.2.3");
    /// ```
    pub fn display_key(&self, include_version: bool) -> &str {
        if include_version {
            return &self.identity;
        }
        match self.identity.split_once('@') {
            Some((name, _)) => name,
            None => &self.identity,
        }
    }

    /// Creates a node with no recorded first parent.
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            first_parent: None,
        }
    }
}

/// A rooted, deduplicated module dependency graph.
///
/// Nodes live in a petgraph `DiGraph` arena indexed by identity string;
/// children are directed edges, unique per `(parent, child)` pair. The
/// seed is the parent of the first edge fed to [`ModuleGraph::from_edges`].
///
/// # Example
///
/// ```
/// use modtree::graph::ModuleGraph;
/// use modtree::parser::{ManifestDeps, ModuleEdge};
///
/// let edges = vec![
///     ModuleEdge::new("app", "lib@v1.0.0"),
///     ModuleEdge::new("lib@v1.0.0", "util@v0.2.0"),
/// ];
/// let graph = ModuleGraph::from_edges(&edges, &ManifestDeps::default());
///
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.node(graph.seed()).identity, "app");
/// ```
#[derive(Debug, Clone)]
pub struct ModuleGraph {
    /// The underlying directed graph
    graph: DiGraph<ModuleNode, ()>,
    /// Maps module identities to their node indices for O(1) lookup
    node_indices: HashMap<String, NodeIndex>,
    /// Root of the rendered tree
    seed: NodeIndex,
}

impl ModuleGraph {
    /// Builds the graph from an edge list in one pass.
    ///
    /// - The first edge's parent becomes the seed; its identity is fixed
    ///   from that point on, even if it reappears as a child elsewhere.
    /// - Nodes are created on first sight; the first sighting wins for
    ///   `first_parent`.
    /// - A duplicate `(parent, child)` edge collapses to one link.
    /// - When the parent is the seed and `manifest` marks the child's
    ///   exact identity as a direct (non-indirect) dependency, the link
    ///   is suppressed: those modules are already visible at the top
    ///   level and would only duplicate information. Links from every
    ///   other parent are always kept.
    /// - An empty edge list yields a seed node with empty identity.
    pub fn from_edges(edges: &[ModuleEdge], manifest: &ManifestDeps) -> Self {
        let mut graph = DiGraph::with_capacity(edges.len(), edges.len());
        let mut node_indices: HashMap<String, NodeIndex> = HashMap::with_capacity(edges.len());
        let mut seed: Option<NodeIndex> = None;

        for edge in edges {
            let parent_idx = intern(&mut graph, &mut node_indices, &edge.parent, None);
            let seed_idx = *seed.get_or_insert(parent_idx);

            let child_idx = intern(
                &mut graph,
                &mut node_indices,
                &edge.child,
                Some(&edge.parent),
            );

            if parent_idx == seed_idx && manifest.is_direct(&edge.child) {
                continue;
            }
            if graph.find_edge(parent_idx, child_idx).is_none() {
                graph.add_edge(parent_idx, child_idx, ());
            }
        }

        let seed = seed.unwrap_or_else(|| graph.add_node(ModuleNode::new("")));

        Self {
            graph,
            node_indices,
            seed,
        }
    }

    /// Returns the seed (root) node index.
    pub fn seed(&self) -> NodeIndex {
        self.seed
    }

    /// Returns the node for a given index.
    ///
    /// # Panics
    ///
    /// Panics if the index did not come from this graph.
    pub fn node(&self, idx: NodeIndex) -> &ModuleNode {
        &self.graph[idx]
    }

    /// Gets a node by its full identity.
    pub fn get(&self, identity: &str) -> Option<&ModuleNode> {
        self.node_indices
            .get(identity)
            .map(|&idx| &self.graph[idx])
    }

    /// Returns a node's children in the order their edges were first
    /// linked.
    pub fn children(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut children: Vec<NodeIndex> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|edge| edge.target())
            .collect();
        // petgraph yields outgoing edges in reverse insertion order
        children.reverse();
        children
    }

    /// Checks if a module exists in the graph.
    pub fn contains(&self, identity: &str) -> bool {
        self.node_indices.contains_key(identity)
    }

    /// Returns the number of distinct modules.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of child links.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

fn intern(
    graph: &mut DiGraph<ModuleNode, ()>,
    node_indices: &mut HashMap<String, NodeIndex>,
    identity: &str,
    first_parent: Option<&str>,
) -> NodeIndex {
    if let Some(&idx) = node_indices.get(identity) {
        return idx;
    }
    let idx = graph.add_node(ModuleNode {
        identity: identity.to_string(),
        first_parent: first_parent.map(str::to_string),
    });
    node_indices.insert(identity.to_string(), idx);
    idx
}
