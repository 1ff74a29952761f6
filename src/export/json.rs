//! JSON export implementation.
//!
//! Serializes the dependency tree as nested JSON, honoring the same
//! visited-set, depth-bound, and collapse rules as the text renderer,
//! so the exported structure is cycle-safe and finite by construction.

use std::collections::HashSet;
use std::io::{self, Write};

use petgraph::graph::NodeIndex;
use serde::Serialize;

use crate::graph::ModuleGraph;
use crate::render::RenderOptions;

/// Serializable module for JSON output.
#[derive(Serialize)]
struct JsonModule {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_seen_under: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    previously_seen: bool,
    #[serde(skip_serializing_if = "is_zero")]
    skipped_children: usize,
    #[serde(skip_serializing_if = "is_zero")]
    collapsed_dependencies: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    dependencies: Vec<JsonModule>,
}

fn is_false(value: &bool) -> bool {
    !value
}

fn is_zero(value: &usize) -> bool {
    *value == 0
}

/// Writes the tree rooted at the graph's seed as pretty-printed JSON.
pub fn write_tree<W: Write>(
    graph: &ModuleGraph,
    options: &RenderOptions,
    writer: &mut W,
) -> io::Result<()> {
    let mut builder = TreeBuilder {
        graph,
        options,
        rendered: HashSet::new(),
    };
    let tree = builder.module(graph.seed(), 1);

    let json = serde_json::to_string_pretty(&tree)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    writeln!(writer, "{}", json)
}

struct TreeBuilder<'a> {
    graph: &'a ModuleGraph,
    options: &'a RenderOptions,
    rendered: HashSet<String>,
}

impl TreeBuilder<'_> {
    fn module(&mut self, idx: NodeIndex, depth: usize) -> JsonModule {
        let node = self.graph.node(idx);
        let key = node.display_key(self.options.include_version).to_string();

        let mut normal = Vec::new();
        let mut collapsed = 0;
        for child in self.graph.children(idx) {
            let child_key = self
                .graph
                .node(child)
                .display_key(self.options.include_version);
            if self.options.is_collapsible(child_key) {
                collapsed += 1;
            } else {
                normal.push(child);
            }
        }

        let previously_seen = self.rendered.contains(&key);
        self.rendered.insert(key);

        let expand = !previously_seen && depth <= self.options.max_depth;

        let dependencies = if expand {
            normal.sort_by_key(|&child| {
                self.graph
                    .node(child)
                    .display_key(self.options.include_version)
                    .to_lowercase()
            });
            normal
                .iter()
                .map(|&child| self.module(child, depth + 1))
                .collect()
        } else {
            Vec::new()
        };

        let (name, version) = match node.identity.split_once('@') {
            Some((name, version)) => (name.to_string(), Some(version.to_string())),
            None => (node.identity.clone(), None),
        };

        JsonModule {
            name,
            version,
            first_seen_under: node.first_parent.clone(),
            previously_seen,
            skipped_children: if previously_seen { normal.len() } else { 0 },
            collapsed_dependencies: if expand { collapsed } else { 0 },
            dependencies,
        }
    }
}
