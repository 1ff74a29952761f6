//! Depth-first tree renderer for module graphs.
//!
//! Walks the graph pre-order from the seed, printing one line per node
//! with box-drawing branch glyphs. Three rules keep the walk bounded on
//! cyclic input: a node whose display key was already rendered anywhere
//! in this render is never expanded again, expansion stops past the
//! configured depth, and collapsible children are only counted.

use std::collections::HashSet;
use std::io::{self, Write};

use petgraph::graph::NodeIndex;

use crate::graph::ModuleGraph;

/// Configuration for a render pass.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Maximum depth to expand; the seed is depth 1 and the bound is
    /// inclusive.
    pub max_depth: usize,
    /// Keep `@version` suffixes in displayed identities.
    pub include_version: bool,
    /// Hide the `<previously seen ...>` annotations. Skipping still
    /// happens; only the suffix disappears.
    pub hide_skip_reason: bool,
    /// Display-key prefixes whose matching children are collapsed into
    /// a single summary line instead of being rendered individually.
    pub collapse_prefixes: Vec<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_depth: usize::MAX,
            include_version: false,
            hide_skip_reason: false,
            collapse_prefixes: vec!["golang.org".to_string()],
        }
    }
}

impl RenderOptions {
    /// Returns true if a display key falls under a collapse prefix.
    pub fn is_collapsible(&self, key: &str) -> bool {
        self.collapse_prefixes.iter().any(|p| key.starts_with(p.as_str()))
    }

    /// Label used in the collapse summary line, e.g. `golang.org*`.
    pub fn collapse_label(&self) -> String {
        let globs: Vec<String> = self.collapse_prefixes.iter().map(|p| format!("{p}*")).collect();
        globs.join(", ")
    }
}

/// Renders the tree rooted at the graph's seed into `writer`.
///
/// The graph is read-only during the render; the only mutable state is
/// a visited set created here and discarded when the call returns, so
/// two renders of the same graph produce byte-identical output.
///
/// # Example
///
/// ```
/// use modtree::graph::ModuleGraph;
/// use modtree::parser::{parse_str, ManifestDeps};
/// use modtree::render::{render, RenderOptions};
///
/// let edges = parse_str("app lib@v1\nlib@v1 util@v2\n").unwrap();
/// let graph = ModuleGraph::from_edges(&edges, &ManifestDeps::default());
///
/// let mut out = Vec::new();
/// render(&graph, &RenderOptions::default(), &mut out).unwrap();
/// assert_eq!(
///     String::from_utf8(out).unwrap(),
///     "app\n└── lib\n    └── util\n"
/// );
/// ```
pub fn render<W: Write>(
    graph: &ModuleGraph,
    options: &RenderOptions,
    writer: &mut W,
) -> io::Result<()> {
    let mut renderer = Renderer {
        graph,
        options,
        rendered: HashSet::new(),
    };
    renderer.node(graph.seed(), 1, "", "", writer)
}

struct Renderer<'a> {
    graph: &'a ModuleGraph,
    options: &'a RenderOptions,
    /// Display keys already emitted during this render.
    rendered: HashSet<String>,
}

impl Renderer<'_> {
    fn node<W: Write>(
        &mut self,
        idx: NodeIndex,
        depth: usize,
        line_prefix: &str,
        child_indent: &str,
        writer: &mut W,
    ) -> io::Result<()> {
        let key = self
            .graph
            .node(idx)
            .display_key(self.options.include_version)
            .to_string();

        let (mut normal, collapsed) = self.partition_children(idx);

        // checked before marking, so a self-edge still renders its line
        let already_rendered = self.rendered.contains(&key);
        self.rendered.insert(key.clone());

        let annotation = self.annotation(already_rendered, normal.len());
        writeln!(writer, "{line_prefix}{key}{annotation}")?;

        if already_rendered || depth > self.options.max_depth {
            return Ok(());
        }

        normal.sort_by_key(|&child| {
            self.graph
                .node(child)
                .display_key(self.options.include_version)
                .to_lowercase()
        });

        let total = normal.len();
        for (i, &child) in normal.iter().enumerate() {
            let last_branch = i + 1 == total && collapsed == 0;
            let (glyph, continuation) = if last_branch {
                ("└── ", "    ")
            } else {
                ("├── ", "│   ")
            };
            let line_prefix = format!("{child_indent}{glyph}");
            let grandchild_indent = format!("{child_indent}{continuation}");
            self.node(child, depth + 1, &line_prefix, &grandchild_indent, writer)?;
        }

        if collapsed > 0 {
            writeln!(
                writer,
                "{child_indent}└── <skipped all [{collapsed}] {} dependencies>",
                self.options.collapse_label()
            )?;
        }

        Ok(())
    }

    /// Splits a node's children into normal ones (returned) and a count
    /// of collapsible ones.
    fn partition_children(&self, idx: NodeIndex) -> (Vec<NodeIndex>, usize) {
        let mut normal = Vec::new();
        let mut collapsed = 0;
        for child in self.graph.children(idx) {
            let key = self
                .graph
                .node(child)
                .display_key(self.options.include_version);
            if self.options.is_collapsible(key) {
                collapsed += 1;
            } else {
                normal.push(child);
            }
        }
        (normal, collapsed)
    }

    fn annotation(&self, already_rendered: bool, normal_children: usize) -> String {
        if !already_rendered || self.options.hide_skip_reason {
            return String::new();
        }
        match normal_children {
            0 => " <previously seen>".to_string(),
            1 => " <previously seen - skipping 1 child>".to_string(),
            n => format!(" <previously seen - skipping {n} children>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_str, ManifestDeps, ModuleEdge};

    fn graph_from(pairs: &[(&str, &str)]) -> ModuleGraph {
        let edges: Vec<ModuleEdge> = pairs
            .iter()
            .map(|&(p, c)| ModuleEdge::new(p, c))
            .collect();
        ModuleGraph::from_edges(&edges, &ManifestDeps::default())
    }

    fn render_to_string(graph: &ModuleGraph, options: &RenderOptions) -> String {
        let mut out = Vec::new();
        render(graph, options, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_single_node() {
        let graph = graph_from(&[("root", "a")]);
        let options = RenderOptions::default();
        let output = render_to_string(&graph, &options);
        assert_eq!(output, "root\n└── a\n");
    }

    #[test]
    fn test_end_to_end_example() {
        let graph = graph_from(&[("root", "a"), ("a", "b"), ("root", "b"), ("b", "a")]);
        let options = RenderOptions {
            max_depth: 10,
            ..RenderOptions::default()
        };
        let output = render_to_string(&graph, &options);
        assert_eq!(
            output,
            "root\n\
             ├── a\n\
             │   └── b\n\
             │       └── a <previously seen - skipping 1 child>\n\
             └── b <previously seen - skipping 1 child>\n"
        );
    }

    #[test]
    fn test_determinism() {
        let graph = graph_from(&[
            ("root", "Delta"),
            ("root", "alpha"),
            ("root", "Charlie"),
            ("alpha", "bravo"),
        ]);
        let options = RenderOptions::default();
        let first = render_to_string(&graph, &options);
        let second = render_to_string(&graph, &options);
        assert_eq!(first, second);
    }

    #[test]
    fn test_sort_is_case_insensitive() {
        let graph = graph_from(&[("root", "Zulu"), ("root", "alpha"), ("root", "Mike")]);
        let output = render_to_string(&graph, &RenderOptions::default());
        assert_eq!(output, "root\n├── alpha\n├── Mike\n└── Zulu\n");
    }

    #[test]
    fn test_cycle_terminates() {
        let graph = graph_from(&[("A", "B"), ("B", "A")]);
        let output = render_to_string(&graph, &RenderOptions::default());
        assert_eq!(
            output,
            "A\n└── B\n    └── A <previously seen - skipping 1 child>\n"
        );
    }

    #[test]
    fn test_previously_seen_leaf() {
        // "b" is reached twice and has no children of its own
        let graph = graph_from(&[("root", "a"), ("root", "b"), ("a", "b")]);
        let output = render_to_string(&graph, &RenderOptions::default());
        assert_eq!(
            output,
            "root\n├── a\n│   └── b\n└── b <previously seen>\n"
        );
    }

    #[test]
    fn test_max_depth_children_printed_not_expanded() {
        let graph = graph_from(&[("root", "testify"), ("testify", "spew")]);
        let options = RenderOptions {
            max_depth: 1,
            ..RenderOptions::default()
        };
        let output = render_to_string(&graph, &options);
        assert!(output.contains("testify"));
        assert!(!output.contains("spew"));
        assert_eq!(output, "root\n└── testify\n");
    }

    #[test]
    fn test_max_depth_childless_seed() {
        let graph = ModuleGraph::from_edges(&[], &ManifestDeps::default());
        let options = RenderOptions {
            max_depth: 1,
            ..RenderOptions::default()
        };
        assert_eq!(render_to_string(&graph, &options), "\n");
    }

    #[test]
    fn test_collapse_accounting() {
        let graph = graph_from(&[
            ("root", "x"),
            ("root", "golang.org/x/sys"),
            ("root", "y"),
            ("root", "golang.org/x/net"),
            ("root", "golang.org/x/text"),
        ]);
        let output = render_to_string(&graph, &RenderOptions::default());
        assert_eq!(
            output,
            "root\n\
             ├── x\n\
             ├── y\n\
             └── <skipped all [3] golang.org* dependencies>\n"
        );
    }

    #[test]
    fn test_collapse_only_children() {
        let graph = graph_from(&[("root", "golang.org/x/sys"), ("root", "golang.org/x/net")]);
        let output = render_to_string(&graph, &RenderOptions::default());
        assert_eq!(
            output,
            "root\n└── <skipped all [2] golang.org* dependencies>\n"
        );
    }

    #[test]
    fn test_collapsed_children_never_expanded() {
        let graph = graph_from(&[
            ("root", "golang.org/x/sys"),
            ("golang.org/x/sys", "hidden"),
        ]);
        let output = render_to_string(&graph, &RenderOptions::default());
        assert!(!output.contains("hidden"));
    }

    #[test]
    fn test_collapsed_children_excluded_from_skip_count() {
        // "a" has one normal child and one collapsible child; its second
        // occurrence reports only the normal one
        let graph = graph_from(&[
            ("root", "a"),
            ("a", "b"),
            ("a", "golang.org/x/sys"),
            ("b", "a"),
        ]);
        let output = render_to_string(&graph, &RenderOptions::default());
        assert!(output.contains("a <previously seen - skipping 1 child>"));
    }

    #[test]
    fn test_custom_collapse_prefix() {
        let graph = graph_from(&[("root", "internal/util"), ("root", "a")]);
        let options = RenderOptions {
            collapse_prefixes: vec!["internal/".to_string()],
            ..RenderOptions::default()
        };
        let output = render_to_string(&graph, &options);
        assert!(output.contains("<skipped all [1] internal/* dependencies>"));
        assert!(!output.contains("internal/util"));
    }

    #[test]
    fn test_hide_skip_reason_same_expansion() {
        let graph = graph_from(&[("root", "a"), ("a", "b"), ("root", "b"), ("b", "a")]);
        let annotated = render_to_string(&graph, &RenderOptions::default());
        let bare = render_to_string(
            &graph,
            &RenderOptions {
                hide_skip_reason: true,
                ..RenderOptions::default()
            },
        );

        assert!(!bare.contains("previously seen"));
        assert!(!bare.contains("skipping"));

        // stripping the annotations from the verbose output must leave
        // exactly the bare output: the expanded node set is unchanged
        let stripped: String = annotated
            .lines()
            .map(|line| match line.find(" <") {
                Some(pos) => &line[..pos],
                None => line,
            })
            .map(|line| format!("{line}\n"))
            .collect();
        assert_eq!(stripped, bare);
    }

    #[test]
    fn test_include_version_display_and_dedup() {
        // two distinct versions of "dep" share a display key when
        // versions are hidden, so the second occurrence is pruned
        let graph = graph_from(&[("root", "dep@v1"), ("root", "sub"), ("sub", "dep@v2")]);

        let hidden = render_to_string(&graph, &RenderOptions::default());
        assert!(hidden.contains("dep <previously seen>"));
        assert!(!hidden.contains("dep@"));

        let shown = render_to_string(
            &graph,
            &RenderOptions {
                include_version: true,
                ..RenderOptions::default()
            },
        );
        assert!(shown.contains("dep@v1"));
        assert!(shown.contains("dep@v2"));
        assert!(!shown.contains("previously seen"));
    }

    #[test]
    fn test_parse_then_render() {
        let edges = parse_str("root a\na b\n").unwrap();
        let graph = ModuleGraph::from_edges(&edges, &ManifestDeps::default());
        let output = render_to_string(&graph, &RenderOptions::default());
        assert_eq!(output, "root\n└── a\n    └── b\n");
    }

    #[test]
    fn test_collapse_label_multiple_prefixes() {
        let options = RenderOptions {
            collapse_prefixes: vec!["golang.org".to_string(), "toolchain".to_string()],
            ..RenderOptions::default()
        };
        assert_eq!(options.collapse_label(), "golang.org*, toolchain*");
    }
}
