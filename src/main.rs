use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use modtree::export::{self, ExportFormat};
use modtree::graph::ModuleGraph;
use modtree::parser::{go_mod, mod_graph, parse_str};
use modtree::render::RenderOptions;
use modtree::toolchain;

#[derive(Parser)]
#[command(name = "modtree")]
#[command(version)]
#[command(about = "Renders `go mod graph` output as an indented dependency tree", long_about = None)]
struct Cli {
    /// Path to the Go module to analyze (must contain go.mod)
    #[arg(short, long, default_value = ".")]
    path: PathBuf,

    /// Maximum depth to expand (the main module is depth 1)
    #[arg(long, default_value_t = usize::MAX, hide_default_value = true)]
    max_depth: usize,

    /// Print progress messages to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Show module versions alongside names
    #[arg(long)]
    include_version: bool,

    /// Hide the "<previously seen ...>" annotations (pruning still happens)
    #[arg(long)]
    hide_skip_reason: bool,

    /// Collapse dependencies under this prefix into a summary line (repeatable)
    #[arg(long = "collapse-prefix", value_name = "PREFIX", default_value = "golang.org")]
    collapse_prefixes: Vec<String>,

    /// Output format
    #[arg(long, default_value_t = ExportFormat::Text)]
    format: ExportFormat,

    /// Read edges from a file instead of running `go mod graph`
    #[arg(long, value_name = "FILE")]
    graph_file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut max_depth = cli.max_depth;
    if max_depth < 1 {
        eprintln!("max-depth cannot be < 1, using 1");
        max_depth = 1;
    }

    let manifest_path = cli.path.join("go.mod");
    if cli.verbose {
        eprintln!("Reading manifest: {}", manifest_path.display());
    }
    let manifest = go_mod::parse_file(&manifest_path)
        .with_context(|| format!("reading {}", manifest_path.display()))?;

    let edges = match &cli.graph_file {
        Some(file) => {
            if cli.verbose {
                eprintln!("Reading module graph file: {}", file.display());
            }
            mod_graph::parse_file(file).with_context(|| format!("reading {}", file.display()))?
        }
        None => {
            if cli.verbose {
                eprintln!("Running `go mod graph` in {}", cli.path.display());
            }
            let raw = toolchain::module_graph(&cli.path)?;
            parse_str(&raw).context("parsing module graph")?
        }
    };
    let graph = ModuleGraph::from_edges(&edges, &manifest);

    let options = RenderOptions {
        max_depth,
        include_version: cli.include_version,
        hide_skip_reason: cli.hide_skip_reason,
        collapse_prefixes: cli.collapse_prefixes,
    };

    let stdout = io::stdout();
    export::write(cli.format, &graph, &options, &mut stdout.lock())?;
    Ok(())
}
