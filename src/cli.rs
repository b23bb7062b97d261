use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::common::{CommonArgs, CycleDisplayArgs, FormatArgs};

#[derive(Parser)]
#[command(
    name = "unwire",
    about = "🪢 Detect and break dependency-injection cycles",
    long_about = "unwire reads pre-parsed declaration snapshots of a dependency-injection \
                  codebase, builds the component graph its injection points describe, finds the \
                  cycles in it, and rewrites declarations to break them.",
    subcommand_required = true,
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find dependency cycles between components
    ///
    /// Builds the injection graph from the declaration snapshots and reports
    /// every cyclic group of components together with the elementary cycles
    /// running through it.
    #[command(
        long_about = "Detect dependency-injection cycles. This command loads every declaration \
                      snapshot under the given paths, records an edge for each field, setter, \
                      constructor and factory-method injection point, groups the components into \
                      strongly connected components, and enumerates the elementary cycles inside \
                      each group."
    )]
    Detect {
        #[command(flatten)]
        common: CommonArgs,

        #[command(flatten)]
        format: FormatArgs,

        #[command(flatten)]
        cycle_display: CycleDisplayArgs,

        /// Exit with error code if cycles found
        #[arg(long, env = "UNWIRE_ERROR_ON_CYCLES")]
        error_on_cycles: bool,
    },

    /// Rewrite declarations to break dependency cycles
    ///
    /// Tries, per cycle, a deferred-initialization annotation, setter
    /// injection, interface extraction, and finally method extraction, and
    /// writes every declaration it changed or created.
    #[command(
        long_about = "Break dependency-injection cycles by rewriting declarations. Cycles are \
                      handled shortest first. For each one the edge strategies are tried link by \
                      link in preference order (lazy annotation, setter injection, interface \
                      extraction) before the whole cycle is handed to method extraction. Changed \
                      and generated declarations are written under --output-dir unless \
                      --dry-run is given."
    )]
    Resolve {
        #[command(flatten)]
        common: CommonArgs,

        #[command(flatten)]
        format: FormatArgs,

        /// Directory rewritten declarations are written under
        #[arg(
            short,
            long,
            value_name = "DIR",
            default_value = ".",
            env = "UNWIRE_OUTPUT_DIR"
        )]
        output_dir: PathBuf,

        /// Compute the rewrites without writing anything
        #[arg(long, env = "UNWIRE_DRY_RUN")]
        dry_run: bool,

        /// Format of written declarations
        #[arg(
            long,
            value_enum,
            default_value = crate::constants::output::DEFAULT_EMIT_FORMAT,
            env = "UNWIRE_EMIT"
        )]
        emit: EmitFormat,

        /// Exit with error code if any cycle is left unresolved
        #[arg(long, env = "UNWIRE_ERROR_ON_UNRESOLVED")]
        error_on_unresolved: bool,
    },

    /// Render the component dependency graph
    ///
    /// Generates an ASCII, Mermaid, or Graphviz DOT view of the injection
    /// graph with cyclic groups highlighted.
    #[command(
        long_about = "Render the injection graph in various formats including ASCII art, Mermaid \
                      diagrams and Graphviz DOT files. Components are grouped by package, edges \
                      are drawn per injection kind, and cyclic groups can be highlighted."
    )]
    Graph {
        #[command(flatten)]
        common: CommonArgs,

        /// Graph format
        #[arg(
            short,
            long,
            value_enum,
            default_value = "ascii",
            env = "UNWIRE_GRAPH_FORMAT"
        )]
        format: GraphFormat,

        /// Output file (stdout if not specified)
        #[arg(short, long, env = "UNWIRE_OUTPUT")]
        output: Option<PathBuf>,

        /// Highlight cycles in the graph
        #[arg(long, default_value = "true", env = "UNWIRE_HIGHLIGHT_CYCLES")]
        highlight_cycles: bool,

        /// Label edges with the injecting member
        #[arg(long, env = "UNWIRE_SHOW_MEMBERS")]
        show_members: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    Junit,
    #[value(name = "github")]
    GitHub,
}

#[derive(Clone, Copy, Debug, PartialEq, clap::ValueEnum)]
pub enum GraphFormat {
    Ascii,
    Mermaid,
    Dot,
}

/// How [`SourceWriter`](crate::writer::SourceWriter) renders declarations
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum EmitFormat {
    /// Java-style source text
    Java,
    /// The snapshot JSON model
    Json,
}

impl EmitFormat {
    pub fn extension(self) -> &'static str {
        match self {
            EmitFormat::Java => "java",
            EmitFormat::Json => "json",
        }
    }
}
