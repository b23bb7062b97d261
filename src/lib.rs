//! # Unwire - Detect and Break Dependency-Injection Cycles
//!
//! Unwire analyzes codebases wired by a dependency-injection container. It
//! reads pre-parsed declaration snapshots, builds the graph of components
//! and the injection points connecting them, finds the cycles that keep a
//! container from instantiating the graph eagerly, and rewrites declarations
//! to break them.
//!
//! ## Main Components
//!
//! - **Model**: Declaration trees with copy-on-write members
//! - **Registry / Snapshot**: The whole-codebase declaration map and the
//!   loader filling it from `*.decl.json` files
//! - **Graph**: Builds and renders the injection graph
//! - **Detector**: Cyclic component groups (Tarjan) and elementary cycles
//!   (Johnson)
//! - **Strategy / Resolver**: Rewrites that break one cycle each, and the
//!   orchestrator choosing between them
//! - **Reports**: Human-readable and machine-readable reports
//!
//! ## Usage
//!
//! ### Finding cycles
//!
//! ```
//! use unwire::config::MarkerConfig;
//! use unwire::detector::{CycleDetector, ElementaryCycleFinder};
//! use unwire::graph::DependencyGraphBuilder;
//! use unwire::model::{Constructor, Declaration, Field, Parameter, TypeRef};
//! use unwire::registry::DeclarationRegistry;
//!
//! let registry: DeclarationRegistry = [
//!     Declaration::class("shop", "Orders")
//!         .with_annotation("Service")
//!         .with_member(Field::new("billing", TypeRef::simple("Billing")).with_annotation("Autowired")),
//!     Declaration::class("shop", "Billing")
//!         .with_annotation("Service")
//!         .with_member(
//!             Constructor::new().with_parameter(Parameter::new("orders", TypeRef::simple("Orders"))),
//!         ),
//! ]
//! .into_iter()
//! .collect();
//!
//! let graph = DependencyGraphBuilder::new(&MarkerConfig::default()).build(&registry);
//! assert_eq!(graph.edge_count(), 2);
//!
//! let detector = CycleDetector::new(graph.adjacency());
//! assert_eq!(detector.cycle_count(), 1);
//!
//! let cycles = ElementaryCycleFinder::new(graph.adjacency()).find_all_cycles();
//! assert_eq!(cycles, vec![vec!["shop.Orders".to_string(), "shop.Billing".to_string()]]);
//! ```
//!
//! ### Breaking cycles found in snapshots
//!
//! ```no_run
//! use std::path::PathBuf;
//!
//! use unwire::cli::EmitFormat;
//! use unwire::config::MarkerConfig;
//! use unwire::resolver::CycleResolver;
//! use unwire::snapshot::SnapshotLoader;
//! use unwire::writer::SourceWriter;
//!
//! # fn main() -> miette::Result<()> {
//! let mut registry = SnapshotLoader::new().load(&[PathBuf::from("snapshots")], None)?;
//! let markers = MarkerConfig::default();
//! let writer = SourceWriter::new(EmitFormat::Java);
//!
//! let report = CycleResolver::new(&mut registry, &markers, &writer)
//!     .with_base_path("rewritten")
//!     .resolve()?;
//!
//! println!(
//!     "resolved {} cycles, {} left",
//!     report.resolved_count(),
//!     report.unresolved().count()
//! );
//! # Ok(())
//! # }
//! ```

// Private modules
mod constants;
mod progress;
mod toml_parser;
mod utils;

// Public modules
pub mod cli;
pub mod commands;
pub mod common;
pub mod config;
pub mod detector;
pub mod error;
pub mod executors;
pub mod graph;
pub mod injection_filter;
pub mod model;
pub mod registry;
pub mod render;
pub mod reports;
pub mod resolver;
pub mod snapshot;
pub mod strategy;
pub mod writer;

// Main entry point for the library
pub fn run() -> miette::Result<()> {
    use clap::Parser;

    use crate::cli::Cli;
    use crate::commands::execute_command;

    let cli = Cli::parse();
    execute_command(cli.command)
}
