//! Command executors that handle the actual logic for each command

pub mod detect;
pub mod graph;
pub mod resolve;

use console::style;
use miette::{Result, WrapErr};

use crate::cli::OutputFormat;
use crate::config::{AnalysisConfig, MarkerConfig};
use crate::error::UnwireError;
use crate::graph::{DependencyGraph, DependencyGraphBuilder, InjectionKind};
use crate::progress::ProgressReporter;
use crate::registry::DeclarationRegistry;
use crate::reports::{
    GitHubReportGenerator, HumanReportGenerator, JsonReportGenerator, JunitReportGenerator,
    ReportContext, ReportGenerator,
};
use crate::snapshot::SnapshotLoader;
use crate::toml_parser::UnwireToml;

/// Trait for command executors
pub trait CommandExecutor {
    type Config;

    /// Execute the command with the given configuration
    fn execute(config: Self::Config) -> Result<()>;
}

/// Declarations and markers every command analyzes
pub(crate) struct Codebase {
    pub registry: DeclarationRegistry,
    pub markers: MarkerConfig,
}

/// Create progress reporter if we're in an interactive terminal
pub(crate) fn interactive_progress() -> Option<ProgressReporter> {
    if console::Term::stderr().is_term() {
        Some(ProgressReporter::new())
    } else {
        None
    }
}

/// Load the marker configuration and every snapshot under the configured
/// paths; `None` when no declaration was found
pub(crate) fn load_codebase(
    config: &AnalysisConfig,
    mut progress: Option<&mut ProgressReporter>,
) -> Result<Option<Codebase>> {
    let markers = UnwireToml::discover(&config.paths, config.config_file.as_deref())
        .wrap_err("Failed to load unwire configuration")?
        .markers;

    if let Some(p) = progress.as_deref_mut() {
        p.start_discovery();
    }
    let mut loader = SnapshotLoader::with_pattern(&config.pattern)
        .wrap_err("Failed to set up snapshot discovery")?;
    let registry = loader
        .load(&config.paths, progress.as_deref())
        .wrap_err("Failed to load declaration snapshots")?;
    if let Some(p) = progress.as_deref_mut() {
        p.finish_discovery(registry.len());
    }

    if registry.is_empty() {
        eprintln!("{} No declarations found to analyze", style("ℹ").blue());
        return Ok(None);
    }
    Ok(Some(Codebase { registry, markers }))
}

/// Build the injection graph, announcing which injection kinds count
pub(crate) fn build_graph(
    codebase: &Codebase,
    config: &AnalysisConfig,
    mut progress: Option<&mut ProgressReporter>,
) -> DependencyGraph {
    eprintln!("\n{} Building injection graph...", style("🔨").blue());
    for kind in [
        InjectionKind::Field,
        InjectionKind::Setter,
        InjectionKind::Constructor,
        InjectionKind::FactoryMethod,
    ] {
        eprintln!(
            "  {} {} injection: {}",
            style("→").dim(),
            crate::utils::string::capitalize(&kind.to_string()),
            if config.filter.includes(kind) {
                style("included").green()
            } else {
                style("excluded").red()
            }
        );
    }

    if let Some(p) = progress.as_deref_mut() {
        p.start_graph_building();
    }
    let graph = DependencyGraphBuilder::new(&codebase.markers)
        .with_filter(config.filter)
        .build(&codebase.registry);
    if let Some(p) = progress.as_deref_mut() {
        p.finish_graph_building(graph.edge_count());
    }
    graph
}

/// Render a report in the requested format
pub(crate) fn generate_report(
    format: OutputFormat,
    max_cycles: Option<usize>,
    context: &ReportContext<'_>,
) -> Result<String, UnwireError> {
    match format {
        OutputFormat::Human => HumanReportGenerator::new(max_cycles).generate_report(context),
        OutputFormat::Json => JsonReportGenerator::new().generate_report(context),
        OutputFormat::Junit => JunitReportGenerator::new().generate_report(context),
        OutputFormat::GitHub => GitHubReportGenerator::new().generate_report(context),
    }
}
