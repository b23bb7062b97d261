//! Resolve command executor

use console::style;
use miette::{IntoDiagnostic, Result, WrapErr};

use super::{build_graph, generate_report, interactive_progress, load_codebase};
use crate::config::ResolveConfig;
use crate::detector::CycleAnalysis;
use crate::executors::CommandExecutor;
use crate::reports::ReportContext;
use crate::resolver::CycleResolver;
use crate::utils::string::pluralize;
use crate::writer::SourceWriter;

pub struct ResolveExecutor;

impl CommandExecutor for ResolveExecutor {
    type Config = ResolveConfig;

    fn execute(config: Self::Config) -> Result<()> {
        eprintln!(
            "{} Untangling dependency-injection cycles...\n",
            style("🪢").cyan()
        );

        let mut progress = interactive_progress();

        let Some(mut codebase) = load_codebase(&config.analysis, progress.as_mut())? else {
            return Ok(());
        };
        let graph = build_graph(&codebase, &config.analysis, progress.as_mut());

        if let Some(p) = progress.as_mut() {
            p.start_cycle_detection();
        }
        let analysis = CycleAnalysis::analyze(graph.adjacency(), config.analysis.max_scc_size);
        if let Some(p) = progress.as_ref() {
            p.finish_cycle_detection(analysis.groups().len());
        }

        if let Some(p) = progress.as_mut() {
            p.start_resolution(config.dry_run);
        }
        let writer = SourceWriter::new(config.emit);
        let report = {
            let mut resolver =
                CycleResolver::new(&mut codebase.registry, &codebase.markers, &writer)
                    .with_base_path(&config.output_dir)
                    .with_dry_run(config.dry_run)
                    .with_max_scc_size(config.analysis.max_scc_size)
                    .with_filter(config.analysis.filter);
            if let Some(p) = progress.as_ref() {
                resolver = resolver.with_progress(p);
            }
            resolver
                .resolve()
                .wrap_err("Failed to resolve dependency cycles")?
        };
        let unresolved: Vec<_> = report.unresolved().cloned().collect();
        if let Some(p) = progress.as_ref() {
            p.finish_resolution(report.resolved_count(), unresolved.len());
        }

        let context = ReportContext::new(&graph, &analysis).with_resolution(&report);
        match generate_report(config.format, None, &context) {
            Ok(output) => print!("{output}"),
            Err(e) => {
                return Err(e)
                    .into_diagnostic()
                    .wrap_err("Failed to generate report");
            }
        }

        let written = report.modified.len() + report.generated.len();
        if !config.dry_run && written > 0 {
            eprintln!(
                "{} Wrote {} {} under {}",
                style("✓").green(),
                written,
                pluralize("declaration", written),
                style(config.output_dir.display()).bold()
            );
        }

        if config.error_on_unresolved && !unresolved.is_empty() {
            for cycle in unresolved {
                eprintln!("{:?}", miette::Report::new(cycle));
            }
            std::process::exit(1);
        }

        Ok(())
    }
}
