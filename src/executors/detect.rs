//! Detect command executor

use console::style;
use miette::{IntoDiagnostic, Result, WrapErr};

use super::{build_graph, generate_report, interactive_progress, load_codebase};
use crate::config::DetectConfig;
use crate::detector::CycleAnalysis;
use crate::executors::CommandExecutor;
use crate::reports::ReportContext;

pub struct DetectExecutor;

impl CommandExecutor for DetectExecutor {
    type Config = DetectConfig;

    fn execute(config: Self::Config) -> Result<()> {
        eprintln!(
            "{} Checking for dependency-injection cycles...\n",
            style("🪢").cyan()
        );

        let mut progress = interactive_progress();

        let Some(codebase) = load_codebase(&config.analysis, progress.as_mut())? else {
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

        let context = ReportContext::new(&graph, &analysis);
        match generate_report(config.format, config.max_cycles, &context) {
            Ok(report) => print!("{report}"),
            Err(e) => {
                return Err(e)
                    .into_diagnostic()
                    .wrap_err("Failed to generate report");
            }
        }

        // Exit with error code if cycles found and requested
        if config.error_on_cycles && analysis.has_cycles() {
            std::process::exit(1);
        }

        Ok(())
    }
}
