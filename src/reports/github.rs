//! GitHub Actions format report generation

use std::fmt::Write;

use super::{ReportContext, ReportGenerator};
use crate::error::UnwireError;
use crate::resolver::CycleOutcome;

pub struct GitHubReportGenerator;

impl Default for GitHubReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl GitHubReportGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl ReportGenerator for GitHubReportGenerator {
    fn generate_report(&self, context: &ReportContext<'_>) -> Result<String, UnwireError> {
        let mut output = String::new();
        let analysis = context.analysis;

        if !analysis.has_cycles() {
            writeln!(
                output,
                "::notice title=Dependency Injection Check::No dependency cycles detected! ✅"
            )?;
            return Ok(output);
        }

        // A fully resolved run only warns
        let level = match context.resolution {
            Some(report) if report.is_complete() => "warning",
            _ => "error",
        };
        let groups = analysis.groups().len();
        writeln!(
            output,
            "::{level} title=Dependency Cycles::Found {} cyclic component group{} ({} elementary \
             cycle{})",
            groups,
            if groups == 1 { "" } else { "s" },
            analysis.cycles().len(),
            if analysis.cycles().len() == 1 { "" } else { "s" }
        )?;

        for (i, group) in analysis.groups().iter().enumerate() {
            let mut members: Vec<_> = group.iter().map(String::as_str).collect();
            members.sort();
            writeln!(
                output,
                "::warning title=Group {}::Components: {}",
                i + 1,
                members.join(", ")
            )?;

            for edge in context.edges_within(group) {
                writeln!(
                    output,
                    "::notice::  {} → {} ({} `{}`)",
                    edge.from_component(),
                    edge.to_component(),
                    edge.injection_kind(),
                    edge.member_name()
                )?;
            }
        }

        match context.resolution {
            None => writeln!(
                output,
                "::notice title=Recommendation::Run `unwire resolve --dry-run` to preview \
                 automatic rewrites that break these cycles."
            )?,
            Some(report) => {
                for outcome in &report.outcomes {
                    match outcome {
                        CycleOutcome::Resolved {
                            cycle, strategy, ..
                        } => writeln!(
                            output,
                            "::notice title=Resolved::{} by {strategy}",
                            cycle.join(" → ")
                        )?,
                        CycleOutcome::Unresolved(unresolved) => writeln!(
                            output,
                            "::error title=Unresolved Cycle::{}",
                            unresolved.members.join(" → ")
                        )?,
                        CycleOutcome::Skipped { members } => writeln!(
                            output,
                            "::warning title=Skipped Group::{} components too many to enumerate",
                            members.len()
                        )?,
                        CycleOutcome::AlreadyBroken { .. } => {}
                    }
                }
            }
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::fixtures::{acyclic_graph, cyclic_graph};
    use crate::resolver::ResolutionReport;

    #[test]
    fn test_clean_run_is_notice() {
        let (graph, analysis) = acyclic_graph();
        let report = GitHubReportGenerator::new()
            .generate_report(&ReportContext::new(&graph, &analysis))
            .unwrap();
        assert!(report.starts_with("::notice"));
    }

    #[test]
    fn test_cycles_are_errors_until_resolved() {
        let (graph, analysis) = cyclic_graph();
        let detected = GitHubReportGenerator::new()
            .generate_report(&ReportContext::new(&graph, &analysis))
            .unwrap();
        assert!(detected.starts_with("::error title=Dependency Cycles::Found 1 cyclic"));
        assert!(detected.contains("Components: app.A, app.B"));

        let resolution = ResolutionReport::new(false);
        let resolved = GitHubReportGenerator::new()
            .generate_report(&ReportContext::new(&graph, &analysis).with_resolution(&resolution))
            .unwrap();
        assert!(resolved.starts_with("::warning"));
    }
}
