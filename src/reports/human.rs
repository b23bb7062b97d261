//! Human-readable console report generation

use std::fmt::Write;

use console::style;

use super::{ReportContext, ReportGenerator};
use crate::error::UnwireError;
use crate::resolver::{CycleOutcome, ResolutionReport};
use crate::utils::string::pluralize;

pub struct HumanReportGenerator {
    max_cycles: Option<usize>,
}

impl HumanReportGenerator {
    pub fn new(max_cycles: Option<usize>) -> Self {
        Self { max_cycles }
    }

    fn write_detection(
        &self,
        output: &mut String,
        context: &ReportContext<'_>,
    ) -> Result<(), UnwireError> {
        let analysis = context.analysis;

        if !analysis.has_cycles() {
            write!(
                output,
                "\n{} No dependency cycles detected! Every component can be wired eagerly.\n",
                style("✅").green().bold()
            )?;
            return Ok(());
        }

        let total_groups = analysis.groups().len();
        write!(
            output,
            "\n{} Found {} cyclic component {} ({} elementary {}):\n\n",
            style("❌").red().bold(),
            style(total_groups).red().bold(),
            pluralize("group", total_groups),
            style(analysis.cycles().len()).yellow(),
            pluralize("cycle", analysis.cycles().len())
        )?;

        let shown = self.max_cycles.unwrap_or(total_groups);
        for (i, group) in analysis.groups().iter().take(shown).enumerate() {
            writeln!(output, "{} Group #{}", style("🔄").yellow(), i + 1)?;
            writeln!(output, "  {} Components involved:", style("📦").blue())?;
            let mut members: Vec<_> = group.iter().collect();
            members.sort();
            for member in members {
                writeln!(output, "    {} {}", style("•").dim(), style(member).bold())?;
            }

            writeln!(
                output,
                "\n  {} Injection points creating this group:",
                style("🔗").cyan()
            )?;
            for edge in context.edges_within(group) {
                writeln!(
                    output,
                    "    {} {} → {} ({} `{}`)",
                    style("→").dim(),
                    style(edge.from_component()).yellow(),
                    style(edge.to_component()).yellow(),
                    style(edge.injection_kind()).dim(),
                    edge.member_name()
                )?;
            }

            let cycles: Vec<_> = analysis.cycles_in(group).collect();
            if !cycles.is_empty() {
                writeln!(output, "\n  {} Elementary cycles:", style("🔁").magenta())?;
                for cycle in cycles {
                    let mut path = cycle.clone();
                    path.extend(cycle.first().cloned());
                    writeln!(output, "    {} {}", style("•").dim(), path.join(" → "))?;
                }
            }
            writeln!(output)?;
        }

        if shown < total_groups {
            writeln!(
                output,
                "{} Showing {} of {} groups. Use --max-cycles to see more.\n",
                style("ℹ️").blue(),
                style(shown).yellow(),
                style(total_groups).yellow()
            )?;
        }

        for group in analysis.skipped() {
            writeln!(
                output,
                "{} A group of {} components is too large to enumerate its cycles; raise \
                 --max-scc-size to include it.",
                style("⚠").yellow().bold(),
                group.len()
            )?;
        }

        if context.resolution.is_none() {
            writeln!(
                output,
                "{} Run `unwire resolve` to break these cycles, with --dry-run to preview the \
                 rewrites first.",
                style("💡").yellow()
            )?;
            writeln!(
                output,
                "{} Constructor injection edges are the hardest to break; prefer field or setter \
                 injection on one side of each cycle.",
                style("💡").yellow()
            )?;
        }
        Ok(())
    }
}

fn write_resolution(output: &mut String, report: &ResolutionReport) -> Result<(), UnwireError> {
    let mode = if report.dry_run {
        style(" (dry run)").dim().to_string()
    } else {
        String::new()
    };
    writeln!(output, "\n{} Resolution{}:\n", style("✂").cyan().bold(), mode)?;

    for outcome in &report.outcomes {
        match outcome {
            CycleOutcome::Resolved {
                cycle,
                strategy,
                link,
                modified,
                generated,
            } => {
                let site = match link {
                    Some((from, to)) => format!(" on {from} → {to}"),
                    None => String::new(),
                };
                writeln!(
                    output,
                    "  {} {}: {}{}",
                    style("✓").green(),
                    cycle.join(" → "),
                    style(strategy).bold(),
                    site
                )?;
                if !modified.is_empty() {
                    writeln!(output, "      {} modified {}", style("→").dim(), modified.join(", "))?;
                }
                if !generated.is_empty() {
                    writeln!(
                        output,
                        "      {} generated {}",
                        style("→").dim(),
                        generated.join(", ")
                    )?;
                }
            }
            CycleOutcome::AlreadyBroken { cycle } => writeln!(
                output,
                "  {} {}: {}",
                style("↺").dim(),
                cycle.join(" → "),
                style("already broken").dim()
            )?,
            CycleOutcome::Unresolved(unresolved) => {
                writeln!(
                    output,
                    "  {} {}: {}",
                    style("✗").red(),
                    unresolved.members.join(" → "),
                    style("unresolved").red().bold()
                )?;
                for edge in &unresolved.rejected {
                    writeln!(output, "      {} rejected {edge}", style("→").dim())?;
                }
            }
            CycleOutcome::Skipped { members } => writeln!(
                output,
                "  {} group of {} components: {}",
                style("⏭").yellow(),
                members.len(),
                style("skipped").yellow()
            )?,
        }
    }

    let unresolved = report.unresolved().count();
    writeln!(
        output,
        "\n{} {} resolved, {} already broken, {} unresolved, {} skipped",
        style("Σ").bold(),
        style(report.resolved_count()).green().bold(),
        report.already_broken_count(),
        style(unresolved).red().bold(),
        report.skipped_count()
    )?;

    let verb = if report.dry_run { "Would modify" } else { "Modified" };
    writeln!(
        output,
        "{} {} {} {}, generated {}",
        style("📝").blue(),
        verb,
        report.modified.len(),
        pluralize("declaration", report.modified.len()),
        report.generated.len()
    )?;
    Ok(())
}

impl ReportGenerator for HumanReportGenerator {
    fn generate_report(&self, context: &ReportContext<'_>) -> Result<String, UnwireError> {
        let mut output = String::new();
        self.write_detection(&mut output, context)?;
        if let Some(report) = context.resolution {
            write_resolution(&mut output, report)?;
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::fixtures::{acyclic_graph, cyclic_graph};
    use crate::resolver::{RejectedEdge, UnresolvedCycle};
    use crate::graph::InjectionKind;

    #[test]
    fn test_clean_graph() {
        let (graph, analysis) = acyclic_graph();
        let report = HumanReportGenerator::new(None)
            .generate_report(&ReportContext::new(&graph, &analysis))
            .unwrap();
        assert!(report.contains("No dependency cycles detected"));
    }

    #[test]
    fn test_lists_group_edges_and_cycles() {
        let (graph, analysis) = cyclic_graph();
        let report = HumanReportGenerator::new(None)
            .generate_report(&ReportContext::new(&graph, &analysis))
            .unwrap();

        assert!(report.contains("Group #1"));
        assert!(report.contains("`b`"));
        assert!(report.contains("app.A → app.B → app.A"));
        // app.C is outside the group
        assert!(!report.contains("setA"));
    }

    #[test]
    fn test_max_cycles_truncates() {
        let (graph, analysis) = cyclic_graph();
        let report = HumanReportGenerator::new(Some(0))
            .generate_report(&ReportContext::new(&graph, &analysis))
            .unwrap();
        assert!(report.contains("Showing 0 of 1 groups"));
    }

    #[test]
    fn test_resolution_summary() {
        let (graph, analysis) = cyclic_graph();
        let mut resolution = ResolutionReport::new(true);
        resolution
            .outcomes
            .push(CycleOutcome::Unresolved(UnresolvedCycle {
                members: vec!["app.A".to_string(), "app.B".to_string()],
                rejected: vec![RejectedEdge {
                    from: "app.B".to_string(),
                    to: "app.A".to_string(),
                    kind: InjectionKind::Constructor,
                }],
            }));

        let report = HumanReportGenerator::new(None)
            .generate_report(&ReportContext::new(&graph, &analysis).with_resolution(&resolution))
            .unwrap();

        assert!(report.contains("(dry run)"));
        assert!(report.contains("rejected app.B → app.A (constructor)"));
        assert!(report.contains("Would modify 0"));
        assert!(!report.contains("Run `unwire resolve`"));
    }
}
