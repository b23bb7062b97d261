//! JUnit XML format report generation
//!
//! One test case per cyclic group; with a resolution attached, one more per
//! cycle outcome, failing when the cycle was left unresolved.

use std::fmt::Write;

use super::{ReportContext, ReportGenerator};
use crate::error::UnwireError;
use crate::resolver::CycleOutcome;

pub struct JunitReportGenerator;

impl Default for JunitReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl JunitReportGenerator {
    pub fn new() -> Self {
        Self
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl ReportGenerator for JunitReportGenerator {
    fn generate_report(&self, context: &ReportContext<'_>) -> Result<String, UnwireError> {
        let analysis = context.analysis;
        let mut cases = String::new();
        let mut tests = 0;
        let mut failures = 0;

        if analysis.has_cycles() {
            for group in analysis.groups() {
                tests += 1;
                failures += 1;
                let mut members: Vec<_> = group.iter().map(String::as_str).collect();
                members.sort();
                let name = escape(&members.join(", "));
                writeln!(
                    cases,
                    r#"    <testcase name="{name}" classname="unwire.detect">"#
                )?;
                writeln!(
                    cases,
                    r#"      <failure message="Dependency cycle between {} components">"#,
                    group.len()
                )?;
                for edge in context.edges_within(group) {
                    writeln!(
                        cases,
                        "{} → {} ({} {})",
                        escape(edge.from_component()),
                        escape(edge.to_component()),
                        edge.injection_kind(),
                        escape(edge.member_name())
                    )?;
                }
                writeln!(cases, r#"      </failure>"#)?;
                writeln!(cases, r#"    </testcase>"#)?;
            }
        } else {
            tests += 1;
            writeln!(
                cases,
                r#"    <testcase name="check-dependency-cycles" classname="unwire.detect" />"#
            )?;
        }

        if let Some(report) = context.resolution {
            for outcome in &report.outcomes {
                tests += 1;
                let name = escape(&outcome.members().join(" → "));
                match outcome {
                    CycleOutcome::Unresolved(unresolved) => {
                        failures += 1;
                        writeln!(
                            cases,
                            r#"    <testcase name="{name}" classname="unwire.resolve">"#
                        )?;
                        writeln!(
                            cases,
                            r#"      <failure message="No strategy breaks this cycle">"#
                        )?;
                        for edge in &unresolved.rejected {
                            writeln!(cases, "{}", escape(&edge.to_string()))?;
                        }
                        writeln!(cases, r#"      </failure>"#)?;
                        writeln!(cases, r#"    </testcase>"#)?;
                    }
                    CycleOutcome::Skipped { .. } => {
                        writeln!(
                            cases,
                            r#"    <testcase name="{name}" classname="unwire.resolve"><skipped /></testcase>"#
                        )?;
                    }
                    CycleOutcome::Resolved { .. } | CycleOutcome::AlreadyBroken { .. } => {
                        writeln!(
                            cases,
                            r#"    <testcase name="{name}" classname="unwire.resolve" />"#
                        )?;
                    }
                }
            }
        }

        let mut output = String::new();
        writeln!(output, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(
            output,
            r#"<testsuites name="unwire" tests="{tests}" failures="{failures}">"#
        )?;
        writeln!(
            output,
            r#"  <testsuite name="dependency-cycles" tests="{tests}" failures="{failures}">"#
        )?;
        output.push_str(&cases);
        writeln!(output, r#"  </testsuite>"#)?;
        writeln!(output, r#"</testsuites>"#)?;

        Ok(output)
    }
}
