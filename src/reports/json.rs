//! JSON format report generation

use serde_json::json;

use super::{ReportContext, ReportGenerator};
use crate::error::UnwireError;

pub struct JsonReportGenerator;

impl Default for JsonReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonReportGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl ReportGenerator for JsonReportGenerator {
    fn generate_report(&self, context: &ReportContext<'_>) -> Result<String, UnwireError> {
        let analysis = context.analysis;

        let groups: Vec<_> = analysis
            .groups()
            .iter()
            .map(|group| {
                let mut members: Vec<_> = group.iter().collect();
                members.sort();

                let edges: Vec<_> = context
                    .edges_within(group)
                    .into_iter()
                    .map(|edge| {
                        json!({
                            "from": edge.from_component(),
                            "to": edge.to_component(),
                            "kind": edge.injection_kind(),
                            "member": edge.member_name(),
                            "site": edge.site().to_string(),
                        })
                    })
                    .collect();

                json!({
                    "components": members,
                    "edges": edges,
                    "cycles": analysis.cycles_in(group).collect::<Vec<_>>(),
                })
            })
            .collect();

        let mut report = json!({
            "has_cycles": analysis.has_cycles(),
            "group_count": analysis.groups().len(),
            "cycle_count": analysis.cycles().len(),
            "groups": groups,
            "skipped": analysis.skipped(),
        });
        if let Some(resolution) = context.resolution {
            report["resolution"] = serde_json::to_value(resolution)?;
        }

        serde_json::to_string_pretty(&report).map_err(UnwireError::Json)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::reports::fixtures::{acyclic_graph, cyclic_graph};
    use crate::resolver::{CycleOutcome, ResolutionReport};
    use crate::strategy::StrategyKind;

    #[test]
    fn test_json_report_no_cycles() {
        let (graph, analysis) = acyclic_graph();
        let report = JsonReportGenerator::new()
            .generate_report(&ReportContext::new(&graph, &analysis))
            .unwrap();
        let json: Value = serde_json::from_str(&report).unwrap();

        assert_eq!(json["has_cycles"], false);
        assert_eq!(json["cycle_count"], 0);
        assert_eq!(json["groups"].as_array().unwrap().len(), 0);
        assert!(json.get("resolution").is_none());
    }

    #[test]
    fn test_json_report_with_cycles() {
        let (graph, analysis) = cyclic_graph();
        let report = JsonReportGenerator::new()
            .generate_report(&ReportContext::new(&graph, &analysis))
            .unwrap();
        let json: Value = serde_json::from_str(&report).unwrap();

        assert_eq!(json["has_cycles"], true);
        assert_eq!(json["group_count"], 1);

        let group = &json["groups"][0];
        assert_eq!(group["components"], json!(["app.A", "app.B"]));
        assert_eq!(group["edges"].as_array().unwrap().len(), 2);
        assert_eq!(group["edges"][0]["kind"], "field");
        assert_eq!(group["edges"][1]["kind"], "constructor");
        assert_eq!(group["cycles"], json!([["app.A", "app.B"]]));
    }

    #[test]
    fn test_json_report_resolution_outcomes() {
        let (graph, analysis) = cyclic_graph();
        let mut resolution = ResolutionReport::new(false);
        resolution.outcomes.push(CycleOutcome::Resolved {
            cycle: vec!["app.A".to_string(), "app.B".to_string()],
            strategy: StrategyKind::LazyAnnotation,
            link: Some(("app.A".to_string(), "app.B".to_string())),
            modified: vec!["app.A".to_string()],
            generated: vec![],
        });

        let report = JsonReportGenerator::new()
            .generate_report(&ReportContext::new(&graph, &analysis).with_resolution(&resolution))
            .unwrap();
        let json: Value = serde_json::from_str(&report).unwrap();

        let outcome = &json["resolution"]["outcomes"][0];
        assert_eq!(outcome["status"], "resolved");
        assert_eq!(outcome["strategy"], "lazy_annotation");
        assert_eq!(outcome["modified"], json!(["app.A"]));
    }

    #[test]
    fn test_json_report_pretty_formatting() {
        let (graph, analysis) = acyclic_graph();
        let report = JsonReportGenerator
            .generate_report(&ReportContext::new(&graph, &analysis))
            .unwrap();

        assert!(report.contains('\n'));
        assert!(report.contains("  "));
    }
}
