//! Report generation modules for different output formats
//!
//! This module contains report generators for various output formats:
//! - human: Human-readable console output
//! - json: JSON format for programmatic use
//! - junit: JUnit XML format for CI/CD integration
//! - github: GitHub Actions workflow commands
//!
//! Every generator renders detection results, and the outcome of a
//! resolution run when one is attached to the context.

pub mod github;
pub mod human;
pub mod json;
pub mod junit;

use crate::detector::CycleAnalysis;
use crate::error::UnwireError;
use crate::graph::{CycleGroup, DependencyEdge, DependencyGraph};
use crate::resolver::ResolutionReport;

/// What a report is generated from
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    pub graph: &'a DependencyGraph,
    pub analysis: &'a CycleAnalysis,
    pub resolution: Option<&'a ResolutionReport>,
}

impl<'a> ReportContext<'a> {
    pub fn new(graph: &'a DependencyGraph, analysis: &'a CycleAnalysis) -> Self {
        Self {
            graph,
            analysis,
            resolution: None,
        }
    }

    pub fn with_resolution(mut self, resolution: &'a ResolutionReport) -> Self {
        self.resolution = Some(resolution);
        self
    }

    /// Edges running between members of `group`, sorted by endpoints
    pub fn edges_within(&self, group: &CycleGroup) -> Vec<&'a DependencyEdge> {
        let mut edges: Vec<_> = self
            .graph
            .edges()
            .iter()
            .filter(|edge| {
                group.contains(edge.from_component()) && group.contains(edge.to_component())
            })
            .collect();
        edges.sort_by(|a, b| {
            a.from_component()
                .cmp(b.from_component())
                .then_with(|| a.to_component().cmp(b.to_component()))
        });
        edges
    }
}

/// Common trait for all report generators
pub trait ReportGenerator {
    fn generate_report(&self, context: &ReportContext<'_>) -> Result<String, UnwireError>;
}

// Re-export for convenience
pub use github::GitHubReportGenerator;
pub use human::HumanReportGenerator;
pub use json::JsonReportGenerator;
pub use junit::JunitReportGenerator;
