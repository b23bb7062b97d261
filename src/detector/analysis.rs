use serde::Serialize;

use super::{CycleDetector, ElementaryCycleFinder};
use crate::graph::{AdjacencyGraph, Cycle, CycleGroup};

/// Everything detection knows about a graph: its cyclic components, the
/// elementary cycles inside them, and components too large to enumerate
#[derive(Debug, Clone, Default, Serialize)]
pub struct CycleAnalysis {
    groups: Vec<CycleGroup>,
    cycles: Vec<Cycle>,
    skipped: Vec<CycleGroup>,
}

impl CycleAnalysis {
    pub fn analyze(adjacency: &AdjacencyGraph, max_scc_size: usize) -> Self {
        let groups = CycleDetector::new(adjacency).find_cycles();
        if groups.is_empty() {
            return Self::default();
        }

        let mut finder = ElementaryCycleFinder::new(adjacency).with_max_scc_size(max_scc_size);
        let mut cycles = finder.find_all_cycles();
        cycles.sort_by_key(Vec::len);

        Self {
            groups,
            cycles,
            skipped: finder.skipped_sccs().to_vec(),
        }
    }

    pub fn groups(&self) -> &[CycleGroup] {
        &self.groups
    }

    /// Elementary cycles, shortest first
    pub fn cycles(&self) -> &[Cycle] {
        &self.cycles
    }

    pub fn skipped(&self) -> &[CycleGroup] {
        &self.skipped
    }

    pub fn has_cycles(&self) -> bool {
        !self.groups.is_empty()
    }

    /// Elementary cycles passing through `group`
    pub fn cycles_in<'a>(&'a self, group: &'a CycleGroup) -> impl Iterator<Item = &'a Cycle> + 'a {
        self.cycles
            .iter()
            .filter(move |cycle| cycle.first().is_some_and(|first| group.contains(first)))
    }
}
