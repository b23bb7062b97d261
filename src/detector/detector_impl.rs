use super::indexed::IndexedGraph;
use crate::graph::{AdjacencyGraph, CycleGroup};

/// Detector for finding dependency cycles in component graphs
///
/// Uses Tarjan's Strongly Connected Components algorithm to group the nodes
/// of the graph; every group with more than one member contains at least one
/// cycle.
pub struct CycleDetector<'g> {
    graph: IndexedGraph<'g>,
}

impl<'g> CycleDetector<'g> {
    pub fn new(adjacency: &'g AdjacencyGraph) -> Self {
        Self {
            graph: IndexedGraph::new(adjacency),
        }
    }

    /// Every maximal strongly connected component, singletons included
    pub fn find_sccs(&self) -> Vec<CycleGroup> {
        self.graph
            .sccs()
            .into_iter()
            .map(|members| {
                members
                    .into_iter()
                    .map(|index| self.graph.name(index).to_string())
                    .collect()
            })
            .collect()
    }

    /// Components with at least two members. A node with only a self-loop is
    /// not reported.
    pub fn find_cycles(&self) -> Vec<CycleGroup> {
        self.find_sccs()
            .into_iter()
            .filter(|group| group.len() > 1)
            .collect()
    }

    /// Check if any cycles were detected
    pub fn has_cycles(&self) -> bool {
        self.cycle_count() > 0
    }

    /// Get the number of cyclic components
    pub fn cycle_count(&self) -> usize {
        self.find_cycles().len()
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexSet;
    use pretty_assertions::assert_eq;

    use super::*;

    fn adjacency(edges: &[(&str, &str)]) -> AdjacencyGraph {
        let mut graph = AdjacencyGraph::new();
        for (from, to) in edges {
            graph
                .entry(from.to_string())
                .or_default()
                .insert(to.to_string());
        }
        graph
    }

    fn group(names: &[&str]) -> CycleGroup {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn test_no_cycles_in_linear_graph() {
        let graph = adjacency(&[("a", "b"), ("b", "c")]);
        let detector = CycleDetector::new(&graph);

        assert_eq!(detector.find_sccs().len(), 3);
        assert_eq!(detector.cycle_count(), 0);
        assert!(!detector.has_cycles());
    }

    #[test]
    fn test_simple_two_node_cycle() {
        let graph = adjacency(&[("a", "b"), ("b", "a")]);
        let detector = CycleDetector::new(&graph);

        assert_eq!(detector.find_cycles(), vec![group(&["a", "b"])]);
    }

    #[test]
    fn test_three_node_cycle_with_tail() {
        let graph = adjacency(&[("x", "a"), ("a", "b"), ("b", "c"), ("c", "a")]);
        let detector = CycleDetector::new(&graph);

        assert_eq!(detector.find_cycles(), vec![group(&["a", "b", "c"])]);
        assert_eq!(detector.find_sccs()[0], group(&["x"]));
    }

    #[test]
    fn test_self_referencing_component() {
        let graph = adjacency(&[("a", "a"), ("a", "b")]);
        let detector = CycleDetector::new(&graph);

        assert!(!detector.has_cycles());
    }

    #[test]
    fn test_disjoint_cycles_counted_separately() {
        let graph = adjacency(&[("a", "b"), ("b", "a"), ("c", "d"), ("d", "c")]);
        let detector = CycleDetector::new(&graph);

        assert_eq!(detector.cycle_count(), 2);
        assert_eq!(
            detector.find_cycles(),
            vec![group(&["a", "b"]), group(&["c", "d"])]
        );
    }

    #[test]
    fn test_target_only_nodes_are_singletons() {
        let graph = adjacency(&[("a", "z")]);
        let detector = CycleDetector::new(&graph);

        let all: IndexSet<String> = detector.find_sccs().into_iter().flatten().collect();
        assert_eq!(all, group(&["a", "z"]));
    }

    #[test]
    fn test_empty_graph() {
        let graph = AdjacencyGraph::new();
        let detector = CycleDetector::new(&graph);

        assert!(detector.find_sccs().is_empty());
        assert!(!detector.has_cycles());
    }
}
