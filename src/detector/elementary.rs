use std::mem;

use indexmap::IndexSet;
use petgraph::algo::tarjan_scc;
use tracing::{debug, warn};

use super::indexed::{IndexedGraph, sorted_components};
use crate::graph::{AdjacencyGraph, Cycle, CycleGroup};

/// Enumerates every elementary cycle of a graph (Johnson's algorithm)
///
/// Each cycle starts at its least node in adjacency order, so no two results
/// are rotations of each other.
pub struct ElementaryCycleFinder<'g> {
    graph: IndexedGraph<'g>,
    max_scc_size: Option<usize>,
    skipped: Vec<CycleGroup>,
}

/// Blocked-set state for the searches rooted at one start node
struct Search<'a, 'g> {
    graph: &'a IndexedGraph<'g>,
    start: usize,
    in_component: Vec<bool>,
    blocked: Vec<bool>,
    blocked_by: Vec<IndexSet<usize>>,
    stack: Vec<usize>,
    cycles: Vec<Vec<usize>>,
}

impl Search<'_, '_> {
    fn circuit(&mut self, v: usize) -> bool {
        let graph = self.graph;
        let mut found = false;
        self.stack.push(v);
        self.blocked[v] = true;

        for &w in graph.successors(v) {
            if w == v || !self.in_component[w] {
                continue;
            }
            if w == self.start {
                self.cycles.push(self.stack.clone());
                found = true;
            } else if !self.blocked[w] && self.circuit(w) {
                found = true;
            }
        }

        if found {
            self.unblock(v);
        } else {
            for &w in graph.successors(v) {
                if w != v && self.in_component[w] {
                    self.blocked_by[w].insert(v);
                }
            }
        }

        self.stack.pop();
        found
    }

    fn unblock(&mut self, u: usize) {
        self.blocked[u] = false;
        for w in mem::take(&mut self.blocked_by[u]) {
            if self.blocked[w] {
                self.unblock(w);
            }
        }
    }
}

impl<'g> ElementaryCycleFinder<'g> {
    pub fn new(adjacency: &'g AdjacencyGraph) -> Self {
        Self {
            graph: IndexedGraph::new(adjacency),
            max_scc_size: None,
            skipped: Vec::new(),
        }
    }

    /// Skip strongly connected components with more than `limit` members
    pub fn with_max_scc_size(mut self, limit: usize) -> Self {
        self.max_scc_size = Some(limit);
        self
    }

    /// Components left out of the last [`find_all_cycles`](Self::find_all_cycles)
    /// call because they exceeded the size limit
    pub fn skipped_sccs(&self) -> &[CycleGroup] {
        &self.skipped
    }

    pub fn find_all_cycles(&mut self) -> Vec<Cycle> {
        let n = self.graph.len();
        let excluded = self.exclude_oversized();

        let mut found = Vec::new();
        for start in 0..n {
            if excluded[start] {
                continue;
            }
            let Some(component) = self.least_component(start, &excluded) else {
                continue;
            };

            let mut in_component = vec![false; n];
            for &member in &component {
                in_component[member] = true;
            }

            let mut search = Search {
                graph: &self.graph,
                start,
                in_component,
                blocked: vec![false; n],
                blocked_by: vec![IndexSet::new(); n],
                stack: Vec::new(),
                cycles: Vec::new(),
            };
            search.circuit(start);
            found.extend(search.cycles);
        }

        debug!(cycles = found.len(), "elementary cycles enumerated");
        found
            .into_iter()
            .map(|cycle| {
                cycle
                    .into_iter()
                    .map(|index| self.graph.name(index).to_string())
                    .collect()
            })
            .collect()
    }

    /// Mark every node of an oversized component and remember the component
    fn exclude_oversized(&mut self) -> Vec<bool> {
        self.skipped.clear();
        let mut excluded = vec![false; self.graph.len()];
        let Some(limit) = self.max_scc_size else {
            return excluded;
        };

        for members in self.graph.sccs() {
            if members.len() <= limit {
                continue;
            }
            let group: CycleGroup = members
                .iter()
                .map(|&index| self.graph.name(index).to_string())
                .collect();
            warn!(
                size = members.len(),
                limit,
                first = %self.graph.name(members[0]),
                "strongly connected component too large, skipping cycle enumeration"
            );
            for index in members {
                excluded[index] = true;
            }
            self.skipped.push(group);
        }
        excluded
    }

    /// The SCC containing `start` within the subgraph induced by nodes
    /// `>= start`. `None` when that component cannot hold a cycle.
    fn least_component(&self, start: usize, excluded: &[bool]) -> Option<Vec<usize>> {
        let full = self.graph.graph();
        let induced = full.filter_map(
            |node, _| {
                let index = node.index();
                (index >= start && !excluded[index]).then_some(index)
            },
            |edge, _| {
                let (from, to) = full.edge_endpoints(edge)?;
                (from != to).then_some(())
            },
        );

        let components = sorted_components(tarjan_scc(&induced), |node| induced[*node]);
        components
            .into_iter()
            .find(|members| members.first() == Some(&start))
            .filter(|members| members.len() > 1)
    }
}

#[cfg(test)]
mod tests {
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

    fn cycle(names: &[&str]) -> Cycle {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn test_two_node_cycle_reported_once() {
        let graph = adjacency(&[("a", "b"), ("b", "a")]);
        let cycles = ElementaryCycleFinder::new(&graph).find_all_cycles();

        assert_eq!(cycles, vec![cycle(&["a", "b"])]);
    }

    #[test]
    fn test_three_node_ring() {
        let graph = adjacency(&[("a", "b"), ("b", "c"), ("c", "a")]);
        let cycles = ElementaryCycleFinder::new(&graph).find_all_cycles();

        assert_eq!(cycles, vec![cycle(&["a", "b", "c"])]);
        let ring = &cycles[0];
        for i in 0..ring.len() {
            let next = &ring[(i + 1) % ring.len()];
            assert!(graph[&ring[i]].contains(next));
        }
    }

    #[test]
    fn test_fully_connected_triangle_has_five_cycles() {
        let graph = adjacency(&[
            ("a", "b"),
            ("a", "c"),
            ("b", "a"),
            ("b", "c"),
            ("c", "a"),
            ("c", "b"),
        ]);
        let mut cycles = ElementaryCycleFinder::new(&graph).find_all_cycles();
        cycles.sort();

        assert_eq!(
            cycles,
            vec![
                cycle(&["a", "b"]),
                cycle(&["a", "b", "c"]),
                cycle(&["a", "c"]),
                cycle(&["a", "c", "b"]),
                cycle(&["b", "c"]),
            ]
        );
    }

    #[test]
    fn test_self_loops_and_empty_graphs() {
        let looped = adjacency(&[("a", "a")]);
        assert!(ElementaryCycleFinder::new(&looped).find_all_cycles().is_empty());

        let empty = AdjacencyGraph::new();
        assert!(ElementaryCycleFinder::new(&empty).find_all_cycles().is_empty());
    }

    #[test]
    fn test_self_loop_inside_cycle_ignored() {
        let graph = adjacency(&[("a", "a"), ("a", "b"), ("b", "a")]);
        let cycles = ElementaryCycleFinder::new(&graph).find_all_cycles();

        assert_eq!(cycles, vec![cycle(&["a", "b"])]);
    }

    #[test]
    fn test_oversized_component_skipped() {
        let graph = adjacency(&[
            ("a", "b"),
            ("b", "c"),
            ("c", "a"),
            ("x", "y"),
            ("y", "x"),
        ]);
        let mut finder = ElementaryCycleFinder::new(&graph).with_max_scc_size(2);
        let cycles = finder.find_all_cycles();

        assert_eq!(cycles, vec![cycle(&["x", "y"])]);
        assert_eq!(finder.skipped_sccs().len(), 1);
        assert_eq!(finder.skipped_sccs()[0].len(), 3);
    }
}
