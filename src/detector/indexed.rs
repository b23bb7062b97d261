use indexmap::IndexSet;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::graph::AdjacencyGraph;

/// A string adjacency map numbered in stable node order
///
/// Node `i` of `graph` is `nodes[i]`. Keys come first in insertion order,
/// followed by nodes that only ever appear as targets.
pub(super) struct IndexedGraph<'g> {
    nodes: IndexSet<&'g str>,
    successors: Vec<Vec<usize>>,
    graph: DiGraph<(), ()>,
}

impl<'g> IndexedGraph<'g> {
    pub(super) fn new(adjacency: &'g AdjacencyGraph) -> Self {
        let mut nodes: IndexSet<&'g str> = adjacency.keys().map(String::as_str).collect();
        for targets in adjacency.values() {
            nodes.extend(targets.iter().map(String::as_str));
        }

        let mut graph = DiGraph::with_capacity(nodes.len(), 0);
        for _ in 0..nodes.len() {
            graph.add_node(());
        }

        let mut successors = vec![Vec::new(); nodes.len()];
        for (from, targets) in adjacency {
            let Some(from) = nodes.get_index_of(from.as_str()) else {
                continue;
            };
            for to in targets.iter().filter_map(|t| nodes.get_index_of(t.as_str())) {
                successors[from].push(to);
                graph.add_edge(NodeIndex::new(from), NodeIndex::new(to), ());
            }
        }

        Self {
            nodes,
            successors,
            graph,
        }
    }

    pub(super) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(super) fn name(&self, index: usize) -> &'g str {
        self.nodes[index]
    }

    /// Successors of `index` in adjacency order
    pub(super) fn successors(&self, index: usize) -> &[usize] {
        &self.successors[index]
    }

    pub(super) fn graph(&self) -> &DiGraph<(), ()> {
        &self.graph
    }

    /// Every SCC, members ascending, components ordered by their least member
    pub(super) fn sccs(&self) -> Vec<Vec<usize>> {
        sorted_components(tarjan_scc(&self.graph), |node| node.index())
    }
}

/// Normalize the component order petgraph produces (reverse topological,
/// members in discovery order) into ascending node order
pub(super) fn sorted_components<N>(
    components: Vec<Vec<N>>,
    index_of: impl Fn(&N) -> usize,
) -> Vec<Vec<usize>> {
    let mut components: Vec<Vec<usize>> = components
        .iter()
        .map(|component| {
            let mut members: Vec<usize> = component.iter().map(&index_of).collect();
            members.sort_unstable();
            members
        })
        .collect();
    components.sort_unstable_by_key(|members| members.first().copied());
    components
}
