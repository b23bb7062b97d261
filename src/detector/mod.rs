//! # Cycle Detection Module
//!
//! This module implements algorithms for detecting circular dependencies
//! in the component dependency graph.
//!
//! ## Algorithm
//!
//! [`CycleDetector`] uses Tarjan's Strongly Connected Components (SCC)
//! algorithm to group mutually reachable components in O(V + E) time.
//! [`ElementaryCycleFinder`] then enumerates the individual cycles inside
//! those groups with Johnson's algorithm; resolution works cycle by cycle.
//!
//! Both operate on a plain [`AdjacencyGraph`](crate::graph::AdjacencyGraph)
//! and number nodes in its insertion order, so results are deterministic.
//!
//! ## Example
//!
//! ```
//! use unwire::detector::{CycleDetector, ElementaryCycleFinder};
//! use unwire::graph::AdjacencyGraph;
//!
//! let mut graph = AdjacencyGraph::new();
//! graph.entry("app.A".into()).or_default().insert("app.B".into());
//! graph.entry("app.B".into()).or_default().insert("app.A".into());
//!
//! let detector = CycleDetector::new(&graph);
//! assert!(detector.has_cycles());
//! assert_eq!(detector.cycle_count(), 1);
//!
//! let cycles = ElementaryCycleFinder::new(&graph).find_all_cycles();
//! assert_eq!(cycles, vec![vec!["app.A".to_string(), "app.B".to_string()]]);
//! ```

mod analysis;
mod detector_impl;
mod elementary;
mod indexed;

pub use analysis::CycleAnalysis;
pub use detector_impl::CycleDetector;
pub use elementary::ElementaryCycleFinder;
