//! # Graph Construction and Rendering Module
//!
//! This module builds the component dependency graph out of a declaration
//! registry and renders it for humans. Each injection point (an annotated
//! field, a primary-constructor parameter, an annotated setter or a
//! factory-method parameter) becomes one [`DependencyEdge`]; the edges
//! collapse into an [`AdjacencyGraph`] for cycle detection.
//!
//! ## Example
//!
//! ```
//! use unwire::config::MarkerConfig;
//! use unwire::graph::{DependencyGraphBuilder, GraphRenderer};
//! use unwire::model::{Declaration, Field, TypeRef};
//! use unwire::registry::DeclarationRegistry;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry: DeclarationRegistry = [
//!     Declaration::class("app", "A")
//!         .with_annotation("Service")
//!         .with_member(Field::new("b", TypeRef::simple("B")).with_annotation("Autowired")),
//!     Declaration::class("app", "B").with_annotation("Service"),
//! ]
//! .into_iter()
//! .collect();
//!
//! let graph = DependencyGraphBuilder::new(&MarkerConfig::default()).build(&registry);
//! assert_eq!(graph.edge_count(), 1);
//!
//! // Render to DOT format
//! let renderer = GraphRenderer::new(true, false);
//! let mut output = Vec::new();
//! renderer.render_dot(&graph, &[], &mut output)?;
//!
//! let dot_output = String::from_utf8(output)?;
//! assert!(dot_output.contains(r#""app.A" -> "app.B""#));
//! # Ok(())
//! # }
//! ```
//!
//! ## Output Formats
//!
//! - **ASCII**: Tree view for terminals
//! - **DOT**: Graphviz format for detailed visualization
//! - **Mermaid**: Markdown-compatible diagrams for documentation

mod builder;
mod renderer;
mod types;

// Re-export main types and builders
pub use builder::DependencyGraphBuilder;
pub use renderer::GraphRenderer;
pub use types::{
    AdjacencyGraph, Cycle, CycleGroup, DeclarationRef, DependencyEdge, DependencyEdgeBuilder,
    DependencyGraph, Fqn, InjectionKind,
};
