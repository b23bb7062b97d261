//! Core graph types
//!
//! This module contains the fundamental data structures used in the dependency
//! graph.

use std::fmt;

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use crate::error::UnwireError;
use crate::model::MemberId;

/// Fully-qualified component name
pub type Fqn = String;

/// Component → directly injected components, in discovery order
pub type AdjacencyGraph = IndexMap<Fqn, IndexSet<Fqn>>;

/// An elementary cycle `[c0, .., cn-1]` with an edge `ci → c(i+1 mod n)`
pub type Cycle = Vec<Fqn>;

/// The members of one strongly connected component
pub type CycleGroup = IndexSet<Fqn>;

/// How a dependency is injected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InjectionKind {
    Field,
    Setter,
    Constructor,
    FactoryMethod,
}

impl fmt::Display for InjectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InjectionKind::Field => "field",
            InjectionKind::Setter => "setter",
            InjectionKind::Constructor => "constructor",
            InjectionKind::FactoryMethod => "factory method",
        };
        write!(f, "{label}")
    }
}

/// A location inside a declaration: a member, and optionally one of its
/// parameters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DeclarationRef {
    pub owner: Fqn,
    pub member: MemberId,
    pub parameter: Option<usize>,
}

impl DeclarationRef {
    pub fn new(owner: impl Into<Fqn>, member: MemberId, parameter: Option<usize>) -> Self {
        Self {
            owner: owner.into(),
            member,
            parameter,
        }
    }
}

impl fmt::Display for DeclarationRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.owner, self.member)?;
        if let Some(parameter) = self.parameter {
            write!(f, "[{parameter}]")?;
        }
        Ok(())
    }
}

/// One injection relationship between two components
///
/// For factory-method edges `from_component` is the produced component and
/// `site.owner` the configuration component declaring the method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyEdge {
    pub(super) from_component: Fqn,
    pub(super) to_component: Fqn,
    pub(super) injection_kind: InjectionKind,
    pub(super) site: DeclarationRef,
    pub(super) member_name: String,
}

impl DependencyEdge {
    pub fn builder() -> DependencyEdgeBuilder {
        DependencyEdgeBuilder::new()
    }

    pub fn from_component(&self) -> &str {
        &self.from_component
    }

    pub fn to_component(&self) -> &str {
        &self.to_component
    }

    pub fn injection_kind(&self) -> InjectionKind {
        self.injection_kind
    }

    pub fn site(&self) -> &DeclarationRef {
        &self.site
    }

    /// Field name, setter name, or parameter name, depending on the kind
    pub fn member_name(&self) -> &str {
        &self.member_name
    }
}

pub struct DependencyEdgeBuilder {
    from_component: Option<Fqn>,
    to_component: Option<Fqn>,
    injection_kind: Option<InjectionKind>,
    site: Option<DeclarationRef>,
    member_name: Option<String>,
}

impl Default for DependencyEdgeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DependencyEdgeBuilder {
    pub fn new() -> Self {
        Self {
            from_component: None,
            to_component: None,
            injection_kind: None,
            site: None,
            member_name: None,
        }
    }

    pub fn with_from_component(mut self, from_component: &str) -> Self {
        self.from_component = Some(from_component.to_string());
        self
    }

    pub fn with_to_component(mut self, to_component: &str) -> Self {
        self.to_component = Some(to_component.to_string());
        self
    }

    pub fn with_injection_kind(mut self, injection_kind: InjectionKind) -> Self {
        self.injection_kind = Some(injection_kind);
        self
    }

    pub fn with_site(mut self, site: DeclarationRef) -> Self {
        self.site = Some(site);
        self
    }

    pub fn with_member_name(mut self, member_name: &str) -> Self {
        self.member_name = Some(member_name.to_string());
        self
    }
}

impl crate::common::ConfigBuilder for DependencyEdgeBuilder {
    type Config = DependencyEdge;

    fn build(self) -> Result<Self::Config, UnwireError> {
        Ok(DependencyEdge {
            from_component: self.from_component.ok_or_else(|| missing("from_component"))?,
            to_component: self.to_component.ok_or_else(|| missing("to_component"))?,
            injection_kind: self.injection_kind.ok_or_else(|| missing("injection_kind"))?,
            site: self.site.ok_or_else(|| missing("site"))?,
            member_name: self.member_name.ok_or_else(|| missing("member_name"))?,
        })
    }
}

fn missing(field: &str) -> UnwireError {
    UnwireError::ConfigurationError {
        message: format!("Missing required field: {field}"),
    }
}

/// The injection edges of a codebase and the adjacency map derived from them
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    edges: Vec<DependencyEdge>,
    adjacency: AdjacencyGraph,
}

impl DependencyGraph {
    /// Collapse edges into an adjacency map. Nodes that are only ever targets
    /// still get an (empty) entry, after all sources.
    pub fn from_edges(edges: Vec<DependencyEdge>) -> Self {
        let mut adjacency = AdjacencyGraph::new();
        for edge in &edges {
            adjacency
                .entry(edge.from_component.clone())
                .or_default()
                .insert(edge.to_component.clone());
        }
        for edge in &edges {
            adjacency.entry(edge.to_component.clone()).or_default();
        }
        Self { edges, adjacency }
    }

    pub fn edges(&self) -> &[DependencyEdge] {
        &self.edges
    }

    pub fn adjacency(&self) -> &AdjacencyGraph {
        &self.adjacency
    }

    /// Every concrete edge from `from` to `to`, in discovery order
    pub fn edges_between<'a>(
        &'a self,
        from: &'a str,
        to: &'a str,
    ) -> impl Iterator<Item = &'a DependencyEdge> + 'a {
        self.edges
            .iter()
            .filter(move |edge| edge.from_component == from && edge.to_component == to)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
