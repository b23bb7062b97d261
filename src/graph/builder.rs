use tracing::{debug, trace};

use super::types::{DeclarationRef, DependencyEdge, DependencyGraph, InjectionKind};
use crate::config::MarkerConfig;
use crate::injection_filter::InjectionFilter;
use crate::model::{Constructor, Declaration, MemberId, Parameter, TypeRef};
use crate::registry::DeclarationRegistry;

/// Builder for constructing dependency graphs
///
/// Scans every component in a registry for injection points (annotated
/// fields, the primary constructor, annotated setters and factory methods)
/// and resolves each injected type against the registry.
pub struct DependencyGraphBuilder {
    markers: MarkerConfig,
    filter: InjectionFilter,
}

/// Where the edges of one declaration are being collected
struct ScanContext<'a> {
    registry: &'a DeclarationRegistry,
    declaration: &'a Declaration,
    owner: String,
    edges: &'a mut Vec<DependencyEdge>,
}

impl ScanContext<'_> {
    /// Record an edge from `from` to whatever `ty` resolves to. Types that do
    /// not resolve to a registry declaration produce no edge.
    fn push(
        &mut self,
        from: &str,
        ty: &TypeRef,
        kind: InjectionKind,
        member: MemberId,
        parameter: Option<usize>,
        member_name: &str,
    ) {
        let Some(to) = self.registry.resolve_type(ty, self.declaration) else {
            debug!(
                owner = %self.owner,
                member = member_name,
                ty = %ty,
                "dropping injection point with unresolvable type"
            );
            return;
        };

        trace!(from, to = %to, kind = %kind, "injection edge");
        self.edges.push(DependencyEdge {
            from_component: from.to_string(),
            to_component: to,
            injection_kind: kind,
            site: DeclarationRef::new(self.owner.clone(), member, parameter),
            member_name: member_name.to_string(),
        });
    }
}

impl DependencyGraphBuilder {
    /// Create a builder recognizing the given markers and every injection kind
    pub fn new(markers: &MarkerConfig) -> Self {
        Self {
            markers: markers.clone(),
            filter: InjectionFilter::default(),
        }
    }

    pub fn with_filter(mut self, filter: InjectionFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Build the edge set and adjacency map of `registry`
    pub fn build(&self, registry: &DeclarationRegistry) -> DependencyGraph {
        let mut edges = Vec::new();

        for (fqn, declaration) in registry.iter() {
            if !self.markers.is_component(declaration) {
                continue;
            }

            let mut scan = ScanContext {
                registry,
                declaration,
                owner: fqn.to_string(),
                edges: &mut edges,
            };

            if self.filter.includes(InjectionKind::Field) {
                self.scan_fields(&mut scan);
            }
            if self.filter.includes(InjectionKind::Constructor) {
                self.scan_constructor(&mut scan);
            }
            if self.filter.includes(InjectionKind::Setter) {
                self.scan_setters(&mut scan);
            }
            if self.filter.includes(InjectionKind::FactoryMethod) {
                self.scan_factories(&mut scan);
            }
        }

        debug!(edges = edges.len(), "dependency graph built");
        DependencyGraph::from_edges(edges)
    }

    fn scan_fields(&self, scan: &mut ScanContext<'_>) {
        let owner = scan.owner.clone();
        let declaration = scan.declaration;
        for (id, field) in declaration.fields() {
            if self.markers.is_injection(&field.annotations) {
                scan.push(&owner, &field.ty, InjectionKind::Field, id, None, &field.name);
            }
        }
    }

    fn scan_constructor(&self, scan: &mut ScanContext<'_>) {
        let owner = scan.owner.clone();
        let Some((id, constructor)) = self.primary_constructor(scan.declaration) else {
            return;
        };
        for (index, parameter) in self.injected_parameters(&constructor.parameters) {
            scan.push(
                &owner,
                &parameter.ty,
                InjectionKind::Constructor,
                id,
                Some(index),
                &parameter.name,
            );
        }
    }

    fn scan_setters(&self, scan: &mut ScanContext<'_>) {
        let owner = scan.owner.clone();
        let declaration = scan.declaration;
        for (id, method) in declaration.methods() {
            if method.is_setter() && self.markers.is_injection(&method.annotations) {
                scan.push(
                    &owner,
                    &method.parameters[0].ty,
                    InjectionKind::Setter,
                    id,
                    Some(0),
                    &method.name,
                );
            }
        }
    }

    fn scan_factories(&self, scan: &mut ScanContext<'_>) {
        let declaration = scan.declaration;
        for (id, method) in declaration.methods() {
            if !self.markers.is_factory(&method.annotations) {
                continue;
            }
            let Some(produced) = method
                .return_type
                .as_ref()
                .and_then(|ty| scan.registry.resolve_type(ty, declaration))
            else {
                debug!(owner = %scan.owner, method = %method.name, "factory produces no known component");
                continue;
            };

            for (index, parameter) in self.injected_parameters(&method.parameters) {
                scan.push(
                    &produced,
                    &parameter.ty,
                    InjectionKind::FactoryMethod,
                    id,
                    Some(index),
                    &parameter.name,
                );
            }
        }
    }

    /// The constructor carrying an injection marker, else the only
    /// constructor
    fn primary_constructor<'d>(
        &self,
        declaration: &'d Declaration,
    ) -> Option<(MemberId, &'d Constructor)> {
        let mut constructors = declaration.constructors().peekable();
        let first = *constructors.peek()?;
        let mut count = 0;
        for (id, constructor) in constructors {
            if self.markers.is_injection(&constructor.annotations) {
                return Some((id, constructor));
            }
            count += 1;
        }
        (count == 1).then_some(first)
    }

    fn injected_parameters<'p>(
        &self,
        parameters: &'p [Parameter],
    ) -> impl Iterator<Item = (usize, &'p Parameter)> {
        let markers = &self.markers;
        parameters
            .iter()
            .enumerate()
            .filter(move |(_, parameter)| !markers.is_excluded_parameter(&parameter.annotations))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{Annotation, Field, Method, Stmt};

    fn component(package: &str, name: &str) -> Declaration {
        Declaration::class(package, name).with_annotation("Service")
    }

    fn kinds(graph: &DependencyGraph) -> Vec<(String, String, InjectionKind)> {
        graph
            .edges()
            .iter()
            .map(|e| {
                (
                    e.from_component().to_string(),
                    e.to_component().to_string(),
                    e.injection_kind(),
                )
            })
            .collect()
    }

    #[test]
    fn test_collects_every_injection_kind() {
        let a = component("app", "A")
            .with_member(Field::new("b", TypeRef::simple("B")).with_annotation("Autowired"))
            .with_member(Field::new("plain", TypeRef::simple("C")));
        let b = component("app", "B").with_member(
            Constructor::new()
                .with_parameter(Parameter::new("c", TypeRef::simple("C")))
                .with_parameter(
                    Parameter::new("port", TypeRef::simple("C"))
                        .with_annotation(Annotation::new("Value").with_arguments("\"${port}\"")),
                )
                .with_body(vec![Stmt::assign_field("c", "c")]),
        );
        let c = component("app", "C").with_member(
            Method::new("setA")
                .with_parameter(Parameter::new("a", TypeRef::simple("A")))
                .with_annotation("Inject"),
        );
        let config = Declaration::class("app", "Wiring")
            .with_annotation("Configuration")
            .with_member(
                Method::new("d")
                    .with_annotation("Bean")
                    .with_return_type(TypeRef::simple("D"))
                    .with_parameter(Parameter::new("a", TypeRef::simple("A"))),
            );
        let d = Declaration::class("app", "D");

        let registry: DeclarationRegistry = [a, b, c, config, d].into_iter().collect();
        let graph = DependencyGraphBuilder::new(&MarkerConfig::default()).build(&registry);

        assert_eq!(
            kinds(&graph),
            vec![
                ("app.A".into(), "app.B".into(), InjectionKind::Field),
                ("app.B".into(), "app.C".into(), InjectionKind::Constructor),
                ("app.C".into(), "app.A".into(), InjectionKind::Setter),
                ("app.D".into(), "app.A".into(), InjectionKind::FactoryMethod),
            ]
        );

        let factory = &graph.edges()[3];
        assert_eq!(factory.site().owner, "app.Wiring");
        assert_eq!(factory.site().parameter, Some(0));
        assert_eq!(factory.member_name(), "a");
        assert_eq!(graph.edges()[2].member_name(), "setA");
    }

    #[test]
    fn test_drops_unresolvable_types() {
        let a = component("app", "A")
            .with_member(Field::new("missing", TypeRef::simple("Missing")).with_annotation("Autowired"))
            .with_member(
                Field::new("list", "java.util.List<B>".parse().unwrap()).with_annotation("Autowired"),
            );
        let b = component("app", "B");

        let registry: DeclarationRegistry = [a, b].into_iter().collect();
        let graph = DependencyGraphBuilder::new(&MarkerConfig::default()).build(&registry);

        assert!(graph.is_empty());
        assert!(graph.adjacency().is_empty());
    }

    #[test]
    fn test_primary_constructor_selection() {
        let ambiguous = component("app", "A")
            .with_member(Constructor::new().with_parameter(Parameter::new("b", TypeRef::simple("B"))))
            .with_member(Constructor::new());
        let marked = component("app", "C")
            .with_member(Constructor::new())
            .with_member(
                Constructor::new()
                    .with_annotation("Autowired")
                    .with_parameter(Parameter::new("b", TypeRef::simple("B"))),
            );
        let b = component("app", "B");

        let registry: DeclarationRegistry = [ambiguous, marked, b].into_iter().collect();
        let graph = DependencyGraphBuilder::new(&MarkerConfig::default()).build(&registry);

        assert_eq!(
            kinds(&graph),
            vec![("app.C".into(), "app.B".into(), InjectionKind::Constructor)]
        );
        assert_eq!(graph.edges()[0].site().member, MemberId(1));
    }

    #[test]
    fn test_filter_excludes_kinds() {
        let a = component("app", "A")
            .with_member(Field::new("b", TypeRef::simple("B")).with_annotation("Autowired"));
        let b = component("app", "B")
            .with_member(Constructor::new().with_parameter(Parameter::new("a", TypeRef::simple("A"))));

        let registry: DeclarationRegistry = [a, b].into_iter().collect();
        let graph = DependencyGraphBuilder::new(&MarkerConfig::default())
            .with_filter(InjectionFilter::new(true, false, false, false))
            .build(&registry);

        assert_eq!(
            kinds(&graph),
            vec![("app.B".into(), "app.A".into(), InjectionKind::Constructor)]
        );
    }
}
