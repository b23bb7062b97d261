use tracing::debug;

use super::{ChangeSet, ResolutionStrategy, StrategyContext, StrategyKind, Subject};
use crate::graph::{DependencyEdge, InjectionKind};
use crate::model::{Declaration, Member, Method, Modifier, Parameter, Stmt};
use crate::utils::string::capitalize;
use crate::writer::DeclarationWriter;

/// Moves a constructor-injected dependency into a lazily injected setter
///
/// The parameter and its `this.f = p` assignment leave the constructor, the
/// backing field loses `final`, and `setF` either gains the injection markers
/// or is created.
pub struct SetterInjectionStrategy<'a> {
    ctx: StrategyContext<'a>,
    changes: ChangeSet,
}

/// The parts of a constructor a conversion touches
struct Conversion {
    parameter_index: usize,
    parameter: Parameter,
    assignment: Option<usize>,
    field: String,
}

impl<'a> SetterInjectionStrategy<'a> {
    pub fn new(ctx: StrategyContext<'a>, dry_run: bool) -> Self {
        Self {
            ctx,
            changes: ChangeSet::new(dry_run),
        }
    }

    fn apply_edge(&mut self, edge: &DependencyEdge) -> bool {
        if edge.injection_kind() != InjectionKind::Constructor {
            return false;
        }
        let site = edge.site();
        let Some(mut declaration) = self.changes.working_copy(&site.owner, self.ctx.registry) else {
            return false;
        };
        let Some(Member::Constructor(constructor)) = declaration.member(site.member) else {
            return false;
        };

        // Earlier conversions on the same constructor shift parameter indexes
        let parameter_index = match site.parameter {
            Some(index)
                if constructor
                    .parameters
                    .get(index)
                    .is_some_and(|p| p.name == edge.member_name()) =>
            {
                index
            }
            _ => match constructor
                .parameters
                .iter()
                .position(|p| p.name == edge.member_name())
            {
                Some(index) => index,
                None => return false,
            },
        };
        let parameter = constructor.parameters[parameter_index].clone();

        let assignment = constructor
            .body
            .iter()
            .position(|stmt| stmt.assigned_field_from(&parameter.name).is_some());
        let field = assignment
            .and_then(|index| constructor.body[index].assigned_field_from(&parameter.name))
            .unwrap_or(parameter.name.as_str())
            .to_string();

        if declaration.field_named(&field).is_none() {
            debug!(site = %site, field = field.as_str(), "no backing field for constructor parameter");
            return false;
        }

        self.convert(
            &mut declaration,
            edge,
            Conversion {
                parameter_index,
                parameter,
                assignment,
                field,
            },
        );
        self.changes.track_modified(declaration);
        true
    }

    fn convert(&self, declaration: &mut Declaration, edge: &DependencyEdge, conversion: Conversion) {
        let markers = self.ctx.markers;
        let site = edge.site();

        let field_id = declaration.field_named(&conversion.field).map(|(id, _)| id);
        if let Some(Member::Field(field)) = field_id.and_then(|id| declaration.member_mut(id)) {
            field.modifiers.retain(|m| *m != Modifier::Final);
        }

        if let Some(Member::Constructor(constructor)) = declaration.member_mut(site.member) {
            constructor.parameters.remove(conversion.parameter_index);
            if let Some(index) = conversion.assignment {
                constructor.body.remove(index);
            }
        }

        let setter_name = format!("set{}", capitalize(&conversion.field));
        let existing = declaration
            .method_with_arity(&setter_name, 1)
            .map(|(id, _)| id);
        match existing {
            Some(setter_id) => {
                if let Some(Member::Method(setter)) = declaration.member_mut(setter_id) {
                    if !markers.is_injection(&setter.annotations) {
                        setter.annotations.push(markers.injection_annotation());
                    }
                    if !markers.is_lazy(&setter.annotations) {
                        setter.annotations.push(markers.lazy_annotation());
                    }
                }
                debug!(site = %site, setter = setter_name.as_str(), "reusing existing setter");
            }
            None => {
                let mut setter = Method::new(&setter_name)
                    .with_parameter(conversion.parameter.clone())
                    .with_body(vec![Stmt::assign_field(
                        &conversion.field,
                        &conversion.parameter.name,
                    )]);
                setter.annotations.push(markers.injection_annotation());
                setter.annotations.push(markers.lazy_annotation());
                declaration.push_member(setter.into());
                debug!(site = %site, setter = setter_name.as_str(), "added injection setter");
            }
        }

        declaration.add_import(&markers.injection_import);
        declaration.add_import(&markers.lazy_import);
    }
}

impl ResolutionStrategy for SetterInjectionStrategy<'_> {
    fn kind(&self) -> StrategyKind {
        StrategyKind::SetterInjection
    }

    fn apply(&mut self, subject: Subject<'_>) -> bool {
        let ok = match subject {
            Subject::Edge(edge) => self.apply_edge(edge),
            Subject::Cycle(_) => false,
        };
        self.changes.record(ok)
    }

    fn changes(&self) -> &ChangeSet {
        &self.changes
    }

    fn into_changes(self: Box<Self>) -> ChangeSet {
        self.changes
    }

    fn writer(&self) -> &dyn DeclarationWriter {
        self.ctx.writer
    }
}
