use indexmap::IndexMap;
use tracing::debug;

use super::usage::calls_through;
use super::{ChangeSet, ResolutionStrategy, StrategyContext, StrategyKind, Subject};
use crate::graph::{DependencyEdge, Fqn, InjectionKind};
use crate::model::{Declaration, Member, MemberId, Method, TypeRef, qualify, type_parameter_name};
use crate::writer::DeclarationWriter;

/// Makes the caller depend on an interface extracted from the target instead
/// of on the target itself
///
/// The interface declares exactly the target methods the caller invokes
/// through the injected field.
pub struct InterfaceExtractionStrategy<'a> {
    ctx: StrategyContext<'a>,
    changes: ChangeSet,
    extracted: IndexMap<Fqn, Fqn>,
}

/// The caller members whose type becomes the interface
struct InjectionSite {
    field: MemberId,
    field_name: String,
    setter: Option<MemberId>,
}

impl<'a> InterfaceExtractionStrategy<'a> {
    pub fn new(ctx: StrategyContext<'a>, dry_run: bool) -> Self {
        Self {
            ctx,
            changes: ChangeSet::new(dry_run),
            extracted: IndexMap::new(),
        }
    }

    fn apply_edge(&mut self, edge: &DependencyEdge) -> bool {
        let site = edge.site();
        let target_fqn = edge.to_component();
        if site.owner == target_fqn {
            return false;
        }
        let registry = self.ctx.registry;
        let (Some(mut caller), Some(mut target)) = (
            self.changes.working_copy(&site.owner, registry),
            self.changes.working_copy(target_fqn, registry),
        ) else {
            return false;
        };
        if target.is_interface() {
            return false;
        }
        let Some(injection) = injection_site(&caller, edge) else {
            return false;
        };

        let mut used: IndexMap<String, Method> = IndexMap::new();
        for (name, arity) in calls_through(&caller, &injection.field_name) {
            for (_, method) in target.methods_with_arity(&name, arity) {
                used.entry(method.signature())
                    .or_insert_with(|| abstract_signature(method));
            }
        }
        if used.is_empty() {
            debug!(site = %site, target = target_fqn, "no target methods used through injection point");
            return false;
        }

        let mut interface = match self
            .extracted
            .get(target_fqn)
            .and_then(|fqn| self.changes.working_copy(fqn, registry))
        {
            Some(existing) => existing,
            None => self.new_interface(&target),
        };
        for (signature, method) in used {
            if !interface.methods().any(|(_, m)| m.signature() == signature) {
                interface.push_member(method.into());
            }
        }
        let interface_fqn = interface.fqn();
        let interface_name = interface.name.clone();

        let retype = |ty: &TypeRef| {
            if ty.is_qualified() {
                ty.renamed(&interface_fqn)
            } else {
                ty.renamed(&interface_name)
            }
        };
        if let Some(Member::Field(field)) = caller.member_mut(injection.field) {
            field.ty = retype(&field.ty);
        }
        if let Some(Member::Method(setter)) = injection.setter.and_then(|id| caller.member_mut(id))
            && let Some(parameter) = setter.parameters.first_mut()
        {
            parameter.ty = retype(&parameter.ty);
        }
        caller.add_import(&interface_fqn);

        let already_implemented = target
            .implements
            .iter()
            .any(|ty| ty.raw_name() == interface_name || ty.raw_name() == interface_fqn);
        if !already_implemented {
            let arguments = target
                .type_parameters
                .iter()
                .map(|p| TypeRef::simple(type_parameter_name(p)))
                .collect();
            target
                .implements
                .push(TypeRef::generic(interface_name.as_str(), arguments));
        }

        debug!(
            caller = %site.owner,
            target = target_fqn,
            interface = interface_fqn.as_str(),
            "extracted interface"
        );
        self.extracted
            .insert(target_fqn.to_string(), interface_fqn.clone());
        self.changes.track_modified(caller);
        self.changes.track_modified(target);
        self.changes.track_generated(interface);
        true
    }

    /// `I<Target>` in the target's package, numbered if the name is taken
    fn new_interface(&self, target: &Declaration) -> Declaration {
        let base = format!("I{}", target.simple_name());
        let mut name = base.clone();
        let mut suffix = 2;
        while self
            .changes
            .is_taken(&qualify(&target.package, &name), self.ctx.registry)
        {
            name = format!("{base}{suffix}");
            suffix += 1;
        }

        let mut interface = Declaration::interface(&target.package, name);
        interface.imports = target.imports.clone();
        interface.type_parameters = target.type_parameters.clone();
        interface
    }
}

/// The field behind a field or setter edge, plus the setter itself
fn injection_site(caller: &Declaration, edge: &DependencyEdge) -> Option<InjectionSite> {
    let site = edge.site();
    let (field_name, setter) = match (edge.injection_kind(), caller.member(site.member)?) {
        (InjectionKind::Field, Member::Field(field)) => (field.name.clone(), None),
        (InjectionKind::Setter, Member::Method(method)) => {
            let parameter = &method.parameters.first()?.name;
            let field = method
                .body
                .iter()
                .flatten()
                .find_map(|stmt| stmt.assigned_field_from(parameter))?;
            (field.to_string(), Some(site.member))
        }
        _ => return None,
    };
    let (field, _) = caller.field_named(&field_name)?;
    Some(InjectionSite {
        field,
        field_name,
        setter,
    })
}

/// A body-less, unannotated copy of `method` for an interface
fn abstract_signature(method: &Method) -> Method {
    let mut signature = method.clone();
    signature.modifiers.clear();
    signature.annotations.clear();
    signature.body = None;
    signature
}

impl ResolutionStrategy for InterfaceExtractionStrategy<'_> {
    fn kind(&self) -> StrategyKind {
        StrategyKind::InterfaceExtraction
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
