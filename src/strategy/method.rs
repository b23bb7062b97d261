use std::collections::BTreeSet;
use std::sync::Arc;

use indexmap::IndexSet;
use tracing::debug;

use super::usage::{calls_through, local_references};
use super::{ChangeSet, ResolutionStrategy, StrategyContext, StrategyKind, Subject};
use crate::graph::Fqn;
use crate::model::{Declaration, TypeRef, qualify};
use crate::writer::DeclarationWriter;

/// Pulls the methods a cycle calls across its links into one synthesized
/// mediator declaration
///
/// Only the mediator is created; redirecting the original call sites to it
/// is left to a follow-on rewrite.
pub struct MethodExtractionStrategy<'a> {
    ctx: StrategyContext<'a>,
    changes: ChangeSet,
}

impl<'a> MethodExtractionStrategy<'a> {
    pub fn new(ctx: StrategyContext<'a>, dry_run: bool) -> Self {
        Self {
            ctx,
            changes: ChangeSet::new(dry_run),
        }
    }

    fn apply_cycle(&mut self, cycle: &[Fqn]) -> bool {
        let distinct: IndexSet<&str> = cycle.iter().map(String::as_str).collect();
        if distinct.len() < 2 || distinct.len() != cycle.len() {
            return false;
        }
        let registry = self.ctx.registry;
        let Some(components) = cycle
            .iter()
            .map(|fqn| self.changes.working_copy(fqn, registry))
            .collect::<Option<Vec<Declaration>>>()
        else {
            return false;
        };

        // Member indexes per component; ordered sets keep source order
        let n = components.len();
        let mut selected: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); n];
        for (i, caller) in components.iter().enumerate() {
            let next = (i + 1) % n;
            let callee = &components[next];
            for field in self.fields_injecting(caller, &cycle[next]) {
                for (name, arity) in calls_through(caller, &field) {
                    selected[next].extend(
                        callee
                            .methods_with_arity(&name, arity)
                            .map(|(id, _)| id.0),
                    );
                }
            }
        }
        if selected.iter().all(BTreeSet::is_empty) {
            debug!(cycle = %cycle.join(" → "), "no calls cross the cycle");
            return false;
        }

        for (component, members) in components.iter().zip(selected.iter_mut()) {
            close_over(component, members);
        }

        let mut mediator = self.new_mediator(&components);
        for (component, members) in components.iter().zip(&selected) {
            mediator
                .members
                .extend(members.iter().map(|&index| Arc::clone(&component.members[index])));
            for import in &component.imports {
                if !mediator.imports.contains(import) {
                    mediator.imports.push(import.clone());
                }
            }
        }

        debug!(
            mediator = %mediator.fqn(),
            members = mediator.members.len(),
            "extracted cycle methods"
        );
        for component in components {
            self.changes.track_modified(component);
        }
        self.changes.track_generated(mediator);
        true
    }

    /// Fields of `caller` holding a `target`: fields typed as the target, and
    /// fields assigned from constructor or setter parameters of that type
    fn fields_injecting(&self, caller: &Declaration, target: &str) -> IndexSet<String> {
        let registry = self.ctx.registry;
        let resolves = |ty: &TypeRef| registry.resolve_type(ty, caller).as_deref() == Some(target);

        let mut fields: IndexSet<String> = caller
            .fields()
            .filter(|(_, field)| resolves(&field.ty))
            .map(|(_, field)| field.name.clone())
            .collect();

        let constructors = caller.constructors().map(|(_, c)| (&c.parameters, &c.body));
        let setters = caller
            .methods()
            .filter(|(_, m)| m.is_setter())
            .filter_map(|(_, m)| Some((&m.parameters, m.body.as_ref()?)));
        for (parameters, body) in constructors.chain(setters) {
            for parameter in parameters.iter().filter(|p| resolves(&p.ty)) {
                fields.extend(
                    body.iter()
                        .filter_map(|stmt| stmt.assigned_field_from(&parameter.name))
                        .filter(|name| caller.field_named(name).is_some())
                        .map(str::to_string),
                );
            }
        }
        fields
    }

    /// `<Simple0><Simple1>..Operations` in the first component's package
    fn new_mediator(&self, components: &[Declaration]) -> Declaration {
        let base: String = components
            .iter()
            .map(Declaration::simple_name)
            .chain(["Operations"])
            .collect();
        let package = components
            .first()
            .map(|c| c.package.clone())
            .unwrap_or_default();

        let mut name = base.clone();
        let mut suffix = 2;
        while self
            .changes
            .is_taken(&qualify(&package, &name), self.ctx.registry)
        {
            name = format!("{base}{suffix}");
            suffix += 1;
        }
        Declaration::class(package, name)
    }
}

/// Grow `members` with everything they reach inside `component`: methods
/// called unqualified or through `this`, and fields referenced by name
fn close_over(component: &Declaration, members: &mut BTreeSet<usize>) {
    let mut pending: Vec<usize> = members.iter().copied().collect();
    while let Some(index) = pending.pop() {
        let references = local_references(&component.members[index]);

        let methods = references
            .calls
            .iter()
            .flat_map(|(name, arity)| component.methods_with_arity(name, *arity))
            .map(|(id, _)| id);
        let fields = references
            .names
            .iter()
            .filter_map(|name| component.field_named(name))
            .map(|(id, _)| id);

        for id in methods.chain(fields).collect::<Vec<_>>() {
            if members.insert(id.0) {
                pending.push(id.0);
            }
        }
    }
}

impl ResolutionStrategy for MethodExtractionStrategy<'_> {
    fn kind(&self) -> StrategyKind {
        StrategyKind::MethodExtraction
    }

    fn apply(&mut self, subject: Subject<'_>) -> bool {
        let ok = match subject {
            Subject::Cycle(cycle) => self.apply_cycle(cycle),
            Subject::Edge(_) => false,
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
