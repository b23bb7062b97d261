use tracing::debug;

use super::{ChangeSet, ResolutionStrategy, StrategyContext, StrategyKind, Subject};
use crate::graph::{DependencyEdge, InjectionKind};
use crate::model::Member;
use crate::writer::DeclarationWriter;

/// Defers construction of the injected component by marking the injection
/// point lazy
pub struct LazyAnnotationStrategy<'a> {
    ctx: StrategyContext<'a>,
    changes: ChangeSet,
}

impl<'a> LazyAnnotationStrategy<'a> {
    pub fn new(ctx: StrategyContext<'a>, dry_run: bool) -> Self {
        Self {
            ctx,
            changes: ChangeSet::new(dry_run),
        }
    }

    fn apply_edge(&mut self, edge: &DependencyEdge) -> bool {
        let site = edge.site();
        let Some(mut declaration) = self.changes.working_copy(&site.owner, self.ctx.registry) else {
            return false;
        };

        let annotations = match (edge.injection_kind(), declaration.member(site.member)) {
            (InjectionKind::Field, Some(Member::Field(field))) => &field.annotations,
            (InjectionKind::Setter, Some(Member::Method(method))) => &method.annotations,
            _ => return false,
        };
        if self.ctx.markers.is_lazy(annotations) {
            debug!(site = %site, "injection point already lazy");
            return true;
        }

        let Some(annotations) = declaration
            .member_mut(site.member)
            .and_then(Member::annotations_mut)
        else {
            return false;
        };
        annotations.push(self.ctx.markers.lazy_annotation());
        declaration.add_import(&self.ctx.markers.lazy_import);

        debug!(site = %site, "marked injection point lazy");
        self.changes.track_modified(declaration);
        true
    }
}

impl ResolutionStrategy for LazyAnnotationStrategy<'_> {
    fn kind(&self) -> StrategyKind {
        StrategyKind::LazyAnnotation
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
