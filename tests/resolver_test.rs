//! The resolver end to end: cycle ordering, strategy preference, commits and
//! persistence

mod common;

use std::path::{Path, PathBuf};

use common::{
    RecordingWriter, assigning_constructor, call_through, component, final_field, fqns,
    injected_field, registry,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use unwire::cli::EmitFormat;
use unwire::config::MarkerConfig;
use unwire::error::UnwireError;
use unwire::graph::InjectionKind;
use unwire::injection_filter::InjectionFilter;
use unwire::model::{Declaration, Method, Parameter, TypeRef};
use unwire::registry::DeclarationRegistry;
use unwire::resolver::{CycleOutcome, CycleResolver, RejectedEdge};
use unwire::strategy::StrategyKind;
use unwire::writer::{DeclarationWriter, SourceWriter};

#[test]
fn test_field_cycle_is_broken_lazily_and_persisted() {
    let mut registry = registry([
        component("app", "A").with_member(injected_field("b", "B")),
        component("app", "B").with_member(injected_field("a", "A")),
    ]);
    let markers = MarkerConfig::default();
    let writer = RecordingWriter::default();

    let report = CycleResolver::new(&mut registry, &markers, &writer)
        .with_base_path("out")
        .resolve()
        .unwrap();

    assert_eq!(report.resolved_count(), 1);
    assert!(report.is_complete());
    match &report.outcomes[0] {
        CycleOutcome::Resolved {
            strategy,
            link,
            modified,
            generated,
            ..
        } => {
            assert_eq!(*strategy, StrategyKind::LazyAnnotation);
            assert_eq!(link, &Some(("app.A".to_string(), "app.B".to_string())));
            assert_eq!(modified, &fqns(&["app.A"]));
            assert!(generated.is_empty());
        }
        other => panic!("unexpected outcome {other:?}"),
    }

    let (_, field) = registry.get("app.A").unwrap().field_named("b").unwrap();
    assert!(field.has_annotation("Lazy"));
    assert_eq!(
        writer.written.borrow().as_slice(),
        &[("app.A".to_string(), Path::new("out").to_path_buf())]
    );
}

#[test]
fn test_dry_run_commits_in_memory_only() {
    let mut registry = registry([
        component("app", "A").with_member(injected_field("b", "B")),
        component("app", "B").with_member(injected_field("a", "A")),
    ]);
    let markers = MarkerConfig::default();
    let writer = RecordingWriter::default();

    let report = CycleResolver::new(&mut registry, &markers, &writer)
        .with_dry_run(true)
        .resolve()
        .unwrap();

    assert!(report.dry_run);
    assert_eq!(report.resolved_count(), 1);
    assert_eq!(report.modified.iter().collect::<Vec<_>>(), vec!["app.A"]);
    assert!(writer.written.borrow().is_empty());
    assert!(
        registry
            .get("app.A")
            .unwrap()
            .field_named("b")
            .unwrap()
            .1
            .has_annotation("Lazy")
    );
}

#[test]
fn test_constructor_cycle_falls_through_to_setter_injection() {
    let mut registry = registry([
        component("app", "A")
            .with_member(final_field("b", "B"))
            .with_member(assigning_constructor(&[("b", "B")])),
        component("app", "B")
            .with_member(final_field("a", "A"))
            .with_member(assigning_constructor(&[("a", "A")])),
    ]);
    let markers = MarkerConfig::default();
    let writer = RecordingWriter::default();

    let report = CycleResolver::new(&mut registry, &markers, &writer)
        .resolve()
        .unwrap();

    match &report.outcomes[..] {
        [CycleOutcome::Resolved { strategy, link, .. }] => {
            assert_eq!(*strategy, StrategyKind::SetterInjection);
            assert_eq!(link, &Some(("app.A".to_string(), "app.B".to_string())));
        }
        other => panic!("unexpected outcomes {other:?}"),
    }
    let a = registry.get("app.A").unwrap();
    assert!(a.method_with_arity("setB", 1).is_some());
    assert!(a.constructors().all(|(_, c)| c.parameters.is_empty()));
}

#[test]
fn test_cycles_sharing_a_broken_link_are_already_broken() {
    let mut registry = registry([
        component("app", "A").with_member(injected_field("b", "B")),
        component("app", "B")
            .with_member(injected_field("a", "A"))
            .with_member(injected_field("c", "C")),
        component("app", "C").with_member(injected_field("a", "A")),
    ]);
    let markers = MarkerConfig::default();
    let writer = RecordingWriter::default();

    let report = CycleResolver::new(&mut registry, &markers, &writer)
        .resolve()
        .unwrap();

    assert_eq!(report.outcomes.len(), 2);
    assert_eq!(report.resolved_count(), 1);
    assert_eq!(report.already_broken_count(), 1);
    assert_eq!(report.outcomes[0].members(), &fqns(&["app.A", "app.B"])[..]);
    assert_eq!(
        report.outcomes[1].members(),
        &fqns(&["app.A", "app.B", "app.C"])[..]
    );
    assert_eq!(writer.fqns(), fqns(&["app.A"]));
}

#[test]
fn test_factory_cycle_without_calls_is_unresolved() {
    let mut registry = registry([
        Declaration::class("app", "AppConfig")
            .with_annotation("Configuration")
            .with_member(
                Method::new("orders")
                    .with_annotation("Bean")
                    .with_return_type(TypeRef::simple("Orders"))
                    .with_parameter(Parameter::new("billing", TypeRef::simple("Billing"))),
            )
            .with_member(
                Method::new("billing")
                    .with_annotation("Bean")
                    .with_return_type(TypeRef::simple("Billing"))
                    .with_parameter(Parameter::new("orders", TypeRef::simple("Orders"))),
            ),
        Declaration::class("app", "Orders"),
        Declaration::class("app", "Billing"),
    ]);
    let markers = MarkerConfig::default();
    let writer = RecordingWriter::default();

    let report = CycleResolver::new(&mut registry, &markers, &writer)
        .resolve()
        .unwrap();

    let unresolved: Vec<_> = report.unresolved().collect();
    assert_eq!(unresolved.len(), 1);
    assert_eq!(unresolved[0].members, fqns(&["app.Orders", "app.Billing"]));
    assert_eq!(
        unresolved[0].rejected,
        vec![
            RejectedEdge {
                from: "app.Orders".to_string(),
                to: "app.Billing".to_string(),
                kind: InjectionKind::FactoryMethod,
            },
            RejectedEdge {
                from: "app.Billing".to_string(),
                to: "app.Orders".to_string(),
                kind: InjectionKind::FactoryMethod,
            },
        ]
    );
    assert!(!report.is_complete());
    assert!(writer.written.borrow().is_empty());
    assert!(report.modified.is_empty());
}

#[test]
fn test_filtered_kinds_leave_nothing_to_resolve() {
    let mut registry = registry([
        component("app", "A").with_member(injected_field("b", "B")),
        component("app", "B").with_member(injected_field("a", "A")),
    ]);
    let markers = MarkerConfig::default();
    let writer = RecordingWriter::default();

    let report = CycleResolver::new(&mut registry, &markers, &writer)
        .with_filter(InjectionFilter::new(true, false, false, false))
        .resolve()
        .unwrap();

    assert!(report.outcomes.is_empty());
    assert!(writer.written.borrow().is_empty());
}

#[test]
fn test_oversized_components_are_skipped() {
    let mut registry = registry([
        component("app", "A").with_member(injected_field("b", "B")),
        component("app", "B").with_member(injected_field("c", "C")),
        component("app", "C").with_member(injected_field("a", "A")),
    ]);
    let markers = MarkerConfig::default();
    let writer = RecordingWriter::default();

    let report = CycleResolver::new(&mut registry, &markers, &writer)
        .with_max_scc_size(2)
        .resolve()
        .unwrap();

    assert_eq!(report.skipped_count(), 1);
    assert_eq!(report.outcomes[0].members().len(), 3);
    assert!(!report.is_complete());
}

/// Factory edges are out of reach for every single-edge strategy, but the
/// produced components still call each other through their fields
fn factory_cycle_with_calls() -> DeclarationRegistry {
    registry([
        Declaration::class("app", "AppConfig")
            .with_annotation("Configuration")
            .with_member(
                Method::new("orders")
                    .with_annotation("Bean")
                    .with_return_type(TypeRef::simple("Orders"))
                    .with_parameter(Parameter::new("billing", TypeRef::simple("Billing"))),
            )
            .with_member(
                Method::new("billing")
                    .with_annotation("Bean")
                    .with_return_type(TypeRef::simple("Billing"))
                    .with_parameter(Parameter::new("orders", TypeRef::simple("Orders"))),
            ),
        Declaration::class("app", "Orders")
            .with_member(final_field("billing", "Billing"))
            .with_member(assigning_constructor(&[("billing", "Billing")]))
            .with_member(Method::new("place").with_body(vec![call_through("billing", "charge")])),
        Declaration::class("app", "Billing")
            .with_member(final_field("orders", "Orders"))
            .with_member(assigning_constructor(&[("orders", "Orders")]))
            .with_member(Method::new("charge")),
    ])
}

#[test]
fn test_method_extraction_when_no_edge_strategy_applies() {
    let mut registry = factory_cycle_with_calls();
    let markers = MarkerConfig::default();
    let writer = RecordingWriter::default();

    let report = CycleResolver::new(&mut registry, &markers, &writer)
        .resolve()
        .unwrap();

    match &report.outcomes[..] {
        [
            CycleOutcome::Resolved {
                strategy,
                link,
                generated,
                ..
            },
        ] => {
            assert_eq!(*strategy, StrategyKind::MethodExtraction);
            assert_eq!(link, &None);
            assert_eq!(generated, &fqns(&["app.OrdersBillingOperations"]));
        }
        other => panic!("unexpected outcomes {other:?}"),
    }
    assert!(registry.contains("app.OrdersBillingOperations"));
    assert_eq!(
        writer.fqns(),
        fqns(&["app.Orders", "app.Billing", "app.OrdersBillingOperations"])
    );
}

#[test]
fn test_source_writer_emits_files_under_base_path() {
    let dir = TempDir::new().unwrap();
    let mut registry = registry([
        component("com.shop", "Orders").with_member(injected_field("billing", "Billing")),
        component("com.shop", "Billing").with_member(injected_field("orders", "Orders")),
    ]);
    let markers = MarkerConfig::default();
    let writer = SourceWriter::new(EmitFormat::Java);

    let report = CycleResolver::new(&mut registry, &markers, &writer)
        .with_base_path(dir.path())
        .resolve()
        .unwrap();
    assert_eq!(report.resolved_count(), 1);

    let written = dir.path().join("com").join("shop").join("Orders.java");
    let text = std::fs::read_to_string(written).unwrap();
    assert!(text.contains("@Lazy"));
    assert!(text.contains("import org.springframework.context.annotation.Lazy;"));
    assert!(!dir.path().join("com").join("shop").join("Billing.java").exists());
}

/// Accepts declarations until it is asked to write `fail_on`
struct FailingWriter {
    fail_on: &'static str,
    inner: RecordingWriter,
}

impl DeclarationWriter for FailingWriter {
    fn persist(
        &self,
        fqn: &str,
        declaration: &Declaration,
        base: &Path,
    ) -> Result<(), UnwireError> {
        if fqn == self.fail_on {
            return Err(UnwireError::WriteError {
                path: PathBuf::from(fqn),
                source: std::io::Error::other("disk full"),
            });
        }
        self.inner.persist(fqn, declaration, base)
    }
}

#[test]
fn test_writer_failure_leaves_registry_uncommitted() {
    let mut registry = factory_cycle_with_calls();
    let markers = MarkerConfig::default();
    let writer = FailingWriter {
        fail_on: "app.OrdersBillingOperations",
        inner: RecordingWriter::default(),
    };

    let result = CycleResolver::new(&mut registry, &markers, &writer)
        .with_base_path("out")
        .resolve();

    assert!(matches!(result, Err(UnwireError::WriteError { .. })));
    // Declarations written before the failure stay written
    assert_eq!(writer.inner.fqns(), fqns(&["app.Orders", "app.Billing"]));
    assert!(!registry.contains("app.OrdersBillingOperations"));
}
