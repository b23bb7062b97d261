//! Integration tests for unwire using the library interface

mod common;

use std::io::Cursor;
use std::path::Path;

use common::{
    assigning_constructor, call_through, component, final_field, injected_field, write_snapshot,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use unwire::cli::EmitFormat;
use unwire::config::MarkerConfig;
use unwire::detector::{CycleAnalysis, CycleDetector};
use unwire::graph::{DependencyGraphBuilder, GraphRenderer};
use unwire::model::Method;
use unwire::reports::{JsonReportGenerator, ReportContext, ReportGenerator};
use unwire::resolver::CycleResolver;
use unwire::snapshot::SnapshotLoader;
use unwire::strategy::StrategyKind;
use unwire::writer::SourceWriter;

/// Snapshots for three modules: `orders` and `billing` inject each other,
/// `web` only depends on `orders`
fn create_module_snapshots(root: &Path) {
    write_snapshot(
        &root.join("orders/orders.decl.json"),
        &[component("shop.orders", "Orders")
            .with_import("shop.billing.Billing")
            .with_member(injected_field("billing", "Billing"))
            .with_member(Method::new("place").with_body(vec![call_through("billing", "charge")]))],
    );
    write_snapshot(
        &root.join("billing/billing.decl.json"),
        &[component("shop.billing", "Billing")
            .with_import("shop.orders.Orders")
            .with_member(final_field("orders", "Orders"))
            .with_member(assigning_constructor(&[("orders", "Orders")]))
            .with_member(Method::new("charge"))],
    );
    write_snapshot(
        &root.join("web/web.decl.json"),
        &[component("shop.web", "Checkout")
            .with_import("shop.orders.Orders")
            .with_member(injected_field("orders", "Orders"))],
    );
}

#[test]
fn test_detects_cycle_across_snapshot_files() {
    let temp_dir = TempDir::new().unwrap();
    create_module_snapshots(temp_dir.path());

    let registry = SnapshotLoader::new()
        .load(&[temp_dir.path().to_path_buf()], None)
        .unwrap();
    assert_eq!(registry.len(), 3);

    let graph = DependencyGraphBuilder::new(&MarkerConfig::default()).build(&registry);
    assert_eq!(graph.edge_count(), 3);

    let detector = CycleDetector::new(graph.adjacency());
    let cycles = detector.find_cycles();
    assert_eq!(cycles.len(), 1);
    assert!(cycles[0].contains("shop.orders.Orders"));
    assert!(cycles[0].contains("shop.billing.Billing"));
    assert!(!cycles[0].contains("shop.web.Checkout"));

    let mut output = Cursor::new(Vec::new());
    GraphRenderer::new(true, false)
        .render_mermaid(&graph, &cycles, &mut output)
        .unwrap();
    let mermaid = String::from_utf8(output.into_inner()).unwrap();
    assert!(mermaid.contains("shop_orders_Orders((\"Orders\"))"));
    assert!(mermaid.contains("shop_web_Checkout[\"Checkout\"]"));
}

#[test]
fn test_json_report_lists_edges_of_each_group() {
    let temp_dir = TempDir::new().unwrap();
    create_module_snapshots(temp_dir.path());

    let registry = SnapshotLoader::new()
        .load(&[temp_dir.path().to_path_buf()], None)
        .unwrap();
    let graph = DependencyGraphBuilder::new(&MarkerConfig::default()).build(&registry);
    let analysis = CycleAnalysis::analyze(graph.adjacency(), 50);

    let report = JsonReportGenerator::new()
        .generate_report(&ReportContext::new(&graph, &analysis))
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&report).unwrap();

    assert_eq!(json["has_cycles"], true);
    assert_eq!(json["group_count"], 1);
    assert_eq!(json["cycle_count"], 1);
    let kinds: Vec<&str> = json["groups"][0]["edges"]
        .as_array()
        .unwrap()
        .iter()
        .map(|edge| edge["kind"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["constructor", "field"]);
}

#[test]
fn test_resolved_declarations_reload_from_output() {
    let temp_dir = TempDir::new().unwrap();
    let snapshots = temp_dir.path().join("snapshots");
    let output = temp_dir.path().join("rewritten");
    create_module_snapshots(&snapshots);

    let mut registry = SnapshotLoader::new()
        .load(&[snapshots.clone()], None)
        .unwrap();
    let markers = MarkerConfig::default();
    let writer = SourceWriter::new(EmitFormat::Json);

    let report = CycleResolver::new(&mut registry, &markers, &writer)
        .with_base_path(&output)
        .resolve()
        .unwrap();
    assert_eq!(report.resolved_count(), 1);
    assert!(report.is_complete());
    assert!(matches!(
        &report.outcomes[0],
        unwire::resolver::CycleOutcome::Resolved {
            strategy: StrategyKind::LazyAnnotation,
            ..
        }
    ));

    let rewritten = SnapshotLoader::with_pattern("*.json")
        .unwrap()
        .load(&[output], None)
        .unwrap();
    let names: Vec<&str> = rewritten.iter().map(|(fqn, _)| fqn).collect();
    assert_eq!(names, vec!["shop.orders.Orders"]);

    let orders = rewritten.get("shop.orders.Orders").unwrap();
    let (_, billing) = orders.field_named("billing").unwrap();
    assert!(billing.has_annotation("Lazy"));
    assert!(
        orders
            .imports
            .contains(&"org.springframework.context.annotation.Lazy".to_string())
    );

    // The input snapshots are left alone
    let original = SnapshotLoader::new().load(&[snapshots], None).unwrap();
    let (_, billing) = original
        .get("shop.orders.Orders")
        .unwrap()
        .field_named("billing")
        .unwrap();
    assert!(!billing.has_annotation("Lazy"));
}

#[test]
fn test_dry_run_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let snapshots = temp_dir.path().join("snapshots");
    let output = temp_dir.path().join("rewritten");
    create_module_snapshots(&snapshots);

    let mut registry = SnapshotLoader::new().load(&[snapshots], None).unwrap();
    let markers = MarkerConfig::default();
    let writer = SourceWriter::new(EmitFormat::Java);

    let report = CycleResolver::new(&mut registry, &markers, &writer)
        .with_base_path(&output)
        .with_dry_run(true)
        .resolve()
        .unwrap();

    assert_eq!(report.resolved_count(), 1);
    assert!(!output.exists());
}
