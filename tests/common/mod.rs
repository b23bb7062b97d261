//! Declaration fixtures shared by the integration tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use unwire::config::MarkerConfig;
use unwire::error::UnwireError;
use unwire::graph::{DependencyEdge, DependencyGraph, DependencyGraphBuilder};
use unwire::model::{Constructor, Declaration, Expr, Field, Modifier, Parameter, Stmt, TypeRef};
use unwire::registry::DeclarationRegistry;
use unwire::writer::DeclarationWriter;

/// A `@Service` class
pub fn component(package: &str, name: &str) -> Declaration {
    Declaration::class(package, name).with_annotation("Service")
}

/// An `@Autowired` field of type `ty`
pub fn injected_field(name: &str, ty: &str) -> Field {
    Field::new(name, TypeRef::simple(ty)).with_annotation("Autowired")
}

/// A `private final` field, as constructor injection leaves it
pub fn final_field(name: &str, ty: &str) -> Field {
    Field::new(name, TypeRef::simple(ty)).with_modifiers(vec![Modifier::Private, Modifier::Final])
}

/// A constructor taking `(name, type)` parameters and assigning each to the
/// same-named field
pub fn assigning_constructor(parameters: &[(&str, &str)]) -> Constructor {
    let mut constructor = Constructor::new();
    let mut body = Vec::new();
    for (name, ty) in parameters {
        constructor = constructor.with_parameter(Parameter::new(*name, TypeRef::simple(*ty)));
        body.push(Stmt::assign_field(name, name));
    }
    constructor.with_body(body)
}

/// `field.method()` as a statement
pub fn call_through(field: &str, method: &str) -> Stmt {
    Stmt::expr(Expr::call(Some(Expr::name(field)), method, vec![]))
}

pub fn registry(declarations: impl IntoIterator<Item = Declaration>) -> DeclarationRegistry {
    declarations.into_iter().collect()
}

pub fn build_graph(registry: &DeclarationRegistry) -> DependencyGraph {
    DependencyGraphBuilder::new(&MarkerConfig::default()).build(registry)
}

/// The first edge between two components
pub fn edge<'g>(graph: &'g DependencyGraph, from: &'g str, to: &'g str) -> &'g DependencyEdge {
    graph
        .edges_between(from, to)
        .next()
        .unwrap_or_else(|| panic!("no edge {from} → {to}"))
}

pub fn fqns(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

/// Records every persisted declaration instead of writing it
#[derive(Default)]
pub struct RecordingWriter {
    pub written: RefCell<Vec<(String, PathBuf)>>,
}

impl RecordingWriter {
    pub fn fqns(&self) -> Vec<String> {
        self.written
            .borrow()
            .iter()
            .map(|(fqn, _)| fqn.clone())
            .collect()
    }
}

impl DeclarationWriter for RecordingWriter {
    fn persist(&self, fqn: &str, _: &Declaration, base: &Path) -> Result<(), UnwireError> {
        self.written
            .borrow_mut()
            .push((fqn.to_string(), base.to_path_buf()));
        Ok(())
    }
}

/// Write a snapshot file holding `declarations`, creating parent directories
pub fn write_snapshot(path: &Path, declarations: &[Declaration]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, serde_json::to_string_pretty(declarations).unwrap()).unwrap();
}
