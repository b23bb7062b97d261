//! The whole-codebase declaration registry
//!
//! A registry is an explicit context object owned by the caller: create one
//! per analysis run, or [`DeclarationRegistry::reset`] it between runs.

use indexmap::IndexMap;

use crate::model::{Declaration, TypeRef, simple_name, type_parameter_name};

/// Maps fully-qualified names to declarations, in insertion order
#[derive(Debug, Clone, Default)]
pub struct DeclarationRegistry {
    declarations: IndexMap<String, Declaration>,
}

impl DeclarationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, fqn: &str) -> Option<&Declaration> {
        self.declarations.get(fqn)
    }

    /// Store `declaration` under `fqn`, returning the one it replaces.
    /// A replaced entry keeps its original position.
    pub fn put(&mut self, fqn: impl Into<String>, declaration: Declaration) -> Option<Declaration> {
        self.declarations.insert(fqn.into(), declaration)
    }

    /// Store a declaration under its own fully-qualified name
    pub fn insert(&mut self, declaration: Declaration) -> Option<Declaration> {
        self.put(declaration.fqn(), declaration)
    }

    pub fn reset(&mut self) {
        self.declarations.clear();
    }

    pub fn contains(&self, fqn: &str) -> bool {
        self.declarations.contains_key(fqn)
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Declaration)> {
        self.declarations
            .iter()
            .map(|(fqn, declaration)| (fqn.as_str(), declaration))
    }

    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.values()
    }

    /// Resolve a type as written inside `context` to a registry FQN.
    ///
    /// Type arguments and array dimensions are ignored: `List<Foo>` resolves
    /// as `List`, `Foo[]` as `Foo`.
    pub fn resolve_type(&self, ty: &TypeRef, context: &Declaration) -> Option<String> {
        self.resolve_name(ty.raw_name(), context)
    }

    /// Resolve a bare or qualified type name.
    ///
    /// Lookup order for unqualified names: single-type imports, wildcard
    /// imports, the current package, then the first declaration in the
    /// registry with that simple name.
    pub fn resolve_name(&self, name: &str, context: &Declaration) -> Option<String> {
        if name.contains('.') {
            return self.contains(name).then(|| name.to_string());
        }

        if context
            .type_parameters
            .iter()
            .any(|parameter| type_parameter_name(parameter) == name)
        {
            return None;
        }

        let single = context
            .imports
            .iter()
            .filter(|import| !import.ends_with(".*"))
            .find(|import| simple_name(import) == name && self.contains(import));
        if let Some(import) = single {
            return Some(import.clone());
        }

        for import in &context.imports {
            if let Some(package) = import.strip_suffix(".*") {
                let candidate = format!("{package}.{name}");
                if self.contains(&candidate) {
                    return Some(candidate);
                }
            }
        }

        let local = if context.package.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", context.package, name)
        };
        if self.contains(&local) {
            return Some(local);
        }

        self.declarations
            .iter()
            .find(|(_, declaration)| declaration.name == name)
            .map(|(fqn, _)| fqn.clone())
    }
}

impl FromIterator<Declaration> for DeclarationRegistry {
    fn from_iter<T: IntoIterator<Item = Declaration>>(iter: T) -> Self {
        let mut registry = Self::new();
        registry.extend(iter);
        registry
    }
}

impl Extend<Declaration> for DeclarationRegistry {
    fn extend<T: IntoIterator<Item = Declaration>>(&mut self, iter: T) {
        for declaration in iter {
            self.insert(declaration);
        }
    }
}
