//! Type declarations and their members
//!
//! A [`Declaration`] is an arena of members addressed by [`MemberId`]. Members
//! are only ever appended, so an id stays valid for the lifetime of the
//! declaration and across working copies of it. Members sit behind `Arc` so
//! that cloning a declaration is a shallow copy; writers go through
//! [`Declaration::member_mut`], which copies a member only when it is shared.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::ast::{Block, Expr};
use super::types::{Annotation, Modifier, TypeRef, package_of, qualify, simple_name};

/// Stable index of a member inside its declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub usize);

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    #[default]
    Class,
    Interface,
}

/// A top-level type declaration together with its file-level context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    pub name: String,
    #[serde(default)]
    pub package: String,
    #[serde(default)]
    pub kind: DeclarationKind,
    #[serde(default)]
    pub imports: Vec<String>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    #[serde(default)]
    pub type_parameters: Vec<String>,
    #[serde(default)]
    pub extends: Vec<TypeRef>,
    #[serde(default)]
    pub implements: Vec<TypeRef>,
    #[serde(default)]
    pub members: Vec<Arc<Member>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_path: Option<PathBuf>,
}

impl Declaration {
    pub fn new(kind: DeclarationKind, package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            kind,
            imports: Vec::new(),
            annotations: Vec::new(),
            modifiers: vec![Modifier::Public],
            type_parameters: Vec::new(),
            extends: Vec::new(),
            implements: Vec::new(),
            members: Vec::new(),
            source_path: None,
        }
    }

    pub fn class(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(DeclarationKind::Class, package, name)
    }

    pub fn interface(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(DeclarationKind::Interface, package, name)
    }

    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotations.push(Annotation::new(annotation));
        self
    }

    pub fn with_import(mut self, import: impl Into<String>) -> Self {
        self.imports.push(import.into());
        self
    }

    pub fn with_type_parameter(mut self, parameter: impl Into<String>) -> Self {
        self.type_parameters.push(parameter.into());
        self
    }

    pub fn with_member(mut self, member: impl Into<Member>) -> Self {
        self.push_member(member.into());
        self
    }

    /// Fully-qualified name
    pub fn fqn(&self) -> String {
        qualify(&self.package, &self.name)
    }

    pub fn is_interface(&self) -> bool {
        self.kind == DeclarationKind::Interface
    }

    pub fn has_annotation(&self, marker: &str) -> bool {
        self.annotations.iter().any(|a| a.matches(marker))
    }

    pub fn member(&self, id: MemberId) -> Option<&Member> {
        self.members.get(id.0).map(Arc::as_ref)
    }

    /// Mutable access to one member, copying it first if it is shared
    pub fn member_mut(&mut self, id: MemberId) -> Option<&mut Member> {
        self.members.get_mut(id.0).map(Arc::make_mut)
    }

    pub fn push_member(&mut self, member: Member) -> MemberId {
        self.members.push(Arc::new(member));
        MemberId(self.members.len() - 1)
    }

    pub fn members(&self) -> impl Iterator<Item = (MemberId, &Member)> {
        self.members
            .iter()
            .enumerate()
            .map(|(i, member)| (MemberId(i), member.as_ref()))
    }

    pub fn fields(&self) -> impl Iterator<Item = (MemberId, &Field)> {
        self.members().filter_map(|(id, member)| match member {
            Member::Field(field) => Some((id, field)),
            _ => None,
        })
    }

    pub fn methods(&self) -> impl Iterator<Item = (MemberId, &Method)> {
        self.members().filter_map(|(id, member)| match member {
            Member::Method(method) => Some((id, method)),
            _ => None,
        })
    }

    pub fn constructors(&self) -> impl Iterator<Item = (MemberId, &Constructor)> {
        self.members().filter_map(|(id, member)| match member {
            Member::Constructor(constructor) => Some((id, constructor)),
            _ => None,
        })
    }

    pub fn field_named(&self, name: &str) -> Option<(MemberId, &Field)> {
        self.fields().find(|(_, field)| field.name == name)
    }

    /// Every overload with the given name taking `arity` parameters.
    ///
    /// Call sites carry no argument types, so a call matches all of these.
    pub fn methods_with_arity<'d, 'n>(
        &'d self,
        name: &'n str,
        arity: usize,
    ) -> impl Iterator<Item = (MemberId, &'d Method)> + use<'d, 'n> {
        self.methods()
            .filter(move |(_, method)| method.name == name && method.parameters.len() == arity)
    }

    /// First method with the given name taking `arity` parameters
    pub fn method_with_arity(&self, name: &str, arity: usize) -> Option<(MemberId, &Method)> {
        self.methods_with_arity(name, arity).next()
    }

    /// Whether `fqn` is visible without adding an import
    pub fn sees(&self, fqn: &str) -> bool {
        let package = package_of(fqn);
        package == self.package
            || package == "java.lang"
            || self.imports.iter().any(|import| {
                import == fqn
                    || import
                        .strip_suffix(".*")
                        .is_some_and(|wildcard| wildcard == package)
            })
    }

    /// Add an import unless the type is already visible. Returns whether the
    /// import list changed.
    pub fn add_import(&mut self, fqn: &str) -> bool {
        if self.sees(fqn) {
            return false;
        }
        self.imports.push(fqn.to_string());
        true
    }

    pub fn simple_name(&self) -> &str {
        simple_name(&self.name)
    }
}

/// One member of a declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "member", rename_all = "snake_case")]
pub enum Member {
    Field(Field),
    Method(Method),
    Constructor(Constructor),
    Initializer(Initializer),
}

impl Member {
    pub fn name(&self) -> Option<&str> {
        match self {
            Member::Field(field) => Some(&field.name),
            Member::Method(method) => Some(&method.name),
            Member::Constructor(_) | Member::Initializer(_) => None,
        }
    }

    pub fn kind_label(&self) -> &'static str {
        match self {
            Member::Field(_) => "field",
            Member::Method(_) => "method",
            Member::Constructor(_) => "constructor",
            Member::Initializer(_) => "initializer",
        }
    }

    /// Annotation list, if this kind of member carries one
    pub fn annotations_mut(&mut self) -> Option<&mut Vec<Annotation>> {
        match self {
            Member::Field(field) => Some(&mut field.annotations),
            Member::Method(method) => Some(&mut method.annotations),
            Member::Constructor(constructor) => Some(&mut constructor.annotations),
            Member::Initializer(_) => None,
        }
    }
}

impl From<Field> for Member {
    fn from(value: Field) -> Self {
        Member::Field(value)
    }
}

impl From<Method> for Member {
    fn from(value: Method) -> Self {
        Member::Method(value)
    }
}

impl From<Constructor> for Member {
    fn from(value: Constructor) -> Self {
        Member::Constructor(value)
    }
}

impl From<Initializer> for Member {
    fn from(value: Initializer) -> Self {
        Member::Initializer(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initializer: Option<Expr>,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            modifiers: vec![Modifier::Private],
            annotations: Vec::new(),
            initializer: None,
        }
    }

    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotations.push(Annotation::new(annotation));
        self
    }

    pub fn with_modifiers(mut self, modifiers: Vec<Modifier>) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_initializer(mut self, initializer: Expr) -> Self {
        self.initializer = Some(initializer);
        self
    }

    pub fn has_annotation(&self, marker: &str) -> bool {
        self.annotations.iter().any(|a| a.matches(marker))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            annotations: Vec::new(),
        }
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    #[serde(default)]
    pub type_parameters: Vec<String>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// `None` for `void`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<TypeRef>,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    /// `None` for abstract and interface methods
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Block>,
}

impl Method {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_parameters: Vec::new(),
            parameters: Vec::new(),
            return_type: None,
            modifiers: vec![Modifier::Public],
            annotations: Vec::new(),
            body: Some(Vec::new()),
        }
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_return_type(mut self, ty: TypeRef) -> Self {
        self.return_type = Some(ty);
        self
    }

    pub fn with_modifiers(mut self, modifiers: Vec<Modifier>) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotations.push(Annotation::new(annotation));
        self
    }

    pub fn with_body(mut self, body: Block) -> Self {
        self.body = Some(body);
        self
    }

    pub fn has_annotation(&self, marker: &str) -> bool {
        self.annotations.iter().any(|a| a.matches(marker))
    }

    /// A conventional one-argument `setX` method
    pub fn is_setter(&self) -> bool {
        self.parameters.len() == 1
            && self
                .name
                .strip_prefix("set")
                .and_then(|rest| rest.chars().next())
                .is_some_and(char::is_uppercase)
    }

    /// Name and parameter types, used to tell overloads apart
    pub fn signature(&self) -> String {
        let parameters: Vec<String> = self.parameters.iter().map(|p| p.ty.to_string()).collect();
        format!("{}({})", self.name, parameters.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constructor {
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub body: Block,
}

impl Constructor {
    pub fn new() -> Self {
        Self {
            parameters: Vec::new(),
            modifiers: vec![Modifier::Public],
            annotations: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotations.push(Annotation::new(annotation));
        self
    }

    pub fn with_body(mut self, body: Block) -> Self {
        self.body = body;
        self
    }

    pub fn has_annotation(&self, marker: &str) -> bool {
        self.annotations.iter().any(|a| a.matches(marker))
    }
}

impl Default for Constructor {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Initializer {
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub body: Block,
}

/// First identifier of a type parameter declaration (`T extends Foo` → `T`)
pub fn type_parameter_name(parameter: &str) -> &str {
    parameter.split_whitespace().next().unwrap_or(parameter)
}
