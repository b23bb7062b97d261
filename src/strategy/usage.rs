//! Body scans shared by the extraction strategies

use indexmap::IndexSet;

use crate::model::visit::{Visitor, walk_expr, walk_member, walk_stmt};
use crate::model::{Declaration, Expr, Member, Parameter, Stmt, TypeRef, simple_name};

/// A call site reduced to what overload matching needs
pub type CallShape = (String, usize);

/// Methods invoked through one field, as `field.m(..)` or `this.field.m(..)`
struct CallsThrough<'f> {
    field: &'f str,
    /// The current member binds the field's name to something else, so only
    /// `this.field` still denotes the field
    shadowed: bool,
    calls: IndexSet<CallShape>,
}

impl CallsThrough<'_> {
    fn denotes_field(&self, receiver: &Expr) -> bool {
        match receiver {
            Expr::Name { name } => !self.shadowed && name == self.field,
            Expr::FieldAccess { target, name } => {
                matches!(**target, Expr::This) && name == self.field
            }
            _ => false,
        }
    }
}

impl Visitor for CallsThrough<'_> {
    fn visit_expr(&mut self, expr: &Expr) {
        if let Expr::Call {
            receiver: Some(receiver),
            name,
            arguments,
        } = expr
            && self.denotes_field(receiver)
        {
            self.calls.insert((name.clone(), arguments.len()));
        }
        walk_expr(self, expr);
    }
}

/// Types of the locals a body declares under one name
struct LocalTypes<'n> {
    name: &'n str,
    types: Vec<TypeRef>,
}

impl Visitor for LocalTypes<'_> {
    fn visit_stmt(&mut self, stmt: &Stmt) {
        if let Stmt::Local { ty, name, .. } = stmt
            && name == self.name
        {
            self.types.push(ty.clone());
        }
        walk_stmt(self, stmt);
    }
}

/// Whether `member` binds `name` as a parameter or local of a type other
/// than `field_type`. A binding of the field's own type is taken to hold the
/// injected instance.
fn rebinds(member: &Member, name: &str, field_type: Option<&str>) -> bool {
    let parameters: &[Parameter] = match member {
        Member::Method(method) => method.parameters.as_slice(),
        Member::Constructor(constructor) => constructor.parameters.as_slice(),
        Member::Field(_) | Member::Initializer(_) => &[],
    };
    let mut locals = LocalTypes {
        name,
        types: Vec::new(),
    };
    walk_member(&mut locals, member);

    parameters
        .iter()
        .filter(|parameter| parameter.name == name)
        .map(|parameter| &parameter.ty)
        .chain(&locals.types)
        .any(|ty| Some(simple_name(ty.raw_name())) != field_type)
}

/// Every distinct call made through `field` anywhere in `declaration`
pub fn calls_through(declaration: &Declaration, field: &str) -> IndexSet<CallShape> {
    let field_type = declaration
        .field_named(field)
        .map(|(_, f)| simple_name(f.ty.raw_name()));
    let mut visitor = CallsThrough {
        field,
        shadowed: false,
        calls: IndexSet::new(),
    };
    for (_, member) in declaration.members() {
        visitor.shadowed = rebinds(member, field, field_type);
        walk_member(&mut visitor, member);
    }
    visitor.calls
}

/// Same-declaration references made by one member
#[derive(Debug, Default)]
pub struct LocalReferences {
    /// Unqualified or `this.` calls
    pub calls: IndexSet<CallShape>,
    /// Plain names and `this.x` accesses that may denote fields
    pub names: IndexSet<String>,
}

impl Visitor for LocalReferences {
    fn visit_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Call {
                receiver,
                name,
                arguments,
            } if receiver.as_deref().is_none_or(|r| matches!(r, Expr::This)) => {
                self.calls.insert((name.clone(), arguments.len()));
            }
            Expr::Name { name } => {
                self.names.insert(name.clone());
            }
            Expr::FieldAccess { target, name } if matches!(**target, Expr::This) => {
                self.names.insert(name.clone());
            }
            _ => {}
        }
        walk_expr(self, expr);
    }
}

pub fn local_references(member: &Member) -> LocalReferences {
    let mut references = LocalReferences::default();
    walk_member(&mut references, member);
    references
}
