//! Source-order traversal of member bodies

use super::ast::{Expr, Stmt};
use super::declaration::Member;

/// Visitor over statements and expressions, in source order.
///
/// Override `visit_expr` or `visit_stmt` and call the matching `walk_*`
/// function to keep descending.
pub trait Visitor {
    fn visit_stmt(&mut self, stmt: &Stmt) {
        walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr);
    }

    fn visit_body(&mut self, body: &[Stmt]) {
        for stmt in body {
            self.visit_stmt(stmt);
        }
    }
}

pub fn walk_stmt<V: Visitor + ?Sized>(visitor: &mut V, stmt: &Stmt) {
    match stmt {
        Stmt::Expr { expr } => visitor.visit_expr(expr),
        Stmt::Assign { target, value } => {
            visitor.visit_expr(target);
            visitor.visit_expr(value);
        }
        Stmt::Local { init, .. } => {
            if let Some(init) = init {
                visitor.visit_expr(init);
            }
        }
        Stmt::Return { value } => {
            if let Some(value) = value {
                visitor.visit_expr(value);
            }
        }
        Stmt::If {
            condition,
            then,
            otherwise,
        } => {
            visitor.visit_expr(condition);
            visitor.visit_body(then);
            visitor.visit_body(otherwise);
        }
        Stmt::Block { body } => visitor.visit_body(body),
        Stmt::Opaque { .. } => {}
    }
}

pub fn walk_expr<V: Visitor + ?Sized>(visitor: &mut V, expr: &Expr) {
    match expr {
        Expr::Name { .. } | Expr::This | Expr::Literal { .. } | Expr::Opaque { .. } => {}
        Expr::FieldAccess { target, .. } => visitor.visit_expr(target),
        Expr::Call {
            receiver,
            arguments,
            ..
        } => {
            if let Some(receiver) = receiver {
                visitor.visit_expr(receiver);
            }
            for argument in arguments {
                visitor.visit_expr(argument);
            }
        }
        Expr::New { arguments, .. } => {
            for argument in arguments {
                visitor.visit_expr(argument);
            }
        }
        Expr::Binary { left, right, .. } => {
            visitor.visit_expr(left);
            visitor.visit_expr(right);
        }
    }
}

/// Visit everything executable in a member: bodies and field initializers
pub fn walk_member<V: Visitor + ?Sized>(visitor: &mut V, member: &Member) {
    match member {
        Member::Field(field) => {
            if let Some(initializer) = &field.initializer {
                visitor.visit_expr(initializer);
            }
        }
        Member::Method(method) => {
            if let Some(body) = &method.body {
                visitor.visit_body(body);
            }
        }
        Member::Constructor(constructor) => visitor.visit_body(&constructor.body),
        Member::Initializer(initializer) => visitor.visit_body(&initializer.body),
    }
}
