//! Statements and expressions inside member bodies
//!
//! The tree is deliberately small: it models what cycle breaking has to reason
//! about (assignments, calls through fields, field access, literals) and keeps
//! the rest of a body intact through `Stmt::Opaque` and `Expr::Opaque`.

use serde::{Deserialize, Serialize};

use super::types::TypeRef;

pub type Block = Vec<Stmt>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "stmt", rename_all = "snake_case")]
pub enum Stmt {
    Expr {
        expr: Expr,
    },
    Assign {
        target: Expr,
        value: Expr,
    },
    Local {
        #[serde(rename = "type")]
        ty: TypeRef,
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        init: Option<Expr>,
    },
    Return {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<Expr>,
    },
    If {
        condition: Expr,
        then: Block,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        otherwise: Block,
    },
    Block {
        body: Block,
    },
    /// Source text the front end did not break down further
    Opaque {
        text: String,
    },
}

impl Stmt {
    pub fn expr(expr: Expr) -> Self {
        Stmt::Expr { expr }
    }

    pub fn assign(target: Expr, value: Expr) -> Self {
        Stmt::Assign { target, value }
    }

    /// `this.field = name;`
    pub fn assign_field(field: &str, name: &str) -> Self {
        Stmt::Assign {
            target: Expr::this_field(field),
            value: Expr::name(name),
        }
    }

    pub fn returns(value: Expr) -> Self {
        Stmt::Return { value: Some(value) }
    }

    /// If this statement stores the plain name `value` into a field, that
    /// field's name
    pub fn assigned_field_from(&self, value: &str) -> Option<&str> {
        match self {
            Stmt::Assign {
                target,
                value: Expr::Name { name },
            } if name == value => target.field_name(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "expr", rename_all = "snake_case")]
pub enum Expr {
    Name {
        name: String,
    },
    This,
    Literal {
        text: String,
    },
    FieldAccess {
        target: Box<Expr>,
        name: String,
    },
    Call {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        receiver: Option<Box<Expr>>,
        name: String,
        #[serde(default)]
        arguments: Vec<Expr>,
    },
    New {
        #[serde(rename = "type")]
        ty: TypeRef,
        #[serde(default)]
        arguments: Vec<Expr>,
    },
    Binary {
        op: String,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Opaque {
        text: String,
    },
}

impl Expr {
    pub fn name(name: impl Into<String>) -> Self {
        Expr::Name { name: name.into() }
    }

    pub fn literal(text: impl Into<String>) -> Self {
        Expr::Literal { text: text.into() }
    }

    /// `this.name`
    pub fn this_field(name: impl Into<String>) -> Self {
        Expr::FieldAccess {
            target: Box::new(Expr::This),
            name: name.into(),
        }
    }

    pub fn call(receiver: Option<Expr>, name: impl Into<String>, arguments: Vec<Expr>) -> Self {
        Expr::Call {
            receiver: receiver.map(Box::new),
            name: name.into(),
            arguments,
        }
    }

    pub fn binary(op: impl Into<String>, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op: op.into(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// The field named by `x` or `this.x`
    pub fn field_name(&self) -> Option<&str> {
        match self {
            Expr::Name { name } => Some(name),
            Expr::FieldAccess { target, name } if matches!(**target, Expr::This) => Some(name),
            _ => None,
        }
    }
}
