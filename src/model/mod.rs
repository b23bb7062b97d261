//! # Declaration Model
//!
//! The in-memory form of parsed source that the graph builder reads and the
//! resolution strategies rewrite. It is produced by an external front end and
//! arrives here through declaration snapshots (see [`crate::snapshot`]).
//!
//! ## Example
//!
//! ```
//! use unwire::model::{Declaration, Field, TypeRef};
//!
//! let decl = Declaration::class("com.shop", "OrderService")
//!     .with_annotation("Service")
//!     .with_member(Field::new("billing", TypeRef::simple("BillingService")).with_annotation("Autowired"));
//!
//! assert_eq!(decl.fqn(), "com.shop.OrderService");
//! assert_eq!(decl.fields().count(), 1);
//! ```

mod ast;
mod declaration;
mod types;
pub mod visit;

pub use ast::{Block, Expr, Stmt};
pub use declaration::{
    Constructor, Declaration, DeclarationKind, Field, Initializer, Member, MemberId, Method,
    Parameter, type_parameter_name,
};
pub use types::{Annotation, Modifier, TypeRef, package_of, qualify, simple_name};
