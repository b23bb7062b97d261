//! Java-style source text for declarations
//!
//! Used by [`SourceWriter`](crate::writer::SourceWriter) and by dry-run
//! previews. The output is readable source, not a byte-exact reproduction of
//! what the front end parsed.

use std::fmt::Write;

use crate::error::UnwireError;
use crate::model::{
    Annotation, Block, Constructor, Declaration, DeclarationKind, Expr, Field, Initializer, Member,
    Method, Modifier, Parameter, Stmt,
};

const INDENT: &str = "    ";

pub fn render_declaration(declaration: &Declaration) -> Result<String, UnwireError> {
    let mut out = String::new();

    if !declaration.package.is_empty() {
        writeln!(out, "package {};\n", declaration.package)?;
    }
    for import in &declaration.imports {
        writeln!(out, "import {import};")?;
    }
    if !declaration.imports.is_empty() {
        writeln!(out)?;
    }

    write_annotations(&mut out, &declaration.annotations, "")?;
    write_modifiers(&mut out, &declaration.modifiers)?;
    let keyword = match declaration.kind {
        DeclarationKind::Class => "class",
        DeclarationKind::Interface => "interface",
    };
    write!(out, "{keyword} {}", declaration.name)?;
    if !declaration.type_parameters.is_empty() {
        write!(out, "<{}>", declaration.type_parameters.join(", "))?;
    }
    if !declaration.extends.is_empty() {
        write!(out, " extends {}", join(&declaration.extends))?;
    }
    if !declaration.implements.is_empty() {
        write!(out, " implements {}", join(&declaration.implements))?;
    }
    writeln!(out, " {{")?;

    for (i, (_, member)) in declaration.members().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        match member {
            Member::Field(field) => write_field(&mut out, field)?,
            Member::Method(method) => write_method(&mut out, method)?,
            Member::Constructor(constructor) => {
                write_constructor(&mut out, declaration.simple_name(), constructor)?
            }
            Member::Initializer(initializer) => write_initializer(&mut out, initializer)?,
        }
    }

    writeln!(out, "}}")?;
    Ok(out)
}

fn write_field(out: &mut String, field: &Field) -> std::fmt::Result {
    write_annotations(out, &field.annotations, INDENT)?;
    write!(out, "{INDENT}")?;
    write_modifiers(out, &field.modifiers)?;
    write!(out, "{} {}", field.ty, field.name)?;
    if let Some(initializer) = &field.initializer {
        write!(out, " = {}", expr(initializer))?;
    }
    writeln!(out, ";")
}

fn write_method(out: &mut String, method: &Method) -> std::fmt::Result {
    write_annotations(out, &method.annotations, INDENT)?;
    write!(out, "{INDENT}")?;
    write_modifiers(out, &method.modifiers)?;
    if !method.type_parameters.is_empty() {
        write!(out, "<{}> ", method.type_parameters.join(", "))?;
    }
    match &method.return_type {
        Some(ty) => write!(out, "{ty} ")?,
        None => write!(out, "void ")?,
    }
    write!(out, "{}({})", method.name, parameters(&method.parameters))?;
    match &method.body {
        Some(body) => {
            writeln!(out, " {{")?;
            write_block(out, body, 2)?;
            writeln!(out, "{INDENT}}}")
        }
        None => writeln!(out, ";"),
    }
}

fn write_constructor(out: &mut String, name: &str, constructor: &Constructor) -> std::fmt::Result {
    write_annotations(out, &constructor.annotations, INDENT)?;
    write!(out, "{INDENT}")?;
    write_modifiers(out, &constructor.modifiers)?;
    writeln!(out, "{name}({}) {{", parameters(&constructor.parameters))?;
    write_block(out, &constructor.body, 2)?;
    writeln!(out, "{INDENT}}}")
}

fn write_initializer(out: &mut String, initializer: &Initializer) -> std::fmt::Result {
    let keyword = if initializer.is_static { "static " } else { "" };
    writeln!(out, "{INDENT}{keyword}{{")?;
    write_block(out, &initializer.body, 2)?;
    writeln!(out, "{INDENT}}}")
}

fn write_block(out: &mut String, block: &Block, depth: usize) -> std::fmt::Result {
    let pad = INDENT.repeat(depth);
    for statement in block {
        match statement {
            Stmt::Expr { expr: e } => writeln!(out, "{pad}{};", expr(e))?,
            Stmt::Assign { target, value } => {
                writeln!(out, "{pad}{} = {};", expr(target), expr(value))?
            }
            Stmt::Local { ty, name, init } => match init {
                Some(init) => writeln!(out, "{pad}{ty} {name} = {};", expr(init))?,
                None => writeln!(out, "{pad}{ty} {name};")?,
            },
            Stmt::Return { value } => match value {
                Some(value) => writeln!(out, "{pad}return {};", expr(value))?,
                None => writeln!(out, "{pad}return;")?,
            },
            Stmt::If {
                condition,
                then,
                otherwise,
            } => {
                writeln!(out, "{pad}if ({}) {{", expr(condition))?;
                write_block(out, then, depth + 1)?;
                if otherwise.is_empty() {
                    writeln!(out, "{pad}}}")?;
                } else {
                    writeln!(out, "{pad}}} else {{")?;
                    write_block(out, otherwise, depth + 1)?;
                    writeln!(out, "{pad}}}")?;
                }
            }
            Stmt::Block { body } => {
                writeln!(out, "{pad}{{")?;
                write_block(out, body, depth + 1)?;
                writeln!(out, "{pad}}}")?;
            }
            Stmt::Opaque { text } => writeln!(out, "{pad}{text}")?,
        }
    }
    Ok(())
}

fn expr(expr: &Expr) -> String {
    match expr {
        Expr::Name { name } => name.clone(),
        Expr::This => "this".to_string(),
        Expr::Literal { text } | Expr::Opaque { text } => text.clone(),
        Expr::FieldAccess { target, name } => format!("{}.{name}", self::expr(target)),
        Expr::Call {
            receiver,
            name,
            arguments,
        } => match receiver {
            Some(receiver) => format!("{}.{name}({})", self::expr(receiver), arguments_of(arguments)),
            None => format!("{name}({})", arguments_of(arguments)),
        },
        Expr::New { ty, arguments } => format!("new {ty}({})", arguments_of(arguments)),
        Expr::Binary { op, left, right } => {
            format!("{} {op} {}", self::expr(left), self::expr(right))
        }
    }
}

fn arguments_of(arguments: &[Expr]) -> String {
    arguments.iter().map(expr).collect::<Vec<_>>().join(", ")
}

fn parameters(parameters: &[Parameter]) -> String {
    parameters
        .iter()
        .map(|p| {
            let annotations: String = p.annotations.iter().map(|a| format!("@{a} ")).collect();
            format!("{annotations}{} {}", p.ty, p.name)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn write_annotations(out: &mut String, annotations: &[Annotation], pad: &str) -> std::fmt::Result {
    for annotation in annotations {
        writeln!(out, "{pad}@{annotation}")?;
    }
    Ok(())
}

fn write_modifiers(out: &mut String, modifiers: &[Modifier]) -> std::fmt::Result {
    for modifier in modifiers {
        write!(out, "{modifier} ")?;
    }
    Ok(())
}

fn join<T: ToString>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
