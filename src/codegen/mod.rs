use std::{
    fmt::{self, Write},
    format_args as f,
};

use crate::ast::{Node, NodeKind, Param};

#[cfg(test)]
mod tests;

const DEFAULT_CODE_CAPACITY: usize = 4 * 1024; // 4 KiB
const INDENT_WIDTH: usize = 4;

pub const DEFAULT_CLASS_NAME: &str = "MainClass";

/// Lowers `node` into Java source text.
///
/// A [`Node::Program`] becomes a public class holding one static method per
/// function. Any other node is lowered on its own, which is mostly useful to
/// inspect the output for a single statement or expression.
pub fn generate(node: &Node, options: &Options) -> Result<String, Error> {
    CodeGen::new(options).gen(node)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// Name of the wrapping class. The generated file must be named after it.
    pub class_name: String,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            class_name: DEFAULT_CLASS_NAME.to_owned(),
        }
    }
}

/// A node that can't appear where it was found.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind} is not allowed {place}")]
pub struct Error {
    pub kind: NodeKind,
    pub place: Place,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Place {
    ProgramBody,
    FunctionBody,
    Expression,
    AssignmentTarget,
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Place::ProgramBody => "at the top level of a program",
            Place::FunctionBody => "as a statement",
            Place::Expression => "in expression position",
            Place::AssignmentTarget => "as an assignment target",
        })
    }
}

/// Picks a name for the `String[]` parameter of `main` that doesn't clash
/// with any name in its body.
fn args_name(body: &[Node]) -> String {
    let mut name = "args".to_owned();
    while body.iter().any(|node| mentions(node, &name)) {
        name.push('_');
    }
    name
}

fn mentions(node: &Node, name: &str) -> bool {
    match node {
        Node::Program { body } => body.iter().any(|node| mentions(node, name)),
        Node::FunctionDeclaration {
            name: function,
            params,
            body,
            ..
        } => {
            function == name
                || params.iter().any(|param| param.name == name)
                || body.iter().any(|node| mentions(node, name))
        }
        Node::VariableDeclaration { name: declared, .. } => declared == name,
        Node::AssignmentExpression { left, right } => {
            mentions(left, name) || mentions(right, name)
        }
        Node::ReturnStatement { argument } => mentions(argument, name),
        Node::Identifier { name: ident } => ident == name,
        Node::Literal { .. } => false,
    }
}

fn misplaced(node: &Node, place: Place) -> Error {
    Error {
        kind: node.kind(),
        place,
    }
}

pub struct CodeGen<'o> {
    code: String,
    options: &'o Options,
    depth: usize,
}

impl CodeGen<'_> {
    pub fn new(options: &Options) -> CodeGen<'_> {
        CodeGen {
            code: String::with_capacity(DEFAULT_CODE_CAPACITY),
            options,
            depth: 0,
        }
    }

    pub fn gen(mut self, node: &Node) -> Result<String, Error> {
        match node {
            Node::Program { body } => self.gen_program(body)?,
            Node::FunctionDeclaration {
                name, params, body, ..
            } => self.gen_function(name, params, body)?,
            Node::VariableDeclaration { .. }
            | Node::AssignmentExpression { .. }
            | Node::ReturnStatement { .. } => self.gen_statement(node)?,
            Node::Identifier { .. } | Node::Literal { .. } => {
                let expr = Self::gen_expr(node)?;
                self.emit(f!("{expr}"));
            }
        }
        Ok(self.code)
    }

    fn gen_program(&mut self, functions: &[Node]) -> Result<(), Error> {
        let options = self.options;
        self.line(f!("public class {} {{", options.class_name));
        self.indented(|this| {
            for function in functions {
                let Node::FunctionDeclaration {
                    name, params, body, ..
                } = function
                else {
                    return Err(misplaced(function, Place::ProgramBody));
                };
                this.gen_function(name, params, body)?;
            }
            Ok(())
        })?;
        self.line(f!("}}"));
        Ok(())
    }

    /// Every `return` lowers to a bare `return;`, so methods are always
    /// `void`, whatever the declared return type.
    fn gen_function(&mut self, name: &str, params: &[Param], body: &[Node]) -> Result<(), Error> {
        let params = if name == "main" && params.is_empty() {
            // The JVM only launches `main(String[])`.
            format!("String[] {}", args_name(body))
        } else {
            params
                .iter()
                .map(|param| format!("{} {}", param.datatype, param.name))
                .collect::<Vec<_>>()
                .join(", ")
        };

        self.line(f!("public static void {name}({params}) {{"));
        self.indented(|this| body.iter().try_for_each(|stmt| this.gen_statement(stmt)))?;
        self.line(f!("}}"));
        Ok(())
    }

    fn gen_statement(&mut self, node: &Node) -> Result<(), Error> {
        match node {
            Node::VariableDeclaration { datatype, name } => {
                self.line(f!("{datatype} {name};"));
            }
            Node::AssignmentExpression { left, right } => {
                let Node::Identifier { name: left } = left.as_ref() else {
                    return Err(misplaced(left, Place::AssignmentTarget));
                };
                let right = Self::gen_expr(right)?;
                self.line(f!("{left} = {right};"));
            }
            // Returning a value prints it, then returns nothing.
            Node::ReturnStatement { argument } => {
                let argument = Self::gen_expr(argument)?;
                self.line(f!("System.out.println({argument});"));
                self.line(f!("return;"));
            }
            other => return Err(misplaced(other, Place::FunctionBody)),
        }
        Ok(())
    }

    fn gen_expr(node: &Node) -> Result<String, Error> {
        match node {
            Node::Identifier { name } => Ok(name.clone()),
            Node::Literal { value } => Ok(value.to_string()),
            other => Err(misplaced(other, Place::Expression)),
        }
    }
}

// Utility functions.
impl CodeGen<'_> {
    fn emit(&mut self, f: fmt::Arguments<'_>) {
        self.code
            .write_fmt(f)
            .expect("code emit should be infallible");
    }

    /// Emits a whole line at the current indentation.
    fn line(&mut self, f: fmt::Arguments<'_>) {
        let width = self.depth * INDENT_WIDTH;
        self.emit(f!("{:width$}{f}\n", ""));
    }

    fn indented<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}
