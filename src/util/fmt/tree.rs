use std::io::Write;

use crate::ast::{Node, Param};

const INDENT_WIDTH: usize = 2;

pub fn print_tree_string(node: &Node) -> String {
    let mut buf = Vec::with_capacity(512);
    print_tree(&mut buf, 0, node).expect("writing to a vec is infallible");
    String::from_utf8(buf).expect("tree output is utf-8")
}

pub fn print_tree(w: &mut impl Write, i: usize, node: &Node) -> std::io::Result<()> {
    sp(w, i)?;
    match node {
        Node::Program { body } => {
            writeln!(w, "program")?;
            for function in body {
                print_tree(w, i + 1, function)?;
            }
        }
        Node::FunctionDeclaration {
            name,
            return_type,
            params,
            body,
        } => {
            write!(w, "function {name}(")?;
            print_params(w, params)?;
            writeln!(w, ") : {return_type}")?;
            for statement in body {
                print_tree(w, i + 1, statement)?;
            }
        }
        Node::VariableDeclaration { datatype, name } => {
            writeln!(w, "declare {name}: {datatype}")?;
        }
        Node::AssignmentExpression { left, right } => {
            writeln!(w, "assign")?;
            print_tree(w, i + 1, left)?;
            print_tree(w, i + 1, right)?;
        }
        Node::ReturnStatement { argument } => {
            writeln!(w, "return")?;
            print_tree(w, i + 1, argument)?;
        }
        Node::Identifier { name } => {
            writeln!(w, "ident {name}")?;
        }
        Node::Literal { value } => {
            writeln!(w, "literal {value}")?;
        }
    }
    Ok(())
}

fn print_params(w: &mut impl Write, params: &[Param]) -> std::io::Result<()> {
    for (idx, param) in params.iter().enumerate() {
        if idx > 0 {
            write!(w, ", ")?;
        }
        write!(w, "{}: {}", param.name, param.datatype)?;
    }
    Ok(())
}

fn sp(w: &mut impl Write, i: usize) -> std::io::Result<()> {
    write!(w, "{:width$}", "", width = i * INDENT_WIDTH)
}
