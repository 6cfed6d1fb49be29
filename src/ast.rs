// program  ::= function* EOF
// function ::= TYPE ID '(' [param (',' param)*] ')' '{' stmt* '}'
// param    ::= TYPE ID
// stmt     ::= TYPE ID ';'
//            | ID '=' expr ';'
//            | return expr ';'
//            | ';'
// expr     ::= NUMBER
//            | ID

use std::fmt;

/// A syntax tree node. Children are owned exclusively by their parent.
///
/// The parser only builds well-formed trees (a `Program` holds functions, an
/// assignment target is an `Identifier`, and so on). Since the type admits
/// other shapes, consumers that care about placement validate it themselves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Program {
        body: Vec<Node>,
    },
    FunctionDeclaration {
        name: String,
        return_type: Primitive,
        params: Vec<Param>,
        body: Vec<Node>,
    },
    VariableDeclaration {
        datatype: Primitive,
        name: String,
    },
    AssignmentExpression {
        left: Box<Node>,
        right: Box<Node>,
    },
    ReturnStatement {
        argument: Box<Node>,
    },
    Identifier {
        name: String,
    },
    /// Integer literals have the range of a Java `int`.
    Literal {
        value: i32,
    },
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Program { .. } => NodeKind::Program,
            Node::FunctionDeclaration { .. } => NodeKind::FunctionDeclaration,
            Node::VariableDeclaration { .. } => NodeKind::VariableDeclaration,
            Node::AssignmentExpression { .. } => NodeKind::AssignmentExpression,
            Node::ReturnStatement { .. } => NodeKind::ReturnStatement,
            Node::Identifier { .. } => NodeKind::Identifier,
            Node::Literal { .. } => NodeKind::Literal,
        }
    }

    pub fn ident(name: impl Into<String>) -> Node {
        Node::Identifier { name: name.into() }
    }

    pub fn literal(value: i32) -> Node {
        Node::Literal { value }
    }

    pub fn assign(target: impl Into<String>, value: Node) -> Node {
        Node::AssignmentExpression {
            left: Box::new(Node::ident(target)),
            right: Box::new(value),
        }
    }

    pub fn ret(argument: Node) -> Node {
        Node::ReturnStatement {
            argument: Box::new(argument),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Program,
    FunctionDeclaration,
    VariableDeclaration,
    AssignmentExpression,
    ReturnStatement,
    Identifier,
    Literal,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    pub datatype: Primitive,
    pub name: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Primitive {
    Int,
    /// Accepted as a declared type only; there are no float literals.
    Float,
    Void,
}

impl Primitive {
    pub fn from_keyword(keyword: &str) -> Option<Primitive> {
        match keyword {
            "int" => Some(Primitive::Int),
            "float" => Some(Primitive::Float),
            "void" => Some(Primitive::Void),
            _ => None,
        }
    }

    pub const fn keyword(self) -> &'static str {
        match self {
            Primitive::Int => "int",
            Primitive::Float => "float",
            Primitive::Void => "void",
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
