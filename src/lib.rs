/// The lexer takes the source input, mapping it into a sequence of tokens.
pub mod lexer;

/// The parser takes a sequence of tokens, mapping it into an AST.
pub mod parser;

/// The checker walks the AST before code generation. It's the home of
/// semantic checks, though none rejects a program yet.
pub mod checker;

/// The code generator lowers a checked AST into Java source.
pub mod codegen;

pub mod ast;
pub mod classify;
pub mod driver;
pub mod token;

pub mod util {
    pub mod fmt;
    #[cfg(test)]
    pub(crate) mod test_utils;
}

use crate::{ast::Node, checker::Checker, token::Spanned};

/// Any error that stops a translation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("{0:#}")]
    Lexical(#[from] Spanned<lexer::Error>),
    #[error("{0:#}")]
    Syntax(#[from] Spanned<parser::Error>),
    #[error(transparent)]
    Codegen(#[from] codegen::Error),
}

/// Lexes and parses `src`.
pub fn parse_program(src: &str) -> Result<Node, Error> {
    let tokens = lexer::tokenize(src)?;
    Ok(parser::parse(src, &tokens)?)
}

/// Runs the whole pipeline over `src`, returning the generated Java source.
pub fn translate(src: &str, options: &codegen::Options) -> Result<String, Error> {
    let program = parse_program(src)?;
    let (program, _) = Checker::new().check(program);
    Ok(codegen::generate(&program, options)?)
}
