//! A lexeme listing for diagnostics: groups every token of a source by its
//! lexical class and prints one line per lexeme.

use std::fmt::{self, Write};

use crate::token::{Token, TokenKind};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Class {
    ReservedWord,
    Operator,
    Number,
    Delimiter,
    Identifier,
}

impl Class {
    /// Report order.
    pub const ALL: &[Class] = &[
        Class::ReservedWord,
        Class::Operator,
        Class::Number,
        Class::Delimiter,
        Class::Identifier,
    ];

    pub fn of(kind: TokenKind) -> Option<Class> {
        let class = match kind {
            TokenKind::Type | TokenKind::Return => Class::ReservedWord,
            TokenKind::Assign => Class::Operator,
            TokenKind::Number => Class::Number,
            TokenKind::Semicolon
            | TokenKind::LParen
            | TokenKind::RParen
            | TokenKind::LBrace
            | TokenKind::RBrace
            | TokenKind::Comma => Class::Delimiter,
            TokenKind::Identifier => Class::Identifier,
            TokenKind::Eof => return None,
        };
        Some(class)
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Class::ReservedWord => "reserved word",
            Class::Operator => "operator",
            Class::Number => "number",
            Class::Delimiter => "delimiter",
            Class::Identifier => "identifier",
        })
    }
}

/// Groups the lexemes of `tokens` by class, in [`Class::ALL`] order. Lexemes
/// keep their source order within a group.
pub fn classify<'src>(src: &'src str, tokens: &[Token]) -> Vec<(Class, Vec<&'src str>)> {
    Class::ALL
        .iter()
        .map(|&class| {
            let lexemes = tokens
                .iter()
                .filter(|token| Class::of(token.kind) == Some(class))
                .map(|token| token.span().substr(src))
                .collect();
            (class, lexemes)
        })
        .collect()
}

/// Renders the classification, one `'<lexeme>' is a <class>.` line per
/// lexeme, or `None Found: <class>` for a class without lexemes.
pub fn report(src: &str, tokens: &[Token]) -> String {
    let mut out = String::new();
    for (class, lexemes) in classify(src, tokens) {
        if lexemes.is_empty() {
            _ = writeln!(out, "None Found: {class}");
        }
        for lexeme in lexemes {
            _ = writeln!(out, "'{lexeme}' is a {class}.");
        }
    }
    out
}
