use std::fmt;

use crate::{
    ast::{Node, Param, Primitive},
    token::{Spanned, Token, TokenKind},
};

type Result<T, E = Spanned<Error>> = std::result::Result<T, E>;

/// Parses an already lexed token stream into a [`Node::Program`].
///
/// Parsing is strict: the first token that doesn't fit the grammar aborts
/// with an error, no partial tree is returned.
///
/// `tokens` must come from lexing `src`. A token whose text can't be read
/// back from `src` is reported as [`Error::ForeignToken`].
pub fn parse(src: &str, tokens: &[Token]) -> Result<Node> {
    Parser::new(src, tokens).parse_program()
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("expected {expected}, but got {actual}")]
    Unexpected {
        actual: TokenKind,
        expected: TokenKind,
    },
    #[error("expected one of {}, but got {actual}", OneOf(.expected))]
    UnexpectedAny {
        actual: TokenKind,
        expected: &'static [TokenKind],
    },
    #[error("integer literal out of range")]
    IntegerOutOfRange,
    #[error("token doesn't match the source text")]
    ForeignToken,
}

impl Error {
    /// The token kind that was found where the grammar expected something
    /// else, if any.
    pub fn found(&self) -> Option<TokenKind> {
        match self {
            Error::Unexpected { actual, .. } | Error::UnexpectedAny { actual, .. } => Some(*actual),
            Error::IntegerOutOfRange | Error::ForeignToken => None,
        }
    }
}

struct OneOf<'a>(&'a [TokenKind]);

impl fmt::Display for OneOf<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, kind) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{kind}")?;
        }
        Ok(())
    }
}

const STATEMENT_START: &[TokenKind] = &[
    TokenKind::Type,
    TokenKind::Identifier,
    TokenKind::Return,
    TokenKind::Semicolon,
    TokenKind::RBrace,
];

const EXPRESSION_START: &[TokenKind] = &[TokenKind::Number, TokenKind::Identifier];

struct Parser<'src, 'tok> {
    src: &'src str,
    tokens: &'tok [Token],
    cursor: usize,
}

impl Parser<'_, '_> {
    fn parse_program(&mut self) -> Result<Node> {
        let mut body = Vec::with_capacity(1);
        while !self.is(TokenKind::Eof) {
            body.push(self.parse_function()?);
        }
        self.consume(TokenKind::Eof)?;
        Ok(Node::Program { body })
    }

    fn parse_function(&mut self) -> Result<Node> {
        let return_type = self.parse_type()?;
        let name = self.parse_ident()?;

        self.consume(TokenKind::LParen)?;
        let params = self.parse_params()?;
        self.consume(TokenKind::RParen)?;

        self.consume(TokenKind::LBrace)?;
        let body = self.parse_block()?;
        self.consume(TokenKind::RBrace)?;

        Ok(Node::FunctionDeclaration {
            name,
            return_type,
            params,
            body,
        })
    }

    /// Parses `param (',' param)*` up to the closing parenthesis, which is
    /// **not** consumed.
    fn parse_params(&mut self) -> Result<Vec<Param>> {
        let mut params = Vec::new();
        if self.is(TokenKind::RParen) {
            return Ok(params);
        }
        loop {
            let datatype = self.parse_type()?;
            let name = self.parse_ident()?;
            params.push(Param { datatype, name });
            if !self.take(TokenKind::Comma) {
                break;
            }
        }
        Ok(params)
    }

    /// Parses statements until the closing brace, which is **not** consumed.
    fn parse_block(&mut self) -> Result<Vec<Node>> {
        let mut body = Vec::new();
        while !self.is(TokenKind::RBrace) {
            if let Some(statement) = self.parse_statement()? {
                body.push(statement);
            }
        }
        Ok(body)
    }

    /// Returns `None` for the empty statement.
    fn parse_statement(&mut self) -> Result<Option<Node>> {
        let statement = match self.peek().kind {
            TokenKind::Type => self.parse_variable_declaration()?,
            TokenKind::Identifier => self.parse_assignment()?,
            TokenKind::Return => self.parse_return()?,
            TokenKind::Semicolon => {
                self.advance();
                return Ok(None);
            }
            _ => return Err(self.unexpected_any(STATEMENT_START)),
        };
        Ok(Some(statement))
    }

    fn parse_variable_declaration(&mut self) -> Result<Node> {
        let datatype = self.parse_type()?;
        let name = self.parse_ident()?;
        self.consume(TokenKind::Semicolon)?;
        Ok(Node::VariableDeclaration { datatype, name })
    }

    fn parse_assignment(&mut self) -> Result<Node> {
        let target = self.parse_ident()?;
        self.consume(TokenKind::Assign)?;
        let value = self.parse_expr()?;
        self.consume(TokenKind::Semicolon)?;
        Ok(Node::assign(target, value))
    }

    fn parse_return(&mut self) -> Result<Node> {
        self.consume(TokenKind::Return)?;
        let argument = self.parse_expr()?;
        self.consume(TokenKind::Semicolon)?;
        Ok(Node::ret(argument))
    }

    fn parse_expr(&mut self) -> Result<Node> {
        let token = self.peek();
        match token.kind {
            TokenKind::Number => {
                self.advance();
                let Ok(value) = self.lexeme(token)?.parse() else {
                    return Err(token.span().wrap(Error::IntegerOutOfRange));
                };
                Ok(Node::literal(value))
            }
            TokenKind::Identifier => {
                self.advance();
                Ok(Node::ident(self.lexeme(token)?))
            }
            _ => Err(self.unexpected_any(EXPRESSION_START)),
        }
    }

    fn parse_type(&mut self) -> Result<Primitive> {
        let token = self.consume(TokenKind::Type)?;
        Primitive::from_keyword(self.lexeme(token)?)
            .ok_or_else(|| token.span().wrap(Error::ForeignToken))
    }

    fn parse_ident(&mut self) -> Result<String> {
        let token = self.consume(TokenKind::Identifier)?;
        Ok(self.lexeme(token)?.to_owned())
    }
}

impl Parser<'_, '_> {
    fn new<'src, 'tok>(src: &'src str, tokens: &'tok [Token]) -> Parser<'src, 'tok> {
        Parser {
            src,
            tokens,
            cursor: 0,
        }
    }

    /// Returns the current token.
    ///
    /// A stream that lacks its terminal sentinel reads as if it had one.
    #[inline]
    fn peek(&self) -> Token {
        match self.tokens.get(self.cursor) {
            Some(token) => *token,
            None => Token::eof_for(self.src),
        }
    }

    /// Reads back the text of a token.
    fn lexeme(&self, token: Token) -> Result<&str> {
        let span = token.span();
        self.src
            .get(span.lo..span.hi())
            .ok_or_else(|| span.wrap(Error::ForeignToken))
    }

    /// Returns the current token and advances. Never moves past the end.
    fn advance(&mut self) -> Token {
        let c = self.peek();
        if self.cursor < self.tokens.len() {
            self.cursor += 1;
        }
        c
    }

    /// Checks whether the current token matches the given one.
    fn is(&self, expect: TokenKind) -> bool {
        self.peek().kind == expect
    }

    /// Advances if the current token matches the provided one, returning true.
    /// If not, returns false and doesn't advance.
    fn take(&mut self, expect: TokenKind) -> bool {
        if self.is(expect) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Advances if the current token matches the provided one, returning it.
    /// If not, fails without advancing.
    fn consume(&mut self, expect: TokenKind) -> Result<Token> {
        let c = self.peek();
        if c.kind == expect {
            Ok(self.advance())
        } else {
            Err(c.span().wrap(Error::Unexpected {
                actual: c.kind,
                expected: expect,
            }))
        }
    }

    fn unexpected_any(&self, expected: &'static [TokenKind]) -> Spanned<Error> {
        let c = self.peek();
        c.span().wrap(Error::UnexpectedAny {
            actual: c.kind,
            expected,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{lexer, util::test_utils::tree_tests};

    fn parse_str(src: &str) -> Result<Node> {
        let tokens = lexer::tokenize(src).expect("input should lex");
        parse(src, &tokens)
    }

    #[test]
    fn test_main_structure() {
        let program = parse_str("int main(){int a;a=5;return a;}").unwrap();
        assert_eq!(
            program,
            Node::Program {
                body: vec![Node::FunctionDeclaration {
                    name: "main".to_owned(),
                    return_type: Primitive::Int,
                    params: vec![],
                    body: vec![
                        Node::VariableDeclaration {
                            datatype: Primitive::Int,
                            name: "a".to_owned(),
                        },
                        Node::assign("a", Node::literal(5)),
                        Node::ret(Node::ident("a")),
                    ],
                }],
            }
        );
    }

    #[test]
    fn test_missing_identifier_is_strict() {
        let error = parse_str("int ;").unwrap_err();
        assert_eq!(
            error.inner,
            Error::Unexpected {
                actual: TokenKind::Semicolon,
                expected: TokenKind::Identifier,
            }
        );
        assert_eq!(error.span.lo, 4);
        assert_eq!(error.inner.found(), Some(TokenKind::Semicolon));
    }

    #[test]
    fn test_tokens_from_another_source() {
        let tokens = lexer::tokenize("int main() { return 1; }").unwrap();
        let error = parse("", &tokens).unwrap_err();
        assert_eq!(error.inner, Error::ForeignToken);
        assert_eq!(error.span.lo, 0);
        assert_eq!(error.inner.found(), None);

        // In bounds, but the `TYPE` token now covers `abc`.
        let error = parse("abc main() { return 1; }", &tokens).unwrap_err();
        assert_eq!(error.inner, Error::ForeignToken);
        assert_eq!(error.to_string(), "token doesn't match the source text");
    }

    #[test]
    fn test_stream_without_sentinel() {
        let src = "void f() {}";
        let mut tokens = lexer::tokenize(src).unwrap();
        tokens.pop();
        assert!(matches!(parse(src, &tokens), Ok(Node::Program { body }) if body.len() == 1));
    }

    tree_tests!(
        use parser;

        fn test_empty_program() {
            let program = "";
            let tree_ok = "program";
        }

        fn test_comments_only_program() {
            let program = "
                // nothing here
                /* nor here */
            ";
            let tree_ok = "program";
        }

        fn test_function_no_params() {
            let program = "int main() { int a; a = 5; return a; }";
            let tree_ok = "
                program
                  function main() : int
                    declare a: int
                    assign
                      ident a
                      literal 5
                    return
                      ident a
            ";
        }

        fn test_function_one_param() {
            let program = "void show(int x) { return x; }";
            let tree_ok = "
                program
                  function show(x: int) : void
                    return
                      ident x
            ";
        }

        fn test_function_multiple_params() {
            let program = "float mix(int a, float b, int c) { b = a; return b; }";
            let tree_ok = "
                program
                  function mix(a: int, b: float, c: int) : float
                    assign
                      ident b
                      ident a
                    return
                      ident b
            ";
        }

        fn test_empty_statements_are_dropped() {
            let program = "int main() { ; int a;; ; a = 1; }";
            let tree_ok = "
                program
                  function main() : int
                    declare a: int
                    assign
                      ident a
                      literal 1
            ";
        }

        fn test_empty_body() {
            let program = "void nothing() {}";
            let tree_ok = "
                program
                  function nothing() : void
            ";
        }

        fn test_multiple_functions() {
            let program = "
                int first() { return 1; }
                void second(int n) { int m; m = n; }
            ";
            let tree_ok = "
                program
                  function first() : int
                    return
                      literal 1
                  function second(n: int) : void
                    declare m: int
                    assign
                      ident m
                      ident n
            ";
        }

        fn test_error_missing_variable_name() {
            let program = "int main() { int ; }";
            let expected_errors = &["17..18: expected ID, but got SEMICOLON"];
        }

        fn test_error_missing_return_type() {
            let program = "main() {}";
            let expected_errors = &["0..4: expected TYPE, but got ID"];
        }

        fn test_error_missing_semicolon() {
            let program = "int main() { int a a = 1; }";
            let expected_errors = &["19..20: expected SEMICOLON, but got ID"];
        }

        fn test_error_missing_expression() {
            let program = "int main() { a = ; }";
            let expected_errors = &["17..18: expected one of NUMBER, ID, but got SEMICOLON"];
        }

        fn test_error_return_without_value() {
            let program = "void main() { return; }";
            let expected_errors = &["20..21: expected one of NUMBER, ID, but got SEMICOLON"];
        }

        fn test_error_unexpected_statement() {
            let program = "int main() { 5; }";
            let expected_errors =
                &["13..14: expected one of TYPE, ID, RETURN, SEMICOLON, RBRACE, but got NUMBER"];
        }

        fn test_error_unclosed_body() {
            let program = "int main() { int a;";
            let expected_errors =
                &["19..19: expected one of TYPE, ID, RETURN, SEMICOLON, RBRACE, but got EOF"];
        }

        fn test_error_trailing_comma_in_params() {
            let program = "int f(int a,) {}";
            let expected_errors = &["12..13: expected TYPE, but got RPAREN"];
        }

        fn test_error_missing_comma_in_params() {
            let program = "int f(int a int b) {}";
            let expected_errors = &["12..15: expected RPAREN, but got TYPE"];
        }

        fn test_error_integer_out_of_range() {
            let program = "int main() { a = 99999999999999999999; }";
            let expected_errors = &["17..37: integer literal out of range"];
        }

        fn test_largest_integer_literal() {
            let program = "int main() { a = 2147483647; }";
            let tree_ok = "
                program
                  function main() : int
                    assign
                      ident a
                      literal 2147483647
            ";
        }

        fn test_error_integer_past_java_int() {
            let program = "int main() { a = 2147483648; }";
            let expected_errors = &["17..27: integer literal out of range"];
        }

        fn test_error_lexical_error_is_reported_first() {
            let program = "int main() { a = 5$; }";
            let expected_errors = &["18..19: unexpected character '$'"];
        }
    );
}
