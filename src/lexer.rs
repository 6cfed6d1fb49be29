use std::iter::Peekable;

use crate::token::{Span, Spanned, Token, TokenKind, KEYWORDS};

pub const SUGGESTED_TOKENS_CAPACITY: usize = 1_024;

type Result<T, E = Spanned<Error>> = std::result::Result<T, E>;

/// Lexes the provided string, producing the tokens into the provided buffer.
///
/// On success the buffer ends with a single [`TokenKind::Eof`] token. On
/// failure the buffer holds the tokens produced before the offending
/// character.
pub fn lex(src: &str, tokens: &mut Vec<Token>) -> Result<()> {
    Lexer::new(src, tokens).lex()
}

/// A convenience function that allocates a new buffer per lexed input and
/// returns it.
pub fn tokenize(src: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::with_capacity(SUGGESTED_TOKENS_CAPACITY);
    lex(src, &mut tokens)?;
    Ok(tokens)
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("unexpected character {0:?}")]
    UnexpectedChar(char),
    #[error("unclosed block comment")]
    UnclosedComment,
}

struct Lexer<'src, 'tok> {
    src: &'src str,
    iter: Peekable<std::str::Chars<'src>>,
    cursor: usize,
    current_lo: usize,
    tokens: &'tok mut Vec<Token>,
}

impl Lexer<'_, '_> {
    /// Scans the source string until the input is exhausted or a character
    /// can't be matched.
    fn lex(mut self) -> Result<()> {
        assert_eq!(self.tokens.len(), 0, "must pass clean tokens buffer");
        loop {
            // Trivia (whitespace and comments) produce no token.
            let Some(next) = self.scan_token_kind()? else {
                continue;
            };
            self.produce(next);
            if next == TokenKind::Eof {
                break Ok(());
            }
        }
    }

    /// Tries to scan the current character.
    fn scan_token_kind(&mut self) -> Result<Option<TokenKind>> {
        use TokenKind::*;
        let Some(c) = self.mark_advance() else {
            return Ok(Some(Eof));
        };
        let kind = match c {
            '=' => Assign,
            ';' => Semicolon,
            '(' => LParen,
            ')' => RParen,
            '{' => LBrace,
            '}' => RBrace,
            ',' => Comma,
            '/' => match self.peek() {
                Some('/') => return Ok(self.inline_comment()),
                Some('*') => return self.multiline_comment(),
                _ => return Err(self.span().wrap(Error::UnexpectedChar(c))),
            },
            c if c.is_ascii_digit() => self.number(),
            c if c.is_ascii_alphabetic() || c == '_' => self.identifier_or_keyword(),
            c if c.is_ascii_whitespace() => return Ok(self.whitespace()),
            c => return Err(self.span().wrap(Error::UnexpectedChar(c))),
        };
        Ok(Some(kind))
    }

    fn identifier_or_keyword(&mut self) -> TokenKind {
        let valid_identifier_suffix = |c: char| c.is_ascii_alphanumeric() || c == '_';

        while self.peek().is_some_and(valid_identifier_suffix) {
            self.advance();
        }
        // Keywords are case sensitive and only match whole words, which the
        // loop above guarantees.
        KEYWORDS
            .get(self.substr())
            .copied()
            .unwrap_or(TokenKind::Identifier)
    }

    fn number(&mut self) -> TokenKind {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        TokenKind::Number
    }

    fn whitespace(&mut self) -> Option<TokenKind> {
        while self.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            self.advance();
        }
        None
    }

    fn inline_comment(&mut self) -> Option<TokenKind> {
        while !matches!(self.peek(), Some('\n') | None) {
            self.advance();
        }
        None
    }

    fn multiline_comment(&mut self) -> Result<Option<TokenKind>> {
        self.advance(); // `*`
        loop {
            match self.advance() {
                Some('*') => (), // start closing comment
                Some(_) => continue,
                None => return Err(self.span().wrap(Error::UnclosedComment)),
            }
            // A run of stars may precede the closing slash.
            while self.peek() == Some('*') {
                self.advance();
            }
            match self.advance() {
                Some('/') => break Ok(None),
                Some(_) => continue,
                None => return Err(self.span().wrap(Error::UnclosedComment)),
            }
        }
    }
}

impl Lexer<'_, '_> {
    /// Constructs a new lexer with the default state.
    fn new<'src, 'tok>(src: &'src str, tokens: &'tok mut Vec<Token>) -> Lexer<'src, 'tok> {
        Lexer {
            src,
            iter: src.chars().peekable(),
            cursor: 0,
            current_lo: 0,
            tokens,
        }
    }

    /// Starts a new token "mark" and advances the iterator.
    fn mark_advance(&mut self) -> Option<char> {
        self.current_lo = self.cursor;
        self.advance()
    }

    /// Returns the next character and advances the iterator.
    fn advance(&mut self) -> Option<char> {
        self.iter.next().inspect(|c| self.cursor += c.len_utf8())
    }

    /// Returns the next character without advancing the iterator.
    fn peek(&mut self) -> Option<char> {
        self.iter.peek().copied()
    }

    /// Returns the current span.
    fn span(&self) -> Span {
        Span::new_of_bounds(self.current_lo..self.cursor)
    }

    /// Returns the substring of the current marked bounds.
    fn substr(&self) -> &str {
        self.span().substr(self.src)
    }

    /// Produces a token using the marked bounds.
    fn produce(&mut self, kind: TokenKind) {
        self.tokens.push(Token::new(kind, self.span()));
    }
}

/// Reads token values back from the source. The token must have been lexed
/// from that same source.
pub mod extract {
    use std::num::ParseIntError;

    use super::*;
    use crate::ast::Primitive;

    pub fn int(token: Token, src: &str) -> Result<i32, ParseIntError> {
        debug_assert_eq!(token.kind, TokenKind::Number);
        token.span().substr(src).parse()
    }

    pub fn ident(token: Token, src: &str) -> String {
        debug_assert_eq!(token.kind, TokenKind::Identifier);
        token.span().substr(src).to_owned()
    }

    pub fn primitive(token: Token, src: &str) -> Primitive {
        debug_assert_eq!(token.kind, TokenKind::Type);
        match Primitive::from_keyword(token.span().substr(src)) {
            Some(primitive) => primitive,
            None => unreachable!("type token is always a primitive keyword"),
        }
    }
}
