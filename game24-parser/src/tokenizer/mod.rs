pub mod token;

use crate::parser::error::InvalidCharacter;
use game24_error::Error;
use logos::{Lexer, Logos};
use std::ops::Range;
pub use token::{Token, TokenKind};

/// Returns an iterator over the token kinds produced by the tokenizer.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// A stream of tokens over a source string, skipping whitespace, with room to push back one token
/// that was read ahead.
pub struct Tokenizer<'source> {
    /// The underlying lexer.
    lexer: Lexer<'source, TokenKind>,

    /// A token that was read ahead and pushed back, to be returned by the next read.
    buffer: Option<Token<'source>>,
}

impl<'source> Tokenizer<'source> {
    /// Creates a new tokenizer over the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            lexer: tokenize(source),
            buffer: None,
        }
    }

    /// Returns the full source this tokenizer reads from.
    pub fn source(&self) -> &'source str {
        self.lexer.source()
    }

    /// Returns the source starting at the given byte offset, used to show the unconsumed input in
    /// errors.
    pub fn remainder_from(&self, start: usize) -> &'source str {
        &self.source()[start..]
    }

    /// Returns an empty span pointing at the end of the source.
    pub fn eof_span(&self) -> Range<usize> {
        let len = self.source().len();
        len..len
    }

    /// Returns the next token, then advances past it. Whitespace tokens are skipped.
    ///
    /// Returns [`None`] at the end of the source, and an error if the next character cannot start
    /// any token.
    pub fn next_token(&mut self) -> Result<Option<Token<'source>>, Error> {
        if let Some(token) = self.buffer.take() {
            return Ok(Some(token));
        }

        while let Some(kind) = self.lexer.next() {
            let span = self.lexer.span();
            match kind {
                Ok(kind) if kind.is_whitespace() => continue,
                Ok(TokenKind::Symbol) | Err(()) => {
                    let character = self.lexer.slice().chars().next().unwrap_or_default();
                    return Err(Error::new(vec![span.clone()], InvalidCharacter {
                        character,
                        remainder: self.remainder_from(span.start).to_owned(),
                    }));
                },
                Ok(kind) => return Ok(Some(Token {
                    span,
                    kind,
                    lexeme: self.lexer.slice(),
                })),
            }
        }

        Ok(None)
    }

    /// Pushes a token back onto the stream, so that it is returned by the next read. Only one
    /// token can be pushed back at a time.
    pub fn push_back(&mut self, token: Token<'source>) {
        debug_assert!(self.buffer.is_none(), "only one token can be pushed back");
        self.buffer = Some(token);
    }

    /// Returns the next token without consuming it.
    pub fn peek(&mut self) -> Result<Option<Token<'source>>, Error> {
        let token = self.next_token()?;
        if let Some(token) = &token {
            self.push_back(token.clone());
        }
        Ok(token)
    }
}
