pub mod error;

use error::{
    DivisionByZero,
    EmptyParenthesis,
    InvalidCharacter,
    MissingOperand,
    MissingOperator,
    UnclosedParenthesis,
};
use game24_compute::{primitive::int_from_str, Expr, OpClass};
use game24_error::{Error, ErrorKind};
use log::{debug, trace};
use super::tokenizer::{Token, TokenKind, Tokenizer};
use std::ops::Range;

/// A recursive-descent parser for solutions to the 24 game.
///
/// There are two levels of precedence: sums bind looser than products, and parentheses reset
/// precedence. Each level reads an operand, then an operator, and so on until it reaches a token
/// that belongs to an enclosing level. The token that ends a level is pushed back onto the
/// tokenizer for the enclosing level to read.
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Tokenizer<'source>,

    /// The number of parentheses the parser is currently inside.
    depth: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: Tokenizer::new(source),
            depth: 0,
        }
    }

    /// Creates an error pointing at the given span.
    fn error(&self, span: Range<usize>, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![span], kind)
    }

    /// Returns the unconsumed input, starting at the given span.
    fn remainder(&self, span: &Range<usize>) -> String {
        self.tokens.remainder_from(span.start).to_owned()
    }

    /// Parses the whole source as one expression.
    pub fn try_parse_full(&mut self) -> Result<Expr, Error> {
        let expr = self.parse_sum()?;

        // a sum only stops at a closing parenthesis or the end of the input
        match self.tokens.next_token()? {
            None => Ok(expr),
            Some(token) => Err(self.error(token.span.clone(), UnclosedParenthesis {
                opening: false,
                remainder: self.remainder(&token.span),
            })),
        }
    }

    /// Parses a sum of one or more products, with an optional leading `+`.
    fn parse_sum(&mut self) -> Result<Expr, Error> {
        if let Some(token) = self.tokens.next_token()? {
            if token.kind != TokenKind::Add {
                self.tokens.push_back(token);
            }
        }

        let (mut expr, _) = self.parse_product()?;
        while let Some(token) = self.tokens.next_token()? {
            let reverse = match token.kind {
                TokenKind::Add => false,
                TokenKind::Sub => true,
                TokenKind::Int | TokenKind::OpenParen => {
                    return Err(self.error(token.span.clone(), MissingOperator {
                        remainder: self.remainder(&token.span),
                    }));
                },
                _ => {
                    self.tokens.push_back(token);
                    break;
                },
            };

            let (rhs, _) = self.parse_product()?;
            expr = expr.join(OpClass::Additive, rhs, reverse);
        }

        Ok(expr)
    }

    /// Parses a product of one or more operands, returning it along with its span.
    fn parse_product(&mut self) -> Result<(Expr, Range<usize>), Error> {
        let (mut expr, mut span) = self.parse_operand()?;
        while let Some(token) = self.tokens.next_token()? {
            let reverse = match token.kind {
                TokenKind::Mul => false,
                TokenKind::Div => true,
                _ => {
                    self.tokens.push_back(token);
                    break;
                },
            };

            let (rhs, rhs_span) = self.parse_operand()?;
            expr = expr.join(OpClass::Multiplicative, rhs, reverse);
            if expr.value().is_none() {
                return Err(self.error(rhs_span.clone(), DivisionByZero {
                    remainder: self.remainder(&rhs_span),
                }));
            }
            span = span.start..rhs_span.end;
        }

        Ok((expr, span))
    }

    /// Parses a number or a parenthesized expression, returning it along with its span.
    fn parse_operand(&mut self) -> Result<(Expr, Range<usize>), Error> {
        let Some(token) = self.tokens.next_token()? else {
            return Err(self.error(self.tokens.eof_span(), MissingOperand {
                remainder: String::new(),
            }));
        };

        match token.kind {
            TokenKind::Int => match int_from_str(token.lexeme) {
                Ok(int) => Ok((Expr::number(int), token.span)),
                Err(_) => Err(self.error(token.span.clone(), InvalidCharacter {
                    character: token.lexeme.chars().next().unwrap_or_default(),
                    remainder: self.remainder(&token.span),
                })),
            },
            TokenKind::OpenParen => self.parse_paren(token),
            TokenKind::CloseParen if self.depth == 0 => {
                Err(self.error(token.span.clone(), UnclosedParenthesis {
                    opening: false,
                    remainder: self.remainder(&token.span),
                }))
            },
            _ => Err(self.error(token.span.clone(), MissingOperand {
                remainder: self.remainder(&token.span),
            })),
        }
    }

    /// Parses the inside of a parenthesized expression, after its opening parenthesis.
    fn parse_paren(&mut self, open: Token<'source>) -> Result<(Expr, Range<usize>), Error> {
        if let Some(close) = self.tokens.peek()? {
            if close.kind == TokenKind::CloseParen {
                return Err(self.error(open.span.start..close.span.end, EmptyParenthesis {
                    remainder: self.remainder(&open.span),
                }));
            }
        }

        self.depth += 1;
        let expr = self.parse_sum()?;
        self.depth -= 1;

        match self.tokens.next_token()? {
            Some(close) if close.kind == TokenKind::CloseParen => {
                Ok((expr, open.span.start..close.span.end))
            },
            _ => Err(self.error(open.span.clone(), UnclosedParenthesis {
                opening: true,
                remainder: self.remainder(&open.span),
            })),
        }
    }
}

/// Parses a solution into its canonical [`Expr`].
///
/// Operators are applied as written: `3 - 5` is `-2`, even though the solver itself never
/// subtracts a larger value from a smaller one.
pub fn parse(source: &str) -> Result<Expr, Error> {
    let result = Parser::new(source).try_parse_full();
    match &result {
        Ok(expr) => debug!("parsed `{}` as `{}`", source, expr),
        Err(err) => trace!("failed to parse `{}`: {:?}", source, err.kind),
    }
    result
}
