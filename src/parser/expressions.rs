//! Expression parsing
//!
//! ```text
//! Expression -> Number | Identifier
//! ```
//!
//! There are no operators, so an expression is always exactly one token.

use crate::parser::ast::Expression;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{Expected, ParseError, Parser, TokenSource};

impl<I: TokenSource> Parser<I> {
    pub(crate) fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        match self.peek_kind() {
            TokenKind::Number => Ok(Expression::NumberLiteral(self.advance()?.lexeme)),
            TokenKind::Identifier => Ok(Expression::IdentifierRef(self.advance()?.lexeme)),
            _ => Err(self.unexpected(Expected::Expression)),
        }
    }
}
