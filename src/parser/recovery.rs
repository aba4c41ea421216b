//! Panic-mode error recovery
//!
//! Only active inside [`Parser::parse_program_recovering`]. A syntax error in a
//! declaration list is recorded, then tokens are skipped up to a point where a
//! fresh declaration can start:
//!
//! - just past a `;`
//! - just past the `}` matching a `{` that was itself skipped, so a body whose
//!   header was malformed is skipped whole
//! - just past a stray `}` at top level, or just before a `}` that closes an
//!   open function body
//! - before a type keyword, once at least one token has been skipped
//! - end of input
//!
//! Lexical errors are not recoverable because the lexer stops at the first one.

use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser, TokenSource};

impl<I: TokenSource> Parser<I> {
    /// Either propagate `err` (strict mode) or record it and resynchronize.
    pub(crate) fn recover(&mut self, err: ParseError) -> Result<(), ParseError> {
        if matches!(err, ParseError::Lexical(_)) {
            return Err(err);
        }
        match self.diagnostics.as_mut() {
            Some(diagnostics) => diagnostics.push(err),
            None => return Err(err),
        }
        self.synchronize()
    }

    fn synchronize(&mut self) -> Result<(), ParseError> {
        let mut skipped = false;
        // `{` consumed by this skip and not yet closed
        let mut braces = 0usize;

        loop {
            match self.peek_kind() {
                TokenKind::Eof => return Ok(()),
                TokenKind::LBrace => {
                    self.advance()?;
                    braces += 1;
                    skipped = true;
                }
                TokenKind::RBrace if braces > 0 => {
                    self.advance()?;
                    braces -= 1;
                    if braces == 0 {
                        return Ok(());
                    }
                }
                TokenKind::Semicolon if braces == 0 => {
                    self.advance()?;
                    return Ok(());
                }
                TokenKind::RBrace => {
                    if self.depth == 0 {
                        self.advance()?;
                    }
                    return Ok(());
                }
                kind if kind.is_type_keyword() && skipped && braces == 0 => return Ok(()),
                _ => {
                    self.advance()?;
                    skipped = true;
                }
            }
        }
    }
}
