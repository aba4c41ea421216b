//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, and the main parse entry points.
//!
//! # Parser Architecture
//!
//! The Parser is LL(1): it holds exactly one token of lookahead and never
//! backtracks. It is organized as follows:
//! - This module: Parser struct, error types, helper methods, and coordination
//! - `declarations`: Declaration lists, variables, and function definitions
//! - `expressions`: Initializer expressions
//! - `recovery`: Optional panic-mode recovery
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.

use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Lexer, Token, TokenKind};
use std::fmt;
use thiserror::Error;

/// Any source of classified tokens the parser can consume.
///
/// [`Lexer`] is the default implementation; any other iterator yielding the same
/// items can stand in for it. A source that ends without an explicit
/// [`TokenKind::Eof`] is treated as if one followed its last token.
pub trait TokenSource: Iterator<Item = Result<Token, LexError>> {}

impl<I: Iterator<Item = Result<Token, LexError>>> TokenSource for I {}

/// Whether a failure happened while tokenizing or while parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lexical,
    Syntax,
}

/// What the parser was prepared to accept at the point of failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Token(TokenKind),
    TypeKeyword,
    /// `(`, `;` or `=` after `Type Identifier`
    DeclaratorTail,
    /// A Number or an Identifier
    Expression,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Token(kind) => write!(f, "{}", kind),
            Expected::TypeKeyword => write!(f, "a type keyword"),
            Expected::DeclaratorTail => write!(f, "one of ( ; = after declarator"),
            Expected::Expression => write!(f, "Number or Identifier"),
        }
    }
}

/// An opening delimiter still waiting for its closer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenDelimiter {
    pub kind: TokenKind,
    pub location: SourceLocation,
}

/// Syntax error: the current token does not fit the committed production
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub expected: Expected,
    pub found: TokenKind,
    /// Text of the offending token (empty at end of input)
    pub lexeme: String,
    pub location: SourceLocation,
    /// Set when a closer is missing: the opener it should have matched
    pub opened_at: Option<OpenDelimiter>,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected {}, found {}", self.expected, self.found)?;
        if matches!(self.found, TokenKind::Identifier | TokenKind::Number) {
            write!(f, " '{}'", self.lexeme)?;
        }
        write!(f, " at {}", self.location)?;
        if let Some(open) = self.opened_at {
            write!(f, " (to match {} at {})", open.kind, open.location)?;
        }
        Ok(())
    }
}

impl std::error::Error for SyntaxError {}

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Lexical error: {0}")]
    Lexical(#[from] LexError),
    #[error("Syntax error: {0}")]
    Syntax(#[from] SyntaxError),
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::Lexical(_) => ErrorKind::Lexical,
            ParseError::Syntax(_) => ErrorKind::Syntax,
        }
    }

    pub fn location(&self) -> SourceLocation {
        match self {
            ParseError::Lexical(err) => err.location(),
            ParseError::Syntax(err) => err.location,
        }
    }

    pub fn as_syntax(&self) -> Option<&SyntaxError> {
        match self {
            ParseError::Syntax(err) => Some(err),
            ParseError::Lexical(_) => None,
        }
    }
}

/// Recursive descent parser for the declaration language
pub struct Parser<I> {
    pub(crate) tokens: I,
    /// The single token of lookahead
    pub(crate) current: Token,
    /// Number of function bodies currently open
    pub(crate) depth: usize,
    /// `Some` while parsing in recovering mode
    pub(crate) diagnostics: Option<Vec<ParseError>>,
}

impl Parser<Lexer> {
    pub fn new(source: &str) -> Result<Self, ParseError> {
        Self::from_tokens(Lexer::new(source))
    }
}

impl<I: TokenSource> Parser<I> {
    /// Build a parser over any token source, priming the lookahead.
    pub fn from_tokens(mut tokens: I) -> Result<Self, ParseError> {
        let current = match tokens.next() {
            Some(token) => token?,
            None => Token::eof(SourceLocation::new(1, 1)),
        };
        Ok(Self {
            tokens,
            current,
            depth: 0,
            diagnostics: None,
        })
    }

    /// Parse the entire program (top-level declarations)
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let declarations = self.parse_declaration_list()?;
        Ok(Program { declarations })
    }

    /// Parse the entire program, recovering from syntax errors.
    ///
    /// Returns every diagnostic collected on failure; no partial AST is returned.
    pub fn parse_program_recovering(&mut self) -> Result<Program, Vec<ParseError>> {
        self.diagnostics = Some(Vec::new());
        let result = self.parse_program();
        let mut diagnostics = self.diagnostics.take().unwrap_or_default();

        match result {
            Ok(program) if diagnostics.is_empty() => Ok(program),
            Ok(_) => Err(diagnostics),
            Err(err) => {
                diagnostics.push(err);
                Err(diagnostics)
            }
        }
    }

    // ===== Helper methods =====

    pub(crate) fn peek_kind(&self) -> TokenKind {
        self.current.kind
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.current.location
    }

    /// Consume the lookahead token and pull the next one from the source.
    pub(crate) fn advance(&mut self) -> Result<Token, ParseError> {
        let next = match self.tokens.next() {
            Some(token) => token?,
            None => Token::eof(self.current.location),
        };
        Ok(std::mem::replace(&mut self.current, next))
    }

    /// Build a syntax error against the current token.
    pub(crate) fn unexpected(&self, expected: Expected) -> ParseError {
        ParseError::Syntax(SyntaxError {
            expected,
            found: self.current.kind,
            lexeme: self.current.lexeme.clone(),
            location: self.current_location(),
            opened_at: None,
        })
    }

    pub(crate) fn expect_token(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            self.advance()
        } else {
            Err(self.unexpected(Expected::Token(kind)))
        }
    }

    /// Expect the closer for `open`, reporting where the opener was seen.
    pub(crate) fn expect_closer(
        &mut self,
        kind: TokenKind,
        open: OpenDelimiter,
    ) -> Result<Token, ParseError> {
        if self.check(kind) {
            return self.advance();
        }
        Err(self.unclosed(kind, open))
    }

    /// Build the error for a missing `kind` that should have closed `open`.
    pub(crate) fn unclosed(&self, kind: TokenKind, open: OpenDelimiter) -> ParseError {
        let mut err = self.unexpected(Expected::Token(kind));
        if let ParseError::Syntax(syntax) = &mut err {
            syntax.opened_at = Some(open);
        }
        err
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<String, ParseError> {
        Ok(self.expect_token(TokenKind::Identifier)?.lexeme)
    }
}
