//! Declaration-language parser
//!
//! This module transforms source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → lazy token stream)
//! - [`parse`]: Parser struct, error types, and entry points (tokens → AST)
//! - [`ast`]: AST node definitions
//! - [`printer`]: Canonical source rendering of an AST
//!
//! # Supported Language
//!
//! - Types: `int`, `float`, `double`, `char`
//! - Variable declarations, optionally initialized with one number or identifier
//! - Zero-argument function definitions whose bodies hold further declarations
//! - No expressions with operators, no statements, no parameters
//!
//! # Parser Implementation
//!
//! Hand-written LL(1) recursive descent parser. Parsing stops at the first
//! error unless recovery is requested explicitly.

pub mod ast;
mod declarations;
mod expressions;
pub mod lexer;
pub mod parse;
pub mod printer;
mod recovery;

use ast::Program;
use parse::{ParseError, Parser};

/// Parse source text into a [`Program`], failing on the first error.
pub fn parse(source: &str) -> Result<Program, ParseError> {
    Parser::new(source)?.parse_program()
}

/// Parse source text, collecting every syntax error instead of stopping.
///
/// No partial AST is returned when any error was found.
pub fn parse_recovering(source: &str) -> Result<Program, Vec<ParseError>> {
    let mut parser = Parser::new(source).map_err(|err| vec![err])?;
    parser.parse_program_recovering()
}
