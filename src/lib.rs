//! # Introduction
//!
//! minidecl parses a tiny C-like declaration language into an immutable AST,
//! and ships a terminal browser for the result built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → Outline → TUI
//! ```
//!
//! 1. [`parser`] : tokenises the source lazily and builds the AST with one
//!    token of lookahead, or reports a single lexical/syntax error.
//! 2. [`outline`] : flattens a parsed program into rows plus parent/child,
//!    line and name lookup tables.
//! 3. [`ui`] : ratatui-based TUI; not part of the stable library API.
//!
//! ## Language
//!
//! ```text
//! int x;
//! float y = 3.14;
//! int main() { int a; char c = b; }
//! ```
//!
//! Types: `int`, `float`, `double`, `char`. Initializers are a single number
//! or identifier. Functions take no parameters and contain only declarations.

pub mod outline;
pub mod parser;
pub mod ui;

pub use parser::ast::{Declaration, Expression, Program, SourceLocation, Type};
pub use parser::parse::{ErrorKind, ParseError, SyntaxError};
pub use parser::{parse, parse_recovering};
