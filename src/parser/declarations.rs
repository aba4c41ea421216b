//! Declaration parsing implementation
//!
//! This module handles every production of the grammar above the expression
//! level:
//!
//! - Declaration lists (the whole program, and function bodies)
//! - Variable declarations, with or without an initializer
//! - Function definitions with an empty parameter list
//!
//! # Grammar
//!
//! ```text
//! Program         -> DeclarationList
//! DeclarationList -> Declaration DeclarationList | ε
//! Declaration     -> Type Identifier ';'
//!                  | Type Identifier '=' Expression ';'
//!                  | Function
//! Function        -> Type Identifier '(' ')' '{' DeclarationList '}'
//! Type            -> 'int' | 'float' | 'double' | 'char'
//! ```
//!
//! After `Type Identifier` the next token alone picks the production, so no
//! backtracking is needed.
//!
//! Function bodies are not parsed by recursion. Each `{` pushes an
//! [`OpenFunction`] onto an explicit stack and the matching `}` pops it, so
//! nesting depth is bounded by memory rather than by the call stack.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{Expected, OpenDelimiter, ParseError, Parser, TokenSource};

/// A function whose `{` has been consumed and whose body is still being filled
pub(crate) struct OpenFunction {
    return_type: Type,
    name: String,
    location: SourceLocation,
    lbrace: SourceLocation,
    body: Vec<Declaration>,
}

impl OpenFunction {
    fn close(self) -> Declaration {
        Declaration::FuncDecl {
            return_type: self.return_type,
            name: self.name,
            body: self.body,
            location: self.location,
        }
    }
}

/// Result of parsing the start of one declaration
pub(crate) enum DeclarationStart {
    Complete(Declaration),
    /// A function header up to and including its `{`
    Function(OpenFunction),
}

/// Append `decl` to the innermost open body, or to the top level.
fn attach(open: &mut [OpenFunction], top_level: &mut Vec<Declaration>, decl: Declaration) {
    match open.last_mut() {
        Some(parent) => parent.body.push(decl),
        None => top_level.push(decl),
    }
}

impl<I: TokenSource> Parser<I> {
    /// Parse declarations until end of input, including every nested body.
    pub(crate) fn parse_declaration_list(&mut self) -> Result<Vec<Declaration>, ParseError> {
        let mut top_level = Vec::new();
        let mut open: Vec<OpenFunction> = Vec::new();

        loop {
            if self.is_at_end() {
                if let Some(func) = open.last() {
                    let err = self.unclosed(
                        TokenKind::RBrace,
                        OpenDelimiter {
                            kind: TokenKind::LBrace,
                            location: func.lbrace,
                        },
                    );
                    self.recover(err)?;
                }
                break;
            }

            if self.check(TokenKind::RBrace) {
                if let Some(func) = open.pop() {
                    self.advance()?;
                    self.depth = open.len();
                    attach(&mut open, &mut top_level, func.close());
                    continue;
                }
            }

            match self.parse_declaration() {
                Ok(DeclarationStart::Complete(decl)) => attach(&mut open, &mut top_level, decl),
                Ok(DeclarationStart::Function(func)) => {
                    open.push(func);
                    self.depth = open.len();
                }
                Err(err) => self.recover(err)?,
            }
        }

        Ok(top_level)
    }

    /// Parse one declaration, dispatching on the token after the declarator.
    pub(crate) fn parse_declaration(&mut self) -> Result<DeclarationStart, ParseError> {
        let (var_type, location) = self.parse_type()?;
        let name = self.expect_identifier()?;

        match self.peek_kind() {
            TokenKind::LParen => Ok(DeclarationStart::Function(
                self.parse_function(var_type, name, location)?,
            )),
            TokenKind::Semicolon => {
                self.advance()?;
                Ok(DeclarationStart::Complete(Declaration::VarDecl {
                    var_type,
                    name,
                    location,
                }))
            }
            TokenKind::Equals => {
                self.advance()?;
                let init = self.parse_expression()?;
                self.expect_token(TokenKind::Semicolon)?;
                Ok(DeclarationStart::Complete(Declaration::VarDeclInit {
                    var_type,
                    name,
                    init,
                    location,
                }))
            }
            _ => Err(self.unexpected(Expected::DeclaratorTail)),
        }
    }

    /// Parse function header after `Type Identifier`: ( ) {
    ///
    /// The body and its `}` are consumed by [`Parser::parse_declaration_list`].
    pub(crate) fn parse_function(
        &mut self,
        return_type: Type,
        name: String,
        location: SourceLocation,
    ) -> Result<OpenFunction, ParseError> {
        let lparen = self.expect_token(TokenKind::LParen)?;
        self.expect_closer(
            TokenKind::RParen,
            OpenDelimiter {
                kind: TokenKind::LParen,
                location: lparen.location,
            },
        )?;

        let lbrace = self.expect_token(TokenKind::LBrace)?;

        Ok(OpenFunction {
            return_type,
            name,
            location,
            lbrace: lbrace.location,
            body: Vec::new(),
        })
    }

    /// Parse type keyword, returning it with its location
    pub(crate) fn parse_type(&mut self) -> Result<(Type, SourceLocation), ParseError> {
        match self.peek_kind().as_type() {
            Some(ty) => {
                let token = self.advance()?;
                Ok((ty, token.location))
            }
            None => Err(self.unexpected(Expected::TypeKeyword)),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::lexer::TokenKind;
    use crate::parser::parse::{Expected, ParseError, Parser};

    fn parse(source: &str) -> Result<Program, ParseError> {
        Parser::new(source)?.parse_program()
    }

    fn syntax_error(source: &str) -> crate::parser::parse::SyntaxError {
        match parse(source) {
            Err(ParseError::Syntax(err)) => err,
            other => panic!("Expected syntax error for {:?}, got {:?}", source, other),
        }
    }

    #[test]
    fn test_every_type_keyword() {
        let program = parse("int a; float b; double c; char d;").unwrap();
        let types: Vec<Type> = program
            .declarations
            .iter()
            .map(|d| d.declared_type())
            .collect();

        assert_eq!(types, Type::ALL.to_vec());
    }

    #[test]
    fn test_nested_functions_are_declarations() {
        let program = parse("int outer() { char inner() { int x; } }").unwrap();
        let outer = &program.declarations[0];

        assert_eq!(outer.body().len(), 1);
        assert!(outer.body()[0].is_function());
        assert_eq!(outer.body()[0].body()[0].name(), "x");
    }

    #[test]
    fn test_location_is_type_keyword() {
        let program = parse("\n  double d = 1;").unwrap();
        assert_eq!(
            program.declarations[0].location(),
            SourceLocation::new(2, 3)
        );
    }

    #[test]
    fn test_bad_declarator_tail() {
        let err = syntax_error("int x }");
        assert_eq!(err.expected, Expected::DeclaratorTail);
        assert_eq!(err.found, TokenKind::RBrace);
    }

    #[test]
    fn test_missing_type_keyword() {
        let err = syntax_error("x;");
        assert_eq!(err.expected, Expected::TypeKeyword);
        assert_eq!(err.found, TokenKind::Identifier);
        assert_eq!(err.lexeme, "x");
    }

    #[test]
    fn test_parameters_are_rejected() {
        let err = syntax_error("int f(int a) {}");
        assert_eq!(err.expected, Expected::Token(TokenKind::RParen));
        let open = err.opened_at.unwrap();
        assert_eq!(open.kind, TokenKind::LParen);
        assert_eq!(open.location, SourceLocation::new(1, 6));
    }

    #[test]
    fn test_missing_body() {
        let err = syntax_error("int f();");
        assert_eq!(err.expected, Expected::Token(TokenKind::LBrace));
        assert!(err.opened_at.is_none());
    }

    #[test]
    fn test_unclosed_body_reports_opener() {
        let err = syntax_error("int f() {\n  int a;\n");
        assert_eq!(err.expected, Expected::Token(TokenKind::RBrace));
        assert_eq!(err.found, TokenKind::Eof);
        assert_eq!(err.opened_at.unwrap().location, SourceLocation::new(1, 9));
    }

    #[test]
    fn test_innermost_unclosed_body_is_reported() {
        let err = syntax_error("int f() {\n  int g() {\n    int h() {}\n");
        assert_eq!(err.found, TokenKind::Eof);
        assert_eq!(err.opened_at.unwrap().location, SourceLocation::new(2, 11));
    }

    #[test]
    fn test_siblings_after_nested_body() {
        let program = parse("int f() { int g() { int x; } char c; } int y;").unwrap();

        assert_eq!(program.declarations.len(), 2);
        let f = &program.declarations[0];
        assert_eq!(f.body().len(), 2);
        assert_eq!(f.body()[0].body()[0].name(), "x");
        assert_eq!(f.body()[1].name(), "c");
        assert_eq!(program.declarations[1].name(), "y");
    }

    #[test]
    fn test_stray_closing_brace() {
        let err = syntax_error("int a; }");
        assert_eq!(err.expected, Expected::TypeKeyword);
        assert_eq!(err.found, TokenKind::RBrace);
    }

    #[test]
    fn test_missing_semicolon_after_initializer() {
        let err = syntax_error("int a = 1 int b;");
        assert_eq!(err.expected, Expected::Token(TokenKind::Semicolon));
        assert_eq!(err.found, TokenKind::Int);
    }
}
