//! Canonical source rendering of the AST
//!
//! One declaration per line, function bodies indented by four spaces, and
//! `int f() {}` for an empty body. Parsing the printed text gives back an
//! equal tree apart from source locations.

use crate::parser::ast::*;
use std::fmt::{self, Write};

const INDENT: &str = "    ";

/// Render a whole program as source text
pub fn pretty_print(program: &Program) -> String {
    program.to_string()
}

/// Pending output while walking the tree without recursion
enum Step<'a> {
    Declaration(&'a Declaration, usize),
    CloseBody(usize),
}

fn indent(f: &mut impl Write, level: usize) -> fmt::Result {
    for _ in 0..level {
        f.write_str(INDENT)?;
    }
    Ok(())
}

fn write_declarations(f: &mut impl Write, decls: &[Declaration], level: usize) -> fmt::Result {
    let mut steps: Vec<Step> = decls
        .iter()
        .rev()
        .map(|decl| Step::Declaration(decl, level))
        .collect();

    while let Some(step) = steps.pop() {
        let (decl, level) = match step {
            Step::CloseBody(level) => {
                indent(f, level)?;
                writeln!(f, "}}")?;
                continue;
            }
            Step::Declaration(decl, level) => (decl, level),
        };

        indent(f, level)?;
        match decl {
            Declaration::VarDecl { var_type, name, .. } => writeln!(f, "{} {};", var_type, name)?,
            Declaration::VarDeclInit {
                var_type,
                name,
                init,
                ..
            } => writeln!(f, "{} {} = {};", var_type, name, init)?,
            Declaration::FuncDecl {
                return_type,
                name,
                body,
                ..
            } => {
                if body.is_empty() {
                    writeln!(f, "{} {}() {{}}", return_type, name)?;
                    continue;
                }
                writeln!(f, "{} {}() {{", return_type, name)?;
                steps.push(Step::CloseBody(level));
                steps.extend(
                    body.iter()
                        .rev()
                        .map(|child| Step::Declaration(child, level + 1)),
                );
            }
        }
    }
    Ok(())
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::NumberLiteral(text) | Expression::IdentifierRef(text) => f.write_str(text),
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_declarations(f, std::slice::from_ref(self), 0)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_declarations(f, &self.declarations, 0)
    }
}
