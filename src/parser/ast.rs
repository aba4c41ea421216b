// AST (Abstract Syntax Tree) definitions for the declaration language

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// The four primitive types. There are no user-defined types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Int,
    Float,
    Double,
    Char,
}

impl Type {
    pub const ALL: [Type; 4] = [Type::Int, Type::Float, Type::Double, Type::Char];

    /// The reserved word spelling this type.
    pub fn keyword(self) -> &'static str {
        match self {
            Type::Int => "int",
            Type::Float => "float",
            Type::Double => "double",
            Type::Char => "char",
        }
    }
}

/// Initializer expression: a single number or identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    /// Raw numeric text exactly as written, e.g. `"3.14"`
    NumberLiteral(String),
    IdentifierRef(String),
}

/// A declaration, either at top level or inside a function body.
///
/// `location` is the position of the leading type keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    VarDecl {
        var_type: Type,
        name: String,
        location: SourceLocation,
    },
    VarDeclInit {
        var_type: Type,
        name: String,
        init: Expression,
        location: SourceLocation,
    },
    FuncDecl {
        return_type: Type,
        name: String,
        body: Vec<Declaration>,
        location: SourceLocation,
    },
}

impl Declaration {
    /// Get the declared identifier
    pub fn name(&self) -> &str {
        match self {
            Declaration::VarDecl { name, .. }
            | Declaration::VarDeclInit { name, .. }
            | Declaration::FuncDecl { name, .. } => name,
        }
    }

    /// Variable type, or return type for functions
    pub fn declared_type(&self) -> Type {
        match self {
            Declaration::VarDecl { var_type, .. } | Declaration::VarDeclInit { var_type, .. } => {
                *var_type
            }
            Declaration::FuncDecl { return_type, .. } => *return_type,
        }
    }

    /// Get the source location of this declaration
    pub fn location(&self) -> SourceLocation {
        match self {
            Declaration::VarDecl { location, .. }
            | Declaration::VarDeclInit { location, .. }
            | Declaration::FuncDecl { location, .. } => *location,
        }
    }

    /// Nested declarations; empty for variables.
    pub fn body(&self) -> &[Declaration] {
        match self {
            Declaration::FuncDecl { body, .. } => body,
            _ => &[],
        }
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Declaration::FuncDecl { .. })
    }
}

impl Drop for Declaration {
    // Bodies are emptied onto a worklist so dropping a deeply nested function
    // never recurses.
    fn drop(&mut self) {
        let Declaration::FuncDecl { body, .. } = self else {
            return;
        };
        let mut pending = std::mem::take(body);
        while let Some(mut decl) = pending.pop() {
            if let Declaration::FuncDecl { body, .. } = &mut decl {
                pending.append(body);
            }
        }
    }
}

/// Top-level program structure
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    pub declarations: Vec<Declaration>, // Source order; empty is a valid program
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}
