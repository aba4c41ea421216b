//! Flattened, navigable view of a parsed [`Program`]
//!
//! The AST itself has no back-references. Everything a browser needs to walk
//! it (parents, children, line lookups, name lookups) lives in separate
//! tables keyed by [`NodeId`], built once from an immutable tree.

use crate::parser::ast::{Declaration, Program, SourceLocation};
use rustc_hash::FxHashMap;

/// Position of a declaration in pre-order, used as its row index
pub type NodeId = usize;

/// One line of the outline tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineRow {
    pub id: NodeId,
    pub depth: usize,
    /// Declared identifier, the key for [`Outline::lookup`]
    pub name: String,
    pub label: String,
    pub location: SourceLocation,
    pub is_function: bool,
}

/// Outline rows plus the lookup tables that link them
#[derive(Debug, Clone, Default)]
pub struct Outline {
    rows: Vec<OutlineRow>,
    parents: FxHashMap<NodeId, NodeId>,
    children: FxHashMap<NodeId, Vec<NodeId>>,
    by_line: FxHashMap<usize, NodeId>,
    by_name: FxHashMap<String, Vec<NodeId>>,
}

impl Outline {
    pub fn build(program: &Program) -> Self {
        let mut outline = Outline::default();
        // Pre-order walk on an explicit stack; children are pushed in reverse
        let mut pending: Vec<(&Declaration, Option<NodeId>, usize)> = program
            .declarations
            .iter()
            .rev()
            .map(|decl| (decl, None, 0))
            .collect();

        while let Some((decl, parent, depth)) = pending.pop() {
            let id = outline.record(decl, parent, depth);
            pending.extend(
                decl.body()
                    .iter()
                    .rev()
                    .map(|child| (child, Some(id), depth + 1)),
            );
        }
        outline
    }

    fn record(&mut self, decl: &Declaration, parent: Option<NodeId>, depth: usize) -> NodeId {
        let id = self.rows.len();
        let location = decl.location();
        let name = decl.name().to_string();

        self.by_name.entry(name.clone()).or_default().push(id);
        self.rows.push(OutlineRow {
            id,
            depth,
            name,
            label: label(decl),
            location,
            is_function: decl.is_function(),
        });

        if let Some(parent) = parent {
            self.parents.insert(id, parent);
            self.children.entry(parent).or_default().push(id);
        }
        // First declaration on a line wins
        self.by_line.entry(location.line).or_insert(id);

        id
    }

    pub fn rows(&self) -> &[OutlineRow] {
        &self.rows
    }

    pub fn row(&self, id: NodeId) -> Option<&OutlineRow> {
        self.rows.get(id)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Enclosing function of a node; `None` at top level
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents.get(&id).copied()
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Declaration starting on `line`, if any
    pub fn node_at_line(&self, line: usize) -> Option<NodeId> {
        self.by_line.get(&line).copied()
    }

    /// Every declaration of `name`, in source order
    pub fn lookup(&self, name: &str) -> &[NodeId] {
        self.by_name.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn function_count(&self) -> usize {
        self.rows.iter().filter(|row| row.is_function).count()
    }

    pub fn variable_count(&self) -> usize {
        self.rows.len() - self.function_count()
    }

    /// Deepest nesting level; 0 when everything is top level
    pub fn max_depth(&self) -> usize {
        self.rows.iter().map(|row| row.depth).max().unwrap_or(0)
    }
}

/// Short human-readable description of a declaration
fn label(decl: &Declaration) -> String {
    match decl {
        Declaration::VarDecl { var_type, name, .. } => format!("{} {}", var_type, name),
        Declaration::VarDeclInit {
            var_type,
            name,
            init,
            ..
        } => format!("{} {} = {}", var_type, name, init),
        Declaration::FuncDecl {
            return_type,
            name,
            body,
            ..
        } => format!("{} {}() [{}]", return_type, name, body.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    const SOURCE: &str = "int g;\nint main() {\n  int a;\n  char f() { float x = a; }\n}\ndouble a = 2;";

    fn outline() -> Outline {
        Outline::build(&parse(SOURCE).unwrap())
    }

    #[test]
    fn test_rows_are_preorder() {
        let outline = outline();
        let labels: Vec<&str> = outline.rows().iter().map(|r| r.label.as_str()).collect();

        assert_eq!(
            labels,
            vec![
                "int g",
                "int main() [2]",
                "int a",
                "char f() [1]",
                "float x = a",
                "double a = 2"
            ]
        );
        let depths: Vec<usize> = outline.rows().iter().map(|r| r.depth).collect();
        assert_eq!(depths, vec![0, 0, 1, 1, 2, 0]);
    }

    #[test]
    fn test_parent_and_children() {
        let outline = outline();

        assert_eq!(outline.parent(0), None);
        assert_eq!(outline.parent(2), Some(1));
        assert_eq!(outline.parent(4), Some(3));
        assert_eq!(outline.children(1), &[2, 3]);
        assert!(outline.children(0).is_empty());
    }

    #[test]
    fn test_lookups() {
        let outline = outline();

        assert_eq!(outline.lookup("a"), &[2, 5]);
        assert!(outline.lookup("missing").is_empty());
        assert_eq!(outline.node_at_line(4), Some(3));
        assert_eq!(outline.node_at_line(5), None);
    }

    #[test]
    fn test_counts() {
        let outline = outline();

        assert_eq!(outline.function_count(), 2);
        assert_eq!(outline.variable_count(), 4);
        assert_eq!(outline.max_depth(), 2);
    }

    #[test]
    fn test_empty_program() {
        let outline = Outline::build(&Program::new());
        assert!(outline.is_empty());
        assert_eq!(outline.max_depth(), 0);
    }
}
