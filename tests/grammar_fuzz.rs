// Grammar fuzzing: random programs generated from the grammar must parse back
// into the shape they were generated from, and printing must be stable.

use minidecl::parser::printer::pretty_print;
use minidecl::{parse, Declaration, Expression, Program, Type};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Shape of a generated declaration, independent of source locations
#[derive(Debug, Clone, PartialEq)]
enum Shape {
    Var(Type, String),
    Init(Type, String, Expression),
    Func(Type, String, Vec<Shape>),
}

struct Generator {
    rng: StdRng,
    counter: usize,
}

impl Generator {
    fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            counter: 0,
        }
    }

    fn ty(&mut self) -> Type {
        Type::ALL[self.rng.gen_range(0..Type::ALL.len())]
    }

    fn name(&mut self) -> String {
        self.counter += 1;
        let stems = ["x", "_tmp", "value", "intx", "float_", "Char9"];
        let stem = stems[self.rng.gen_range(0..stems.len())];
        format!("{}{}", stem, self.counter)
    }

    fn expression(&mut self) -> Expression {
        match self.rng.gen_range(0..3) {
            0 => Expression::NumberLiteral(self.rng.gen_range(0..10_000u32).to_string()),
            1 => Expression::NumberLiteral(format!(
                "{}.{}",
                self.rng.gen_range(0..100u32),
                self.rng.gen_range(0..1000u32)
            )),
            _ => Expression::IdentifierRef(self.name()),
        }
    }

    fn declaration(&mut self, depth: usize) -> Shape {
        let roll = self.rng.gen_range(0..10);
        if roll < 3 && depth < 3 {
            let count = self.rng.gen_range(0..4);
            let body = (0..count).map(|_| self.declaration(depth + 1)).collect();
            Shape::Func(self.ty(), self.name(), body)
        } else if roll < 6 {
            Shape::Init(self.ty(), self.name(), self.expression())
        } else {
            Shape::Var(self.ty(), self.name())
        }
    }

    /// Whitespace between tokens: sometimes none, sometimes several lines
    fn gap(&mut self, required: bool) -> &'static str {
        let gaps = [" ", "\n", "\t", "  \n    ", "\n\n"];
        if !required && self.rng.gen_bool(0.4) {
            ""
        } else {
            gaps[self.rng.gen_range(0..gaps.len())]
        }
    }

    fn render(&mut self, shape: &Shape, out: &mut String) {
        match shape {
            Shape::Var(ty, name) => {
                out.push_str(ty.keyword());
                out.push_str(self.gap(true));
                out.push_str(name);
                out.push_str(self.gap(false));
                out.push(';');
            }
            Shape::Init(ty, name, init) => {
                out.push_str(ty.keyword());
                out.push_str(self.gap(true));
                out.push_str(name);
                out.push_str(self.gap(false));
                out.push('=');
                out.push_str(self.gap(false));
                out.push_str(&init.to_string());
                out.push_str(self.gap(false));
                out.push(';');
            }
            Shape::Func(ty, name, body) => {
                out.push_str(ty.keyword());
                out.push_str(self.gap(true));
                out.push_str(name);
                out.push_str(self.gap(false));
                out.push('(');
                out.push_str(self.gap(false));
                out.push(')');
                out.push_str(self.gap(false));
                out.push('{');
                for child in body {
                    out.push_str(self.gap(false));
                    self.render(child, out);
                }
                out.push_str(self.gap(false));
                out.push('}');
            }
        }
        out.push_str(self.gap(false));
    }

    fn program(&mut self) -> (Vec<Shape>, String) {
        let count = self.rng.gen_range(0..6);
        let shapes: Vec<Shape> = (0..count).map(|_| self.declaration(0)).collect();
        let mut source = String::new();
        for shape in &shapes {
            self.render(shape, &mut source);
        }
        (shapes, source)
    }
}

fn shape_of(decl: &Declaration) -> Shape {
    match decl {
        Declaration::VarDecl { var_type, name, .. } => Shape::Var(*var_type, name.clone()),
        Declaration::VarDeclInit {
            var_type,
            name,
            init,
            ..
        } => Shape::Init(*var_type, name.clone(), init.clone()),
        Declaration::FuncDecl {
            return_type,
            name,
            body,
            ..
        } => Shape::Func(*return_type, name.clone(), body.iter().map(shape_of).collect()),
    }
}

fn shapes_of(program: &Program) -> Vec<Shape> {
    program.declarations.iter().map(shape_of).collect()
}

#[test]
fn test_generated_programs_parse_to_their_shape() {
    let mut generator = Generator::new(0x5eed);

    for _ in 0..500 {
        let (expected, source) = generator.program();
        let program = parse(&source)
            .unwrap_or_else(|e| panic!("Parsing failed for {:?}: {}", source, e));

        assert_eq!(shapes_of(&program), expected, "source: {:?}", source);
    }
}

#[test]
fn test_print_then_parse_is_stable() {
    let mut generator = Generator::new(42);

    for _ in 0..300 {
        let (_, source) = generator.program();
        let program = parse(&source).expect("Parsing failed");

        let printed = pretty_print(&program);
        let reparsed = parse(&printed).expect("Reparsing printed form failed");

        assert_eq!(shapes_of(&reparsed), shapes_of(&program));
        assert_eq!(pretty_print(&reparsed), printed);
    }
}

#[test]
fn test_truncated_programs_never_panic() {
    let mut generator = Generator::new(7);

    for _ in 0..200 {
        let (shapes, source) = generator.program();
        if shapes.is_empty() {
            continue;
        }
        // Cut somewhere inside the text; the result is either valid or an error.
        let cut = generator.rng.gen_range(0..source.len());
        let _ = parse(&source[..cut]);
    }
}
