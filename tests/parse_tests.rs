// Integration tests for the declaration parser

use minidecl::outline::Outline;
use minidecl::parser::lexer::TokenKind;
use minidecl::parser::parse::Expected;
use minidecl::{parse, parse_recovering, Declaration, ErrorKind, Expression, ParseError, Type};
use std::fs;
use std::path::Path;

fn syntax_error(source: &str) -> minidecl::SyntaxError {
    match parse(source) {
        Err(ParseError::Syntax(err)) => err,
        other => panic!("Expected syntax error, got {:?}", other),
    }
}

#[test]
fn test_empty_input() {
    let program = parse("").expect("Parsing failed");
    assert!(program.declarations.is_empty());

    let program = parse(" \n\t\n").expect("Parsing failed");
    assert!(program.is_empty());
}

#[test]
fn test_scenario_plain_variable() {
    let program = parse("int x;").expect("Parsing failed");

    assert_eq!(program.declarations.len(), 1);
    match &program.declarations[0] {
        Declaration::VarDecl { var_type, name, .. } => {
            assert_eq!(*var_type, Type::Int);
            assert_eq!(name, "x");
        }
        other => panic!("Expected VarDecl, got {:?}", other),
    }
}

#[test]
fn test_scenario_initialized_float() {
    let program = parse("float y = 3.14;").expect("Parsing failed");

    match &program.declarations[..] {
        [Declaration::VarDeclInit {
            var_type,
            name,
            init,
            ..
        }] => {
            assert_eq!(*var_type, Type::Float);
            assert_eq!(name, "y");
            assert_eq!(*init, Expression::NumberLiteral("3.14".to_string()));
        }
        other => panic!("Expected one VarDeclInit, got {:?}", other),
    }
}

#[test]
fn test_scenario_function_body() {
    let program = parse("int main(){ int a; char c = b; }").expect("Parsing failed");

    match &program.declarations[..] {
        [Declaration::FuncDecl {
            return_type,
            name,
            body,
            ..
        }] => {
            assert_eq!(*return_type, Type::Int);
            assert_eq!(name, "main");
            assert_eq!(body.len(), 2);
            assert!(matches!(
                &body[0],
                Declaration::VarDecl { var_type: Type::Int, name, .. } if name == "a"
            ));
            assert!(matches!(
                &body[1],
                Declaration::VarDeclInit {
                    var_type: Type::Char,
                    name,
                    init: Expression::IdentifierRef(target),
                    ..
                } if name == "c" && target == "b"
            ));
        }
        other => panic!("Expected one FuncDecl, got {:?}", other),
    }
}

#[test]
fn test_empty_function_body() {
    let program = parse("int f(){}").expect("Parsing failed");

    assert_eq!(program.declarations.len(), 1);
    assert!(program.declarations[0].is_function());
    assert!(program.declarations[0].body().is_empty());
}

#[test]
fn test_scenario_number_as_name() {
    let err = syntax_error("int 5;");

    assert_eq!(err.expected, Expected::Token(TokenKind::Identifier));
    assert_eq!(err.found, TokenKind::Number);
    assert_eq!(err.location.line, 1);
    assert_eq!(err.location.column, 5);
}

#[test]
fn test_scenario_missing_initializer() {
    let err = syntax_error("int x = ;");

    assert_eq!(err.expected, Expected::Expression);
    assert_eq!(err.found, TokenKind::Semicolon);
    assert_eq!(err.location.column, 9);
    assert!(err.to_string().contains("expected Number or Identifier"));
}

#[test]
fn test_declarations_keep_source_order() {
    let source = r#"
        char c;
        double d = 2.5;
        int main() {
            float inner = d;
        }
        int last;
    "#;
    let program = parse(source).expect("Parsing failed");
    let names: Vec<&str> = program.declarations.iter().map(|d| d.name()).collect();

    assert_eq!(names, vec!["c", "d", "main", "last"]);
}

#[test]
fn test_lexical_errors() {
    let err = parse("int x = 1.2.3;").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Lexical);
    assert_eq!(err.location().column, 12);

    let err = parse("int x = -1;").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Lexical);
    assert!(err.to_string().contains("'-'"));
}

#[test]
fn test_first_error_wins() {
    // The syntax error comes before the bad character in token order.
    let err = parse("int 5; $").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);

    let err = parse("int x; $ int 5;").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Lexical);
}

#[test]
fn test_recovering_collects_errors_without_tree() {
    let errors = parse_recovering("int 1; float f = ; char ok;").unwrap_err();
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().all(|e| e.kind() == ErrorKind::Syntax));

    let program = parse_recovering("int a; char f() {}").expect("Parsing failed");
    assert_eq!(program.declarations.len(), 2);
}

#[test]
fn test_parses_are_independent_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let source = format!("int v{i}; char f{i}() {{ double d = {i}; }}");
                parse(&source).map(|p| p.declarations.len())
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().unwrap(), 2);
    }
}

#[test]
fn test_deep_nesting_on_small_stack() {
    const LEVELS: usize = 10_000;

    let handle = std::thread::Builder::new()
        .stack_size(2 * 1024 * 1024)
        .spawn(|| {
            let source = "int f(){".repeat(LEVELS) + &"}".repeat(LEVELS);
            let program = parse(&source).expect("Parsing failed");

            let mut depth = 1;
            let mut decl = &program.declarations[0];
            while let Some(inner) = decl.body().first() {
                decl = inner;
                depth += 1;
            }

            let outline = Outline::build(&program);
            let unclosed = parse(&"int f(){".repeat(LEVELS)).unwrap_err();
            let recovered = parse_recovering(&"int f(){".repeat(LEVELS)).unwrap_err();

            let opened_at = unclosed
                .as_syntax()
                .and_then(|err| err.opened_at)
                .map(|open| open.location.column);

            (depth, outline.max_depth(), opened_at, recovered.len())
        })
        .expect("Failed to spawn parser thread");

    let (depth, max_depth, opened_at, recovered) = handle.join().expect("Parser thread panicked");
    assert_eq!(depth, LEVELS);
    assert_eq!(max_depth, LEVELS - 1);
    // The innermost `{` is the one left open
    assert_eq!(opened_at, Some(8 * LEVELS));
    assert_eq!(recovered, 1);
}

#[test]
fn test_demo_files() {
    let source =
        fs::read_to_string(Path::new("demos/default.c")).expect("Failed to read demo file");
    let program = parse(&source).expect("Parsing failed");

    assert_eq!(program.declarations.len(), 6);
    let main = &program.declarations[4];
    assert_eq!(main.name(), "main");
    assert_eq!(main.body().len(), 5);
    assert!(main.body()[4].body().is_empty());

    let source =
        fs::read_to_string(Path::new("demos/broken.c")).expect("Failed to read demo file");
    let errors = parse_recovering(&source).unwrap_err();
    let lines: Vec<usize> = errors.iter().map(|e| e.location().line).collect();

    assert_eq!(lines, vec![2, 3, 6]);
}
