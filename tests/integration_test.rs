// Integration tests for the TypeDef parser

use pretty_assertions::assert_eq;
use typedef::parser::ast::{CompoundKind, ScalarKind, Value};
use typedef::parser::lexer::{locate, Scanner, ScannerConfig};
use typedef::{parse, scan, Ast, ErrorKind, TokenKind, TokenSequence};

#[test]
fn test_enum_definition() {
    let ast = parse("enum Color { RED, GREEN, BLUE }").expect("Parsing failed");
    assert_eq!(ast.len(), 1);

    let color = ast.get("Color").and_then(|d| d.as_enum()).unwrap();
    let members: Vec<_> = color.members().iter().map(|t| t.text).collect();
    assert_eq!(members, vec!["RED", "GREEN", "BLUE"]);
    for (ordinal, name) in members.iter().enumerate() {
        assert_eq!(color.lookup(name), Some(ordinal));
    }
}

#[test]
fn test_type_definition() {
    let ast = parse("type Point { float x, float y }").expect("Parsing failed");
    let point = ast.get("Point").and_then(|d| d.as_type()).unwrap();

    assert!(point.parent.is_none());
    let fields: Vec<_> = point
        .fields()
        .iter()
        .map(|f| (f.name.text, f.type_name.text, f.is_array, f.default.is_some()))
        .collect();
    assert_eq!(
        fields,
        vec![("x", "float", false, false), ("y", "float", false, false)]
    );
}

#[test]
fn test_parent_and_array_field() {
    let ast = parse("type Vec : Point { bool flag[] }").expect("Parsing failed");
    let vec = ast.get("Vec").and_then(|d| d.as_type()).unwrap();

    assert_eq!(vec.parent.map(|t| t.text), Some("Point"));
    assert_eq!(vec.fields().len(), 1);
    let flag = vec.field("flag").unwrap();
    assert_eq!(flag.type_name.text, "bool");
    assert!(flag.is_array);
}

#[test]
fn test_scalar_default() {
    let ast = parse("type T { int n = 5 }").expect("Parsing failed");
    let n = ast.get("T").and_then(|d| d.as_type()).unwrap().field("n").unwrap();

    let scalar = n.default.as_ref().and_then(Value::as_scalar).unwrap();
    assert_eq!(scalar.kind, ScalarKind::Int);
    assert_eq!(scalar.token.text, "5");
    assert_eq!(scalar.as_i64(), Some(5));
}

#[test]
fn test_enum_default() {
    let ast = parse("type T { int n = State::Active }").expect("Parsing failed");
    let n = ast.get("T").and_then(|d| d.as_type()).unwrap().field("n").unwrap();

    match &n.default {
        Some(Value::Enum(value)) => {
            assert_eq!(value.enum_type.text, "State");
            assert_eq!(value.member.text, "Active");
        }
        other => panic!("expected enum default, got {:?}", other),
    }
}

#[test]
fn test_unmatched_close_brace() {
    let source = "type T { int n }}";
    let err = parse(source).unwrap_err();

    assert_eq!(err.kind, ErrorKind::Syntax);
    assert!(err.message.contains("unmatched close-brace"));
    let token = err.token.unwrap();
    assert_eq!(token.kind, TokenKind::RBrace);
    assert_eq!(locate(source, &token).map(|l| l.column), Some(17));
}

#[test]
fn test_compound_homogeneity() {
    let source = "type T { int a[] = { 1, 2, 3 }, P p = { x=1, y=2 }, int e[] = {} }";
    let ast = parse(source).expect("Parsing failed");
    let t = ast.get("T").and_then(|d| d.as_type()).unwrap();

    let resolved = |name: &str| {
        t.field(name)
            .and_then(|f| f.default.as_ref())
            .and_then(Value::as_compound)
            .map(|c| c.resolved)
    };
    assert_eq!(resolved("a"), Some(CompoundKind::Array));
    assert_eq!(resolved("p"), Some(CompoundKind::Object));
    assert_eq!(resolved("e"), Some(CompoundKind::Unit));

    let err = parse("type T { int a[] = { 1, x=2 } }").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Semantic);
    assert!(err.message.contains("mixes types"), "{}", err.message);
}

#[test]
fn test_uniqueness() {
    let err = parse("enum E { A, A }").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Semantic);
    assert!(err.message.contains("duplicate enum member"));

    let source = "type Foo {}\ntype Foo {}";
    let err = parse(source).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Semantic);
    assert!(err.message.contains("redefinition"));
    let location = locate(source, &err.token.unwrap()).unwrap();
    assert_eq!((location.line, location.column), (2, 6));
}

#[test]
fn test_incremental_parse_keeps_earlier_definitions() {
    let source = "enum A { X }\ntype B { int n }\ntype B {}\nenum C { Y }";
    let tokens = scan(source).unwrap();
    let mut sequence = TokenSequence::new(&tokens);
    let mut ast = Ast::new();

    assert_eq!(ast.parse_next(&mut sequence), Ok(Some("A")));
    assert_eq!(ast.parse_next(&mut sequence), Ok(Some("B")));
    assert!(ast.parse_next(&mut sequence).is_err());

    assert_eq!(ast.len(), 2);
    let names: Vec<_> = ast.definitions().iter().map(|d| d.name().text).collect();
    assert_eq!(names, vec!["A", "B"]);
}

#[test]
fn test_comments_and_full_schema() {
    let source = r#"
        // Shapes
        enum Shape { CIRCLE, SQUARE }

        /* Base record */
        type Base {
            string label = "unnamed"
            float scale = 1.
        }

        type Sprite : Base {
            Shape shape = Shape::CIRCLE,
            int frames[] = { 0, 1, 2 },
            Base children[] = { { label = "a" }, { label = "b", scale = -0.5 } }
        }
    "#;

    let mut scanner = Scanner::new(source);
    let tokens = scanner.tokenize().expect("Scanning failed");
    let stats = scanner.comment_stats();
    assert_eq!((stats.line_comments, stats.block_comments), (1, 1));

    let ast = typedef::Parser::new(&tokens)
        .parse_file()
        .expect("Parsing failed");
    assert_eq!(ast.len(), 3);

    let base = ast.get("Base").and_then(|d| d.as_type()).unwrap();
    let label = base.field("label").and_then(|f| f.default.as_ref()).unwrap();
    assert_eq!(label.as_scalar().and_then(|s| s.as_str()), Some("unnamed"));
    let scale = base.field("scale").and_then(|f| f.default.as_ref()).unwrap();
    assert_eq!(scale.as_scalar().map(|s| s.kind), Some(ScalarKind::Float));

    let sprite = ast.get("Sprite").and_then(|d| d.as_type()).unwrap();
    let children = sprite
        .field("children")
        .and_then(|f| f.default.as_ref())
        .unwrap();
    assert_eq!(
        children.to_string(),
        r#"{ { label = "a" }, { label = "b", scale = -0.5 } }"#
    );
    let children = children.as_compound().unwrap();
    assert_eq!(children.resolved, CompoundKind::Array);
    assert!(children
        .values
        .iter()
        .all(|v| v.as_compound().map(|c| c.resolved) == Some(CompoundKind::Object)));
}

#[test]
fn test_lexical_errors_surface_from_parse() {
    let err = parse("type T { string s = \"open }").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Lexical);
    assert_eq!(err.message, "unterminated string");

    let err = parse("enum E { A } /* trailing").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Lexical);
}

#[test]
fn test_word_length_policy() {
    let source = "enum Abcdefghij { A }";
    let config = ScannerConfig {
        max_word_len: Some(4),
    };
    let mut scanner = Scanner::with_config(source, config);
    let tokens = scanner.tokenize().unwrap();

    assert_eq!(tokens[1].text, "Abcdefghij");
    assert_eq!(scanner.warnings().len(), 1);
    assert_eq!(scanner.warnings()[0].token.text, "Abcdefghij");
}
