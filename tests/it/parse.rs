use tsbind::{ParseError, Parser, ParserConfig};

use super::{json, json_parser, parse, NESTED, TWO_VALUES};

#[test]
fn two_values() {
    let tree = parse(TWO_VALUES);
    let root = tree.root_node();
    assert_eq!(root.kind(), "document");
    assert!(!root.has_error());
    assert_eq!(root.parent(), None);

    let sexp = root.to_sexp();
    assert_eq!(sexp, "(document (array (number) (null)) (array (true)))");
    assert!(sexp.starts_with("(document"));
    assert_eq!(root.to_string(), sexp);
}

#[test]
fn nested_document() {
    let tree = parse(NESTED);
    let root = tree.root_node();
    assert!(!root.has_error());
    let sexp = root.to_sexp();
    assert!(sexp.starts_with("(document (object (pair"));
    assert_eq!(sexp.matches("(pair").count(), 6);
    assert!(sexp.contains("(array (string"));
}

#[test]
fn deterministic() {
    let mut parser = json_parser();
    let first = parser.parse(NESTED.as_bytes(), None).unwrap();
    let second = parser.parse(NESTED.as_bytes(), None).unwrap();
    assert_eq!(first.root_node().to_sexp(), second.root_node().to_sexp());

    let copy = first.copy();
    assert_eq!(first.root_node().to_sexp(), copy.root_node().to_sexp());
    let cloned = first.clone();
    assert_eq!(first.root_node().to_sexp(), cloned.root_node().to_sexp());
}

#[test]
fn malformed_input_still_parses() {
    let tree = parse("[1 2");
    let root = tree.root_node();
    assert!(root.has_error());

    let tree = parse("{\"a\": }");
    assert!(tree.root_node().has_error());

    // errors are local to the affected subtree
    let tree = parse("[1, 2]\n{\"a\" 1}");
    let root = tree.root_node();
    assert!(root.has_error());
    let first = root.named_child(0).unwrap();
    assert_eq!(first.kind(), "array");
    assert!(!first.has_error());
}

#[test]
fn missing_token_in_dump() {
    let tree = parse("[1, 2");
    let root = tree.root_node();
    assert!(root.has_error());
    let missing = super::descendants(&root).into_iter().find(|node| node.is_missing());
    if let Some(missing) = missing {
        assert!(root.to_sexp().contains("(MISSING"));
        assert_eq!(missing.start_byte(), missing.end_byte());
    }
}

#[test]
fn binary_safe_input() {
    let mut parser = json_parser();
    let tree = parser.parse(b"[1, \xff\xfe]", None).unwrap();
    assert!(tree.root_node().has_error());
    let tree = parser.parse(b"", None).unwrap();
    assert_eq!(tree.root_node().kind(), "document");
    assert_eq!(tree.root_node().child_count(), 0);
}

#[test]
fn no_grammar() {
    let mut parser = Parser::new();
    assert_eq!(parser.grammar(), None);
    assert_eq!(parser.parse(b"[]", None).unwrap_err(), ParseError::NoGrammar);
}

fn big_array(len: usize) -> String {
    let items: Vec<String> = (0..len).map(|i| i.to_string()).collect();
    format!("[{}]", items.join(", "))
}

#[test]
fn operation_limit() {
    let source = big_array(20_000);
    let mut parser = json_parser();
    parser.set_operation_limit(Some(1_000));
    assert_eq!(parser.operation_limit(), Some(1_000));
    let err = parser.parse(source.as_bytes(), None).unwrap_err();
    assert_eq!(err, ParseError::OperationLimitExceeded { limit: 1_000 });
    assert!(err.to_string().contains("1000"));

    // the cancelled parse does not leak into the next one
    let tree = parser.parse(b"[true]", None).unwrap();
    assert_eq!(tree.root_node().to_sexp(), "(document (array (true)))");

    parser.set_operation_limit(None);
    let tree = parser.parse(source.as_bytes(), None).unwrap();
    assert_eq!(tree.root_node().named_child(0).unwrap().named_child_count(), 20_000);
}

#[test]
fn generous_operation_limit() {
    let grammar = json();
    let config = ParserConfig::new()
        .expect_grammar_version(grammar.version())
        .with_operation_limit(u64::MAX);
    let mut parser = Parser::with_config(config);
    parser.set_grammar(grammar).unwrap();
    let tree = parser.parse(big_array(1_000).as_bytes(), None).unwrap();
    assert!(!tree.root_node().has_error());
}

#[test]
fn reset_keeps_grammar() {
    let mut parser = json_parser();
    let tree = parser.parse(TWO_VALUES.as_bytes(), None).unwrap();
    parser.reset();
    assert_eq!(parser.grammar(), Some(json()));
    let again = parser.parse(TWO_VALUES.as_bytes(), None).unwrap();
    assert_eq!(tree.root_node().to_sexp(), again.root_node().to_sexp());
}

#[test]
fn tree_outlives_parser() {
    let tree = {
        let mut parser = json_parser();
        parser.parse(TWO_VALUES.as_bytes(), None).unwrap()
    };
    assert_eq!(tree.root_node().named_child_count(), 2);
}

#[test]
fn views_outlive_tree() {
    let (node, mut cursor) = {
        let tree = parse(TWO_VALUES);
        let node = tree.root_node().named_child(1).unwrap();
        let cursor = tree.walk();
        (node, cursor)
    };
    assert_eq!(node.kind(), "array");
    assert_eq!(node.to_sexp(), "(array (true))");
    assert!(cursor.goto_first_child());
    assert_eq!(cursor.node().kind(), "array");
}

#[test]
fn release() {
    let tree = parse(TWO_VALUES);
    assert!(tree.release());

    let tree = parse(TWO_VALUES);
    let node = tree.root_node();
    assert!(!tree.release());
    // the node keeps the structure alive
    assert_eq!(node.kind(), "document");
    assert_eq!(node.named_child_count(), 2);
}
