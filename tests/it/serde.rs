use serde_test::{assert_tokens, Token};
use tsbind::{InputEdit, ParserConfig, Point};

use super::{json, json_parser};

#[test]
fn config_tokens() {
    let config = ParserConfig::new().expect_grammar_version(14).with_operation_limit(500);
    assert_tokens(&config, &[
        Token::Struct {
            name: "ParserConfig",
            len:  2,
        },
        Token::Str("expected_grammar_version"),
        Token::U32(14),
        Token::Str("operation_limit"),
        Token::Some,
        Token::U64(500),
        Token::StructEnd,
    ]);

    let config = ParserConfig::new().expect_grammar_version(15);
    assert_tokens(&config, &[
        Token::Struct {
            name: "ParserConfig",
            len:  2,
        },
        Token::Str("expected_grammar_version"),
        Token::U32(15),
        Token::Str("operation_limit"),
        Token::None,
        Token::StructEnd,
    ]);
}

#[test]
fn partial_config() {
    let config: ParserConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, ParserConfig::default());

    let config: ParserConfig = serde_json::from_str(r#"{ "operation_limit": 1000 }"#).unwrap();
    assert_eq!(config.operation_limit, Some(1000));
    assert_eq!(config.expected_grammar_version, ParserConfig::default().expected_grammar_version);
}

#[test]
fn config_drives_parser() {
    let json_config = format!(r#"{{ "expected_grammar_version": {} }}"#, json().version());
    let config: ParserConfig = serde_json::from_str(&json_config).unwrap();
    let mut parser = tsbind::Parser::with_config(config);
    parser.set_grammar(json()).unwrap();
    assert!(parser.parse(b"[]", None).is_ok());

    let serialized = serde_json::to_string(json_parser().config()).unwrap();
    let deserialized: ParserConfig = serde_json::from_str(&serialized).unwrap();
    assert_eq!(&deserialized, parser.config());
}

#[test]
fn point_tokens() {
    assert_tokens(&Point::new(3, 7), &[
        Token::Struct { name: "Point", len: 2 },
        Token::Str("row"),
        Token::U32(3),
        Token::Str("column"),
        Token::U32(7),
        Token::StructEnd,
    ]);
}

#[test]
fn edits_from_json() {
    let source = b"[\n  1,\n  2\n]";
    let edit = InputEdit::replace(source, 4, 9, b"");
    let serialized = serde_json::to_string(&edit).unwrap();
    assert!(serialized.contains(r#""start_position":{"row":1,"column":2}"#));
    let deserialized: InputEdit = serde_json::from_str(&serialized).unwrap();
    assert_eq!(deserialized, edit);

    // a recorded edit can be replayed on a tree
    let mut tree = super::parse(std::str::from_utf8(source).unwrap());
    tree.edit(&deserialized);
    assert!(tree.root_node().has_changes());
}
