use tsbind::{LanguageError, ParseError, Parser, ParserConfig, LANGUAGE_VERSION, MIN_COMPATIBLE_LANGUAGE_VERSION};

use super::{json, json_parser};

#[test]
fn version_within_engine_range() {
    let version = json().version();
    assert!(version >= MIN_COMPATIBLE_LANGUAGE_VERSION);
    assert!(version <= LANGUAGE_VERSION);
}

#[test]
fn default_parser_expects_engine_version() {
    let grammar = json();
    let mut parser = Parser::new();
    let result = parser.set_grammar(grammar);
    if grammar.version() == LANGUAGE_VERSION {
        assert_eq!(result, Ok(()));
        assert_eq!(parser.grammar(), Some(grammar));
    } else {
        assert_eq!(
            result,
            Err(LanguageError::Incompatible {
                actual:   grammar.version(),
                expected: LANGUAGE_VERSION,
            })
        );
        assert_eq!(parser.grammar(), None);
    }
}

#[test]
fn mismatch_is_rejected() {
    let grammar = json();
    let mut parser = Parser::with_config(ParserConfig::new().expect_grammar_version(grammar.version() + 1));
    let err = parser.set_grammar(grammar).unwrap_err();
    assert_eq!(
        err,
        LanguageError::Incompatible {
            actual:   grammar.version(),
            expected: grammar.version() + 1,
        }
    );
    assert_eq!(parser.grammar(), None);
    assert_eq!(parser.parse(b"[]", None).unwrap_err(), ParseError::NoGrammar);

    let message = err.to_string();
    assert!(message.contains(&grammar.version().to_string()));
    assert!(message.contains(&(grammar.version() + 1).to_string()));
}

#[test]
fn failed_rebind_leaves_parser_unbound() {
    let grammar = json();
    let mut parser = json_parser();
    assert!(parser.parse(b"[]", None).is_ok());

    // the expected version only applies to the next bind
    let config = *parser.config();
    parser.set_config(config.expect_grammar_version(grammar.version() + 1));
    assert_eq!(parser.grammar(), Some(grammar));
    assert!(parser.parse(b"[]", None).is_ok());

    parser.set_grammar(grammar).unwrap_err();
    assert_eq!(parser.grammar(), None);
    assert_eq!(parser.parse(b"[]", None).unwrap_err(), ParseError::NoGrammar);

    // binding under a matching expectation recovers
    parser.set_config(config);
    parser.set_grammar(grammar).unwrap();
    assert!(parser.parse(b"[]", None).is_ok());
}

#[test]
fn node_kinds() {
    let grammar = json();
    assert!(grammar.node_kind_count() > 0);

    let number = grammar.id_for_node_kind("number", true).unwrap();
    assert_eq!(grammar.node_kind_for_id(number), Some("number"));
    let bracket = grammar.id_for_node_kind("[", false).unwrap();
    assert_eq!(grammar.node_kind_for_id(bracket), Some("["));

    assert_eq!(grammar.id_for_node_kind("no_such_kind", true), None);
    let past_end = u16::try_from(grammar.node_kind_count() + 10).unwrap();
    assert_eq!(grammar.node_kind_for_id(past_end), None);
    assert_eq!(grammar.node_kind_for_id(u16::MAX), Some("ERROR"));
}

#[test]
fn grammar_identity() {
    assert_eq!(json(), json());
    let tree = super::parse("[]");
    assert_eq!(tree.grammar(), json());
    assert_eq!(tree.root_node().grammar(), json());
}
