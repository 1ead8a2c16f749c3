mod grammar;
mod parse;
#[cfg(feature = "serde1")]
mod serde;

use tsbind::{Grammar, Node, Parser, ParserConfig, Tree, WalkEvent};

pub fn json() -> Grammar {
    Grammar::new(tree_sitter_json::LANGUAGE)
}

/// A parser bound to the JSON grammar, whatever ABI version the grammar crate was generated with.
pub fn json_parser() -> Parser {
    init_tracing();
    let grammar = json();
    let mut parser = Parser::with_config(ParserConfig::new().expect_grammar_version(grammar.version()));
    parser.set_grammar(grammar).unwrap();
    parser
}

pub fn parse(source: &str) -> Tree {
    json_parser().parse(source.as_bytes(), None).unwrap()
}

/// All nodes of the subtree below `node`, including `node` itself, in preorder.
pub fn descendants(node: &Node) -> Vec<Node> {
    node.preorder()
        .filter_map(|event| match event {
            WalkEvent::Enter(node) => Some(node),
            WalkEvent::Leave(_) => None,
        })
        .collect()
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Two top-level values on separate lines.
pub const TWO_VALUES: &str = "[1, null]\n[true]";

/// A larger multi-line document.
pub const NESTED: &str = r#"{
  "name": "tsbind",
  "tags": ["parser", "ffi"],
  "size": 3,
  "nested": { "ok": true, "none": null }
}
"#;
