#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::LANGUAGE_VERSION;

/// Settings for a [`Parser`](crate::Parser).
///
/// With the `serde1` feature enabled, missing fields deserialize to their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize), serde(default))]
pub struct ParserConfig {
    /// The grammar ABI version [`Parser::set_grammar`](crate::Parser::set_grammar) accepts.
    /// Any other version is rejected, never coerced.
    pub expected_grammar_version: u32,
    /// Work budget for a single parse call, see [`Parser::set_operation_limit`](crate::Parser::set_operation_limit).
    pub operation_limit: Option<u64>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            expected_grammar_version: LANGUAGE_VERSION,
            operation_limit: None,
        }
    }
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pins the accepted grammar version, e.g. for grammars generated against an older, still supported ABI.
    pub fn expect_grammar_version(mut self, version: u32) -> Self {
        self.expected_grammar_version = version;
        self
    }

    pub fn with_operation_limit(mut self, limit: u64) -> Self {
        self.operation_limit = Some(limit);
        self
    }
}
