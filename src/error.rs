use thiserror::Error;

/// Why a [`Grammar`](crate::Grammar) could not be bound to a [`Parser`](crate::Parser).
///
/// After either error the parser is left without a grammar and refuses to parse until a compatible one is bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LanguageError {
    /// The grammar was generated for a different ABI version than the one the parser expects.
    #[error("incompatible grammar version {actual}, expected {expected}")]
    Incompatible { actual: u32, expected: u32 },
    /// The versions matched, but the engine does not support that ABI.
    #[error("grammar version {version} is not supported by the engine (supported: {min}..={max})")]
    Rejected { version: u32, min: u32, max: u32 },
}

/// A parse that did not produce a tree.
///
/// Syntactically invalid input is *not* an error: the engine recovers and marks the affected subtrees, see
/// [`Node::has_error`](crate::Node::has_error).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("no grammar is bound to the parser")]
    NoGrammar,
    #[error("parse cancelled after exceeding the operation limit of {limit}")]
    OperationLimitExceeded { limit: u64 },
    #[error("input of {len} bytes exceeds the engine's maximum input size")]
    InputTooLarge { len: usize },
    #[error("the engine aborted the parse without producing a tree")]
    Aborted,
}
