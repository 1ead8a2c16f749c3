//! The parsing session.

mod budget;

use std::{
    ffi::c_void,
    fmt,
    os::raw::c_char,
    ptr::{self, NonNull},
};

use tracing::{debug, warn};
use tree_sitter::ffi;

use self::budget::{Budget, ProgressFn};
use crate::{
    tree::RawTree, Grammar, LanguageError, ParseError, ParserConfig, Tree, LANGUAGE_VERSION,
    MIN_COMPATIBLE_LANGUAGE_VERSION,
};

type ReadFn = unsafe extern "C" fn(*mut c_void, u32, ffi::TSPoint, *mut u32) -> *const c_char;

/// A stateful parsing session bound to one grammar at a time.
///
/// A parser is `Send` but not `Sync`: it may move between threads, but each call needs exclusive access.
pub struct Parser {
    raw:     NonNull<ffi::TSParser>,
    grammar: Option<Grammar>,
    config:  ParserConfig,
}

// safety: the native parser has no thread affinity, and every method touching it takes `&mut self`
unsafe impl Send for Parser {}

impl Parser {
    /// Creates a parser with the default [`ParserConfig`] and no grammar.
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    pub fn with_config(config: ParserConfig) -> Self {
        let raw = unsafe { ffi::ts_parser_new() };
        Self {
            // safety: the engine aborts on allocation failure, so a new parser is never null
            raw: unsafe { NonNull::new_unchecked(raw) },
            grammar: None,
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Replaces the configuration. A changed expected grammar version applies from the next
    /// [`set_grammar`](Parser::set_grammar) on; the currently bound grammar stays bound.
    pub fn set_config(&mut self, config: ParserConfig) {
        self.config = config;
    }

    /// The grammar currently bound, if any.
    #[inline]
    pub fn grammar(&self) -> Option<Grammar> {
        self.grammar
    }

    /// Binds a grammar to this parser.
    ///
    /// The grammar's version must equal [`ParserConfig::expected_grammar_version`] exactly. On failure the parser is
    /// left without any grammar, including one that was bound before, and [`parse`](Parser::parse) fails until a
    /// compatible grammar is bound.
    pub fn set_grammar(&mut self, grammar: Grammar) -> Result<(), LanguageError> {
        let actual = grammar.version();
        let expected = self.config.expected_grammar_version;
        if actual != expected {
            self.unbind();
            return Err(LanguageError::Incompatible { actual, expected });
        }
        if !unsafe { ffi::ts_parser_set_language(self.raw.as_ptr(), grammar.as_ptr()) } {
            self.unbind();
            return Err(LanguageError::Rejected {
                version: actual,
                min:     MIN_COMPATIBLE_LANGUAGE_VERSION,
                max:     LANGUAGE_VERSION,
            });
        }
        debug!(version = actual, kinds = grammar.node_kind_count(), "bound grammar");
        self.grammar = Some(grammar);
        Ok(())
    }

    fn unbind(&mut self) {
        // the engine accepts a null language and treats the parser as unbound
        unsafe { ffi::ts_parser_set_language(self.raw.as_ptr(), ptr::null()) };
        self.grammar = None;
    }

    /// The work budget of a single [`parse`](Parser::parse) call, if any.
    #[inline]
    pub fn operation_limit(&self) -> Option<u64> {
        self.config.operation_limit
    }

    /// Bounds the work a single [`parse`](Parser::parse) call may perform, or lifts the bound with `None`.
    ///
    /// This caps the worst-case latency of a parse on adversarial input. The budget is checked cooperatively at
    /// fixed intervals, so a cancelled parse may slightly overrun the limit before it stops.
    pub fn set_operation_limit(&mut self, limit: Option<u64>) {
        self.config.operation_limit = limit;
    }

    /// Discards all incremental state, so the next parse starts from scratch. The grammar stays bound.
    pub fn reset(&mut self) {
        unsafe { ffi::ts_parser_reset(self.raw.as_ptr()) };
        debug!("reset parser");
    }

    /// Parses `source` into a new tree.
    ///
    /// If `previous` is given, the parse is incremental and reuses the parts of `previous` outside of the edited
    /// ranges. Every change made to the source since `previous` was produced must have been marked on it with
    /// [`Tree::edit`], in order. A `previous` tree parsed with a different grammar is ignored.
    ///
    /// `source` is only borrowed for the duration of the call. Input with syntax errors still yields a tree; no tree
    /// is produced if the operation limit runs out or the engine gives up otherwise.
    pub fn parse(&mut self, source: &[u8], previous: Option<&Tree>) -> Result<Tree, ParseError> {
        let grammar = self.grammar.ok_or(ParseError::NoGrammar)?;
        if u32::try_from(source.len()).is_err() {
            return Err(ParseError::InputTooLarge { len: source.len() });
        }

        let previous = previous.filter(|tree| {
            let same_grammar = tree.grammar() == grammar;
            if !same_grammar {
                debug!("ignoring previous tree parsed with a different grammar");
            }
            same_grammar
        });
        let old_tree = previous.map_or(ptr::null(), |tree| tree.raw().as_ptr());

        let mut input = source;
        let c_input = ffi::TSInput {
            payload:  (&mut input as *mut &[u8]).cast(),
            read:     Some(read_source as ReadFn),
            encoding: ffi::TSInputEncodingUTF8,
            decode:   None,
        };
        let mut budget = self.config.operation_limit.map(Budget::new);
        let progress_callback = budget.as_ref().map(|_| budget::charge as ProgressFn);
        let c_options = ffi::TSParseOptions {
            payload: budget
                .as_mut()
                .map_or(ptr::null_mut(), |budget| (budget as *mut Budget).cast()),
            progress_callback,
        };

        // safety: `input` and `budget` outlive the call, which is the only time the engine uses the payloads
        let c_tree = unsafe { ffi::ts_parser_parse_with_options(self.raw.as_ptr(), old_tree, c_input, c_options) };

        match NonNull::new(c_tree) {
            Some(c_tree) => {
                debug!(
                    bytes = source.len(),
                    incremental = previous.is_some(),
                    "parsed source"
                );
                // safety: a tree returned by the engine belongs to the caller
                Ok(Tree::new(unsafe { RawTree::from_raw(c_tree) }))
            }
            None => {
                // a cancelled parse would otherwise resume from its stale state on the next call
                self.reset();
                match budget {
                    Some(budget) if budget.is_exhausted() => {
                        warn!(
                            limit = budget.limit(),
                            bytes = source.len(),
                            "parse cancelled by operation limit"
                        );
                        Err(ParseError::OperationLimitExceeded { limit: budget.limit() })
                    }
                    _ => Err(ParseError::Aborted),
                }
            }
        }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Parser {
    fn drop(&mut self) {
        unsafe { ffi::ts_parser_delete(self.raw.as_ptr()) }
    }
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("grammar", &self.grammar)
            .field("config", &self.config)
            .finish()
    }
}

/// Input callback handed to the engine. The payload must point to the `&[u8]` being parsed.
unsafe extern "C" fn read_source(
    payload: *mut c_void,
    byte_index: u32,
    _position: ffi::TSPoint,
    bytes_read: *mut u32,
) -> *const c_char {
    let source = *payload.cast::<&[u8]>();
    let start = (byte_index as usize).min(source.len());
    let rest = &source[start..];
    // `parse` rejects sources longer than `u32::MAX` bytes
    *bytes_read = rest.len() as u32;
    rest.as_ptr().cast()
}
