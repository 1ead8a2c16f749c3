use std::{ffi::CStr, fmt, os::raw::c_char};

use tree_sitter::ffi;
use tree_sitter_language::LanguageFn;

/// The grammar ABI version the linked engine generates and expects by default.
pub const LANGUAGE_VERSION: u32 = ffi::TREE_SITTER_LANGUAGE_VERSION;
/// The oldest grammar ABI version the linked engine can still load.
pub const MIN_COMPATIBLE_LANGUAGE_VERSION: u32 = ffi::TREE_SITTER_MIN_COMPATIBLE_LANGUAGE_VERSION;

/// An opaque handle to a compiled grammar.
///
/// Grammars are immutable and live for the whole program, so the handle is a plain pointer-sized `Copy` value.
/// Two handles are equal if they refer to the same compiled grammar.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Grammar {
    raw: *const ffi::TSLanguage,
}

// safety: compiled grammars are immutable static tables
unsafe impl Send for Grammar {}
unsafe impl Sync for Grammar {}

impl Grammar {
    /// Loads the grammar exported by a grammar crate, e.g. `tree_sitter_json::LANGUAGE`.
    pub fn new(language: LanguageFn) -> Self {
        // safety: grammar entry points take no arguments and return a pointer to their static language table
        let raw = unsafe { (language.into_raw())() };
        Self { raw: raw.cast() }
    }

    /// # Safety
    /// `raw` must point to a valid language table that stays alive and unmodified for the rest of the program.
    #[inline]
    pub unsafe fn from_raw(raw: *const ffi::TSLanguage) -> Self {
        Self { raw }
    }

    #[inline]
    pub fn as_ptr(&self) -> *const ffi::TSLanguage {
        self.raw
    }

    /// The ABI version the grammar was generated for.
    #[inline]
    pub fn version(&self) -> u32 {
        unsafe { ffi::ts_language_abi_version(self.raw) }
    }

    /// The number of distinct node kinds in this grammar.
    pub fn node_kind_count(&self) -> usize {
        unsafe { ffi::ts_language_symbol_count(self.raw) as usize }
    }

    /// The name of the node kind with the given id, if the id exists.
    pub fn node_kind_for_id(&self, id: u16) -> Option<&'static str> {
        unsafe { static_str(ffi::ts_language_symbol_name(self.raw, id)) }
    }

    /// Looks up the id of a named or anonymous node kind by name.
    pub fn id_for_node_kind(&self, kind: &str, named: bool) -> Option<u16> {
        let len = u32::try_from(kind.len()).ok()?;
        let id = unsafe { ffi::ts_language_symbol_for_name(self.raw, kind.as_ptr().cast(), len, named) };
        // 0 is the builtin end-of-input symbol, which the engine also returns for unknown names
        (id != 0).then_some(id)
    }
}

impl From<LanguageFn> for Grammar {
    fn from(language: LanguageFn) -> Self {
        Self::new(language)
    }
}

impl fmt::Debug for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grammar")
            .field("ptr", &self.raw)
            .field("version", &self.version())
            .finish()
    }
}

/// # Safety
/// `ptr` must be null or point to a nul-terminated string owned by a grammar, which lives forever.
pub(crate) unsafe fn static_str(ptr: *const c_char) -> Option<&'static str> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok()
}
