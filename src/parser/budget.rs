//! Cooperative operation budget for a single parse call.
//!
//! The engine reports progress to a callback after every [`OPERATIONS_PER_CHECK`] parse operations. Each report
//! charges that many operations against the budget; once the budget is overdrawn the callback asks the engine to
//! stop. Cancellation only happens at these check points, so a parse may run up to one interval past its limit.

use tree_sitter::ffi;

/// How many engine operations pass between two progress reports.
pub(crate) const OPERATIONS_PER_CHECK: u64 = 100;

pub(super) type ProgressFn = unsafe extern "C" fn(state: *mut ffi::TSParseState) -> bool;

#[derive(Debug)]
pub(super) struct Budget {
    limit:     u64,
    spent:     u64,
    exhausted: bool,
}

impl Budget {
    pub(super) fn new(limit: u64) -> Self {
        Self {
            limit,
            spent: 0,
            exhausted: false,
        }
    }

    /// Charges one check interval. Returns `true` if the parse must stop.
    fn charge(&mut self) -> bool {
        self.spent = self.spent.saturating_add(OPERATIONS_PER_CHECK);
        if self.spent > self.limit {
            self.exhausted = true;
        }
        self.exhausted
    }

    #[inline]
    pub(super) fn limit(&self) -> u64 {
        self.limit
    }

    #[inline]
    pub(super) fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

/// Progress callback handed to the engine. The parse state's payload must point to a live [`Budget`].
pub(super) unsafe extern "C" fn charge(state: *mut ffi::TSParseState) -> bool {
    let budget = &mut *(*state).payload.cast::<Budget>();
    budget.charge()
}
