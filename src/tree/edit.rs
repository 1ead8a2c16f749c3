use std::fmt;

#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};
use tree_sitter::ffi;

/// A zero-based row/column position in the source. Columns count bytes, not characters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct Point {
    pub row:    u32,
    pub column: u32,
}

impl Point {
    #[inline]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// The position of byte `offset` in `source`. Offsets past the end are clamped to the end of `source`.
    pub fn of_byte(source: &[u8], offset: u32) -> Self {
        let end = (offset as usize).min(source.len());
        Self::default().advance(&source[..end])
    }

    /// The position reached after `text` was written starting at `self`.
    pub fn advance(self, text: &[u8]) -> Self {
        match text.iter().rposition(|&b| b == b'\n') {
            Some(last_newline) => {
                let newlines = text.iter().filter(|&&b| b == b'\n').count();
                Self {
                    row:    self.row.saturating_add(saturate(newlines)),
                    column: saturate(text.len() - last_newline - 1),
                }
            }
            None => Self {
                row:    self.row,
                column: self.column.saturating_add(saturate(text.len())),
            },
        }
    }

    #[inline]
    pub(crate) fn from_raw(raw: ffi::TSPoint) -> Self {
        Self {
            row:    raw.row,
            column: raw.column,
        }
    }

    #[inline]
    pub(crate) fn into_raw(self) -> ffi::TSPoint {
        ffi::TSPoint {
            row:    self.row,
            column: self.column,
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.column)
    }
}

/// Describes one atomic text change, in terms of both byte offsets and positions.
///
/// Edits must be passed to [`Tree::edit`](crate::Tree::edit) in the order they happened, and all of them before
/// the tree is handed back to [`Parser::parse`](crate::Parser::parse). Skipping or reordering edits makes the
/// reparse wrong, not merely slow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct InputEdit {
    pub start_byte:       u32,
    pub old_end_byte:     u32,
    pub new_end_byte:     u32,
    pub start_position:   Point,
    pub old_end_position: Point,
    pub new_end_position: Point,
}

impl InputEdit {
    /// Describes replacing `old_source[start..old_end]` with `replacement`, computing all positions from the
    /// pre-edit source.
    pub fn replace(old_source: &[u8], start: u32, old_end: u32, replacement: &[u8]) -> Self {
        let start_position = Point::of_byte(old_source, start);
        Self {
            start_byte: start,
            old_end_byte: old_end,
            new_end_byte: start.saturating_add(saturate(replacement.len())),
            start_position,
            old_end_position: Point::of_byte(old_source, old_end),
            new_end_position: start_position.advance(replacement),
        }
    }

    /// Change in source length caused by this edit, in bytes.
    pub fn byte_delta(&self) -> i64 {
        i64::from(self.new_end_byte) - i64::from(self.old_end_byte)
    }

    pub(crate) fn to_raw(&self) -> ffi::TSInputEdit {
        ffi::TSInputEdit {
            start_byte:    self.start_byte,
            old_end_byte:  self.old_end_byte,
            new_end_byte:  self.new_end_byte,
            start_point:   self.start_position.into_raw(),
            old_end_point: self.old_end_position.into_raw(),
            new_end_point: self.new_end_position.into_raw(),
        }
    }
}

#[inline]
fn saturate(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
