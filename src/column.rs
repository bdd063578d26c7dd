// src/column.rs
//
// Column arithmetic matching the host editor:
// - a tab advances to the next multiple of the tab size,
// - every other character advances by one,
// - a line feed restarts counting at column 0.

use memchr::memrchr;

use crate::edit::TextEdit;
use crate::error::{FormatError, FormatResult};
use crate::syntax::Span;

/// Column after `text`, when `text` starts at `column`.
///
/// Only the part after the last line feed counts, and that part starts at
/// column 0 regardless of `column`.
pub fn column_after(text: &str, column: usize, tab_size: usize) -> usize {
    let (tail, mut column) = match memrchr(b'\n', text.as_bytes()) {
        Some(i) => (&text[i + 1..], 0),
        None => (text, column),
    };
    for c in tail.chars() {
        column += if c == '\t' { tab_size - column % tab_size } else { 1 };
    }
    column
}

/// Column at which `position` sits within its line of `src`.
pub fn initial_column(src: &str, position: usize, tab_size: usize) -> FormatResult<usize> {
    if position > src.len() {
        return Err(FormatError::PositionOutOfRange {
            position,
            len: src.len(),
        });
    }
    if !src.is_char_boundary(position) {
        return Err(FormatError::NotCharBoundary(position));
    }
    let line_start = memrchr(b'\n', &src.as_bytes()[..position]).map_or(0, |i| i + 1);
    Ok(column_after(&src[line_start..position], 0, tab_size))
}

/// Column after `span` of `src` once `edits` (all inside `span`, sorted and
/// disjoint) have been applied to it.
pub fn column_with_edits(
    src: &str,
    span: Span,
    edits: &[TextEdit],
    mut column: usize,
    tab_size: usize,
) -> usize {
    let mut position = span.start;

    for edit in edits {
        debug_assert!(edit.span.start >= position, "edits out of order");
        debug_assert!(edit.span.end <= span.end, "edit outside span");

        if edit.span.is_empty() && edit.new_text.is_empty() {
            continue;
        }
        if position < edit.span.start {
            column = column_after(&src[position..edit.span.start], column, tab_size);
        }
        if !edit.new_text.is_empty() {
            column = column_after(&edit.new_text, column, tab_size);
        }
        position = edit.span.end;
    }

    if position < span.end {
        column = column_after(&src[position..span.end], column, tab_size);
    }
    column
}

/// Appends `indent` columns of indentation, using tabs where allowed.
pub fn push_indent(buf: &mut String, indent: usize, use_tabs: bool, tab_size: usize) {
    if use_tabs {
        buf.extend(std::iter::repeat('\t').take(indent / tab_size));
        buf.extend(std::iter::repeat(' ').take(indent % tab_size));
    } else {
        buf.extend(std::iter::repeat(' ').take(indent));
    }
}
