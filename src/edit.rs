// src/edit.rs
//
// Span replacements produced by the formatter.

use crate::syntax::Span;

/// Replace `span` of the original text with `new_text`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextEdit {
    pub span: Span,
    pub new_text: String,
}

impl TextEdit {
    pub fn new(span: Span, new_text: impl Into<String>) -> Self {
        TextEdit {
            span,
            new_text: new_text.into(),
        }
    }
}

/// True if `edits` are sorted by start and no two of them overlap.
pub fn is_ordered(edits: &[TextEdit]) -> bool {
    edits
        .windows(2)
        .all(|pair| pair[0].span.end <= pair[1].span.start)
}

/// Applies sorted, disjoint `edits` to `text`.
pub fn apply_edits(text: &str, edits: &[TextEdit]) -> String {
    debug_assert!(is_ordered(edits), "edits must be sorted and disjoint");

    let grown: usize = edits.iter().map(|e| e.new_text.len()).sum();
    let mut out = String::with_capacity(text.len() + grown);
    let mut position = 0usize;
    for edit in edits {
        out.push_str(&text[position..edit.span.start]);
        out.push_str(&edit.new_text);
        position = edit.span.end;
    }
    out.push_str(&text[position..]);
    out
}
