// src/emitter.rs
//
// Micro-edits inside the word being accumulated (tag and attribute spacing).
// They are held back until the word is committed, because the word's rendered
// length depends on them.

use std::collections::VecDeque;

use crate::edit::TextEdit;
use crate::syntax::Span;

#[derive(Debug, Default)]
pub(crate) struct EditQueue {
    pending: VecDeque<TextEdit>,
}

impl EditQueue {
    /// Queues `span -> new_text` unless the source already reads `new_text`.
    /// Returns whether an edit was stored.
    pub fn enqueue(&mut self, src: &str, span: Span, new_text: &str) -> bool {
        if span.text(src) == new_text {
            return false;
        }
        debug_assert!(
            self.pending.back().map_or(true, |last| last.span.end <= span.start),
            "queued edits must ascend"
        );
        self.pending.push_back(TextEdit::new(span, new_text));
        true
    }

    /// Moves every queued edit that starts inside `word` to `out`.
    pub fn drain_into(&mut self, word: Span, out: &mut Vec<TextEdit>) {
        while let Some(edit) = self.pending.front() {
            if edit.span.start >= word.end {
                break;
            }
            debug_assert!(edit.span.start >= word.start);
            debug_assert!(edit.span.end <= word.end);
            if let Some(edit) = self.pending.pop_front() {
                out.push(edit);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Length in characters of `span` once `edits` (inside it) are applied.
pub(crate) fn rendered_len(src: &str, span: Span, edits: &[TextEdit]) -> usize {
    let original = span.text(src).chars().count();
    edits.iter().fold(original, |len, edit| {
        len + edit.new_text.chars().count() - edit.span.text(src).chars().count()
    })
}
