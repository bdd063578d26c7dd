// src/breaker.rs
//
// The break engine: a two-slot buffer (pending break, pending word) whose
// break is only rendered once the word after it is known.
//
// - A break region runs from the end of the last committed word to the start
//   of the next one. It covers whitespace, line terminators, the exterior
//   indentation and the `///` markers in between.
// - Requested break modes accumulate until the next commit.
// - Edits are appended in source order: the break edit, then the word's
//   queued micro-edits.

use bitflags::bitflags;
use tracing::trace;

use crate::column::{column_after, column_with_edits, push_indent};
use crate::config::FormatConfig;
use crate::edit::TextEdit;
use crate::emitter::{rendered_len, EditQueue};
use crate::syntax::Span;

/// Line marker written at the start of every rendered comment line.
pub(crate) const MARKER: &str = "///";

bitflags! {
    /// How the next break is rendered.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct BreakMode: u8 {
        /// The break in front of the first word of the comment.
        const FIRST_BREAK = 1 << 0;
        /// Always a line break.
        const LINE_BREAK = 1 << 1;
        /// No space; a line break only on overflow.
        const SUPPRESS_WORD_BREAK = 1 << 2;
        /// Copy the break from the source, renormalising exterior indentation.
        const PRESERVE = 1 << 3;
    }
}

pub(crate) struct Breaker<'a> {
    src: &'a str,
    config: &'a FormatConfig,

    column: usize,
    exterior_indent: usize,
    interior_prefix: &'a str,
    interior_indent: usize,
    preserve: usize,

    break_start: usize,
    break_text: String,
    word: Option<Span>,
    mode: BreakMode,

    queue: EditQueue,
    word_edits: Vec<TextEdit>,
    edits: Vec<TextEdit>,
}

impl<'a> Breaker<'a> {
    /// State for a comment whose first marker is at `start`, in column
    /// `exterior_indent`.
    pub fn new(
        src: &'a str,
        config: &'a FormatConfig,
        start: usize,
        exterior_indent: usize,
        interior_prefix: &'a str,
    ) -> Self {
        Breaker {
            src,
            config,
            column: exterior_indent,
            exterior_indent,
            interior_prefix,
            interior_indent: 0,
            preserve: 0,
            break_start: start,
            break_text: String::new(),
            word: None,
            mode: BreakMode::FIRST_BREAK,
            queue: EditQueue::default(),
            word_edits: Vec::new(),
            edits: Vec::new(),
        }
    }

    pub fn src(&self) -> &'a str {
        self.src
    }

    pub fn mode(&self) -> BreakMode {
        self.mode
    }

    pub fn indent(&mut self) {
        self.interior_indent += self.config.indent_size;
    }

    pub fn unindent(&mut self) {
        debug_assert!(self.interior_indent >= self.config.indent_size);
        self.interior_indent = self.interior_indent.saturating_sub(self.config.indent_size);
    }

    pub fn enter_preserve(&mut self) {
        self.preserve += 1;
    }

    pub fn exit_preserve(&mut self) {
        debug_assert!(self.preserve > 0);
        self.preserve = self.preserve.saturating_sub(1);
    }

    /// Adds non-breaking content. Content touching the pending word extends
    /// it; anything else commits the pending word first.
    pub fn add_word(&mut self, span: Span) {
        if span.is_empty() {
            return;
        }
        match self.word {
            None => self.word = Some(span),
            Some(word) if span.start == word.end => {
                self.word = Some(Span::new(word.start, span.end));
            }
            Some(word) => {
                debug_assert!(span.start > word.end, "words must move forward");
                self.force_break(BreakMode::empty());
                self.push_gap(Span::new(word.end, span.start));
                self.word = Some(span);
            }
        }
    }

    /// Adds breakable whitespace. Commits the pending word, if any.
    pub fn add_break(&mut self, span: Span) {
        if span.is_empty() {
            return;
        }
        if self.word.is_some() {
            self.force_break(BreakMode::empty());
        }
        self.break_text.push_str(span.text(self.src));
    }

    /// Replaces `span`, which directly follows the pending word, with
    /// `new_text` when the word is committed. The span becomes part of the
    /// word, so what follows it stays glued.
    pub fn queue_edit(&mut self, span: Span, new_text: &str) {
        self.queue.enqueue(self.src, span, new_text);
        self.word = Some(match self.word {
            Some(word) => {
                debug_assert_eq!(word.end, span.start, "queued edit must follow the word");
                Span::new(word.start, span.end)
            }
            None => span,
        });
    }

    /// Requests `next` for the break after the pending word and commits that
    /// word. Without a pending word the request is merged into the current
    /// break instead.
    pub fn force_break(&mut self, next: BreakMode) {
        let mut next = next;
        if self.preserve > 0 {
            next |= BreakMode::PRESERVE;
        }

        let Some(word) = self.word else {
            self.mode |= next;
            return;
        };
        debug_assert!(self.break_start <= word.start);

        self.queue.drain_into(word, &mut self.word_edits);
        let word_len = rendered_len(self.src, word, &self.word_edits);

        let text = self.render_break(word_len);
        let tab_size = self.config.tab_size;
        self.column = column_after(&text, self.column, tab_size);
        trace!(
            start = self.break_start,
            end = word.start,
            mode = ?self.mode,
            word_len,
            column = self.column,
            "commit break"
        );
        self.push_edit(Span::new(self.break_start, word.start), text);

        self.column = column_with_edits(self.src, word, &self.word_edits, self.column, tab_size);
        self.edits.append(&mut self.word_edits);

        self.break_text.clear();
        self.break_start = word.end;
        self.word = None;
        self.mode = next;
    }

    /// Commits the last word and renders the break through `end`, the end of
    /// the comment's last line.
    pub fn finish(mut self, end: usize) -> Vec<TextEdit> {
        self.force_break(BreakMode::empty());
        debug_assert!(self.queue.is_empty());
        debug_assert!(self.break_start <= end);

        let mut text = String::new();
        if self.mode.contains(BreakMode::FIRST_BREAK) {
            text.push_str(MARKER);
            text.push_str(self.interior_prefix);
        }
        text.push_str(self.config.new_line.as_str());
        self.push_edit(Span::new(self.break_start, end), text);
        self.edits
    }

    fn render_break(&self, word_len: usize) -> String {
        let mut text = String::new();
        if self.mode.contains(BreakMode::FIRST_BREAK) {
            text.push_str(MARKER);
            self.push_interior(&mut text);
        } else if self.mode.contains(BreakMode::PRESERVE) {
            for c in self.break_text.chars() {
                match c {
                    '\r' => {}
                    '\n' => self.push_line_start(&mut text),
                    c => text.push(c),
                }
            }
        } else {
            let space = if self.mode.contains(BreakMode::SUPPRESS_WORD_BREAK) {
                ""
            } else {
                " "
            };
            if self.mode.contains(BreakMode::LINE_BREAK)
                || self.column + space.len() + word_len > self.config.wrap_column
            {
                self.push_line_start(&mut text);
                self.push_interior(&mut text);
            } else {
                text.push_str(space);
            }
        }
        text
    }

    /// Line terminator, exterior indentation and marker.
    fn push_line_start(&self, buf: &mut String) {
        buf.push_str(self.config.new_line.as_str());
        push_indent(
            buf,
            self.exterior_indent,
            self.config.use_tabs,
            self.config.tab_size,
        );
        buf.push_str(MARKER);
    }

    fn push_interior(&self, buf: &mut String) {
        buf.push_str(self.interior_prefix);
        buf.extend(std::iter::repeat(' ').take(self.interior_indent));
    }

    /// Source text between two words, minus the exterior indentation and
    /// marker of each line it crosses.
    fn push_gap(&mut self, span: Span) {
        let mut lines = span.text(self.src).split_inclusive('\n');
        if let Some(first) = lines.next() {
            self.break_text.push_str(first);
        }
        for line in lines {
            let line = line.trim_start_matches([' ', '\t']);
            self.break_text.push_str(line.strip_prefix(MARKER).unwrap_or(line));
        }
    }

    fn push_edit(&mut self, span: Span, text: String) {
        if span.text(self.src) != text {
            self.edits.push(TextEdit::new(span, text));
        }
    }
}
