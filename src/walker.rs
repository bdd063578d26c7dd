// src/walker.rs
//
// Depth-first walk over a comment's content, turning nodes into words and
// breaks for the break engine.

use crate::breaker::{BreakMode, Breaker};
use crate::edit::TextEdit;
use crate::element::{classify, ElementFormatting as F};
use crate::syntax::{
    is_whitespace, Attribute, AttributeKind, Element, Span, Tag, TextToken, TextTokenKind, XmlNode,
};

fn is_space(c: char) -> bool {
    is_whitespace(c) || c == '\r' || c == '\n'
}

fn ends_sentence(c: char) -> bool {
    matches!(c, '!' | '.' | ':' | '?')
}

pub(crate) struct Walker<'a> {
    src: &'a str,
    breaker: Breaker<'a>,
}

impl<'a> Walker<'a> {
    pub fn new(breaker: Breaker<'a>) -> Self {
        Walker {
            src: breaker.src(),
            breaker,
        }
    }

    pub fn finish(self, end: usize) -> Vec<TextEdit> {
        self.breaker.finish(end)
    }

    pub fn nodes(&mut self, nodes: &[XmlNode]) {
        for node in nodes {
            match node {
                XmlNode::Text(tokens) => self.text(tokens),
                XmlNode::Element(element) => self.element(element),
                XmlNode::EmptyElement(tag) => self.empty_element(tag),
                XmlNode::Comment(d) | XmlNode::CData(d) => {
                    self.breaker.add_word(d.open);
                    self.text(&d.tokens);
                    self.breaker.add_word(d.close);
                }
                XmlNode::ProcessingInstruction(span) => {
                    self.breaker.force_break(BreakMode::LINE_BREAK);
                    self.breaker.add_word(*span);
                    self.breaker.force_break(BreakMode::LINE_BREAK);
                }
                XmlNode::Skipped(span) => self.breaker.add_word(*span),
            }
        }
    }

    fn element(&mut self, element: &Element) {
        let f = classify(element.name(self.src));

        if f.contains(F::BLOCK) {
            self.breaker.force_break(BreakMode::LINE_BREAK);
        }
        self.tag(&element.start_tag);
        if f.contains(F::PRESERVE) {
            self.breaker.enter_preserve();
        }
        if f.contains(F::SNUG_START) {
            self.breaker.force_break(BreakMode::SUPPRESS_WORD_BREAK);
        } else if f.contains(F::BLOCK) {
            self.breaker.force_break(BreakMode::LINE_BREAK);
        }
        if f.contains(F::INDENT) {
            self.breaker.indent();
        }

        self.nodes(&element.content);

        if f.contains(F::SNUG_END) {
            self.breaker.force_break(BreakMode::SUPPRESS_WORD_BREAK);
        } else if f.contains(F::BLOCK) {
            self.breaker.force_break(BreakMode::LINE_BREAK);
        }

        // A snug block whose content already forced a line break (a nested
        // block) lays out its end tag like a plain block.
        let unsnug = f.contains(F::BLOCK | F::SNUG)
            && self.breaker.mode().contains(BreakMode::LINE_BREAK);
        let unindent_after_tag = f.contains(F::SNUG_END) && !unsnug;

        if f.contains(F::INDENT) && !unindent_after_tag {
            self.breaker.unindent();
        }
        if f.contains(F::PRESERVE) {
            self.breaker.exit_preserve();
        }
        self.tag(&element.end_tag);
        if f.contains(F::BLOCK) {
            self.breaker.force_break(BreakMode::LINE_BREAK);
        }
        if f.contains(F::INDENT) && unindent_after_tag {
            self.breaker.unindent();
        }
    }

    fn empty_element(&mut self, tag: &Tag) {
        let f = classify(tag.name.text(self.src));
        if f.contains(F::BLOCK) {
            self.breaker.force_break(BreakMode::LINE_BREAK);
        }
        self.tag(tag);
        if f.contains(F::BLOCK) {
            self.breaker.force_break(BreakMode::LINE_BREAK);
        }
    }

    /// Tag words: no whitespace inside the tag except one space in front of
    /// each attribute.
    fn tag(&mut self, tag: &Tag) {
        if tag.missing {
            return;
        }
        if tag.skipped {
            self.breaker.add_word(tag.span);
            return;
        }

        self.breaker.add_word(tag.open);
        self.gap(tag.open.end, tag.name.start, "");
        self.breaker.add_word(tag.name);
        let mut end = tag.name.end;
        for attribute in &tag.attributes {
            self.gap(end, attribute.span.start, " ");
            self.attribute(attribute);
            end = attribute.span.end;
        }
        self.gap(end, tag.close.start, "");
        self.breaker.add_word(tag.close);
    }

    fn attribute(&mut self, attribute: &Attribute) {
        self.breaker.add_word(attribute.name);
        self.gap(attribute.name.end, attribute.equals.start, "");
        self.breaker.add_word(attribute.equals);
        self.gap(attribute.equals.end, attribute.open_quote.start, "");
        self.breaker.add_word(attribute.open_quote);

        let multiline = attribute
            .value
            .iter()
            .any(|t| t.kind == TextTokenKind::NewLine);
        match attribute.kind {
            AttributeKind::Cref | AttributeKind::Name if !multiline => {
                let inner = Span::new(attribute.open_quote.end, attribute.close_quote.start);
                let text = inner.text(self.src);
                let start = inner.start + (text.len() - text.trim_start().len());
                let end = inner.end - (text.len() - text.trim_end().len());
                if start < end {
                    self.gap(inner.start, start, "");
                    self.breaker.add_word(Span::new(start, end));
                    self.gap(end, inner.end, "");
                } else {
                    self.gap(inner.start, inner.end, "");
                }
            }
            _ => {
                for token in &attribute.value {
                    match token.kind {
                        TextTokenKind::Literal => self.breaker.add_word(token.span),
                        TextTokenKind::NewLine => {
                            self.breaker.force_break(BreakMode::PRESERVE);
                            self.breaker.add_break(token.span);
                        }
                    }
                }
            }
        }

        self.breaker.add_word(attribute.close_quote);
    }

    fn gap(&mut self, start: usize, end: usize, new_text: &str) {
        if start < end || !new_text.is_empty() {
            self.breaker.queue_edit(Span::new(start, end), new_text);
        }
    }

    fn text(&mut self, tokens: &[TextToken]) {
        for token in tokens {
            self.text_token(token.span);
        }
    }

    /// Splits a token into words and breaks. After `! . : ?` one whitespace
    /// character followed by more whitespace belongs to the word, which keeps
    /// two spaces after a sentence.
    fn text_token(&mut self, span: Span) {
        let text = span.text(self.src);
        let mut word_start = 0;
        let mut break_start = 0;
        let mut sentence_end = false;

        let mut chars = text.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            let next_i = i + c.len_utf8();
            let mut space = is_space(c);

            if space && sentence_end {
                let next = match chars.peek() {
                    Some(&(_, next)) => next,
                    None => self.src[span.end..].chars().next().unwrap_or(' '),
                };
                if is_space(next) {
                    space = false;
                    sentence_end = false;
                }
            }

            if space {
                if word_start < i {
                    self.breaker
                        .add_word(Span::new(span.start + word_start, span.start + i));
                }
                word_start = next_i;
                sentence_end = false;
            } else {
                if break_start < i {
                    self.breaker
                        .add_break(Span::new(span.start + break_start, span.start + i));
                }
                break_start = next_i;
                if ends_sentence(c) {
                    sentence_end = true;
                } else if c.is_alphanumeric() {
                    sentence_end = false;
                }
            }
        }

        if word_start < text.len() {
            self.breaker
                .add_word(Span::new(span.start + word_start, span.end));
        }
        if break_start < text.len() {
            self.breaker
                .add_break(Span::new(span.start + break_start, span.end));
        }
    }
}
