// src/syntax.rs
//
// The comment content tree consumed by the formatter.
//
// - All positions are byte offsets into the whole document text.
// - Line markers (`///`) and the indentation in front of them are not tokens.
//   They live in the gap between the last token of one line and the first
//   token of the next, so anything spanning that gap covers them too.
// - Malformed markup shows up as `Skipped` nodes or as tags flagged `skipped`
//   (or `missing`), never as an error.

use std::fmt;

/// A half-open byte range `[start, end)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Span { start, end }
    }

    #[inline]
    pub fn empty(at: usize) -> Self {
        Span { start: at, end: at }
    }

    #[inline]
    pub fn len(self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// Selection semantics: a zero-length span selects what strictly
    /// surrounds it.
    #[inline]
    pub fn overlaps(self, other: Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    #[inline]
    pub fn text(self, src: &str) -> &str {
        &src[self.start..self.end]
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Whitespace as far as word breaking is concerned: space separators, tab,
/// vertical tab and form feed. Line terminators are not included.
pub fn is_whitespace(c: char) -> bool {
    matches!(
        c,
        ' ' | '\t'
            | '\u{0B}'
            | '\u{0C}'
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
    )
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextTokenKind {
    /// Character data up to (not including) a line terminator.
    Literal,
    /// `\n` or `\r\n`.
    NewLine,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextToken {
    pub kind: TextTokenKind,
    pub span: Span,
}

impl TextToken {
    pub fn literal(span: Span) -> Self {
        TextToken { kind: TextTokenKind::Literal, span }
    }

    pub fn new_line(span: Span) -> Self {
        TextToken { kind: TextTokenKind::NewLine, span }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttributeKind {
    /// Free text; embedded line breaks are kept.
    Text,
    /// `cref="..."`: a single reference, inner whitespace trimmed.
    Cref,
    /// `name="..."` on parameter elements: a single identifier.
    Name,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub span: Span,
    pub name: Span,
    pub equals: Span,
    pub open_quote: Span,
    pub value: Vec<TextToken>,
    pub close_quote: Span,
    pub kind: AttributeKind,
}

/// A start, end or empty-element tag.
///
/// `open` is `<` or `</`; `close` is `>` or `/>`. A `missing` tag has no
/// source text (all spans are empty). A `skipped` tag could not be parsed
/// into parts and is copied verbatim as `span`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tag {
    pub span: Span,
    pub open: Span,
    pub name: Span,
    pub attributes: Vec<Attribute>,
    pub close: Span,
    pub missing: bool,
    pub skipped: bool,
}

impl Tag {
    pub fn missing(at: usize) -> Self {
        let span = Span::empty(at);
        Tag {
            span,
            open: span,
            name: span,
            attributes: Vec::new(),
            close: span,
            missing: true,
            skipped: false,
        }
    }

    pub fn skipped(span: Span, name: Span) -> Self {
        Tag {
            span,
            open: Span::empty(span.start),
            name,
            attributes: Vec::new(),
            close: Span::empty(span.end),
            missing: false,
            skipped: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    pub start_tag: Tag,
    pub content: Vec<XmlNode>,
    pub end_tag: Tag,
}

impl Element {
    /// The element name, taken from the end tag when the start tag is missing.
    pub fn name<'s>(&self, src: &'s str) -> &'s str {
        let tag = if self.start_tag.missing {
            &self.end_tag
        } else {
            &self.start_tag
        };
        tag.name.text(src)
    }
}

/// `<!-- ... -->` or `<![CDATA[ ... ]]>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Delimited {
    pub open: Span,
    pub tokens: Vec<TextToken>,
    pub close: Span,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum XmlNode {
    Text(Vec<TextToken>),
    Element(Element),
    EmptyElement(Tag),
    Comment(Delimited),
    CData(Delimited),
    ProcessingInstruction(Span),
    /// Unrecognised or broken markup, copied verbatim.
    Skipped(Span),
}

impl XmlNode {
    pub fn span(&self) -> Span {
        match self {
            XmlNode::Text(tokens) => match (tokens.first(), tokens.last()) {
                (Some(first), Some(last)) => Span::new(first.span.start, last.span.end),
                _ => Span::default(),
            },
            XmlNode::Element(e) => Span::new(e.start_tag.span.start, e.end_tag.span.end),
            XmlNode::EmptyElement(tag) => tag.span,
            XmlNode::Comment(d) | XmlNode::CData(d) => Span::new(d.open.start, d.close.end),
            XmlNode::ProcessingInstruction(span) | XmlNode::Skipped(span) => *span,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommentKind {
    /// `///` on every line.
    SingleLine,
    /// `/** ... */`; recognised but never reformatted.
    MultiLine,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocComment {
    pub kind: CommentKind,
    /// From the first marker through the last line terminator.
    pub span: Span,
    pub content: Vec<XmlNode>,
    /// Position right after each line's `///` marker, first line included.
    pub line_starts: Vec<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_classes() {
        for c in [' ', '\t', '\u{0B}', '\u{0C}', '\u{A0}', '\u{2003}', '\u{3000}'] {
            assert!(is_whitespace(c), "{c:?}");
        }
        for c in ['\n', '\r', 'a', '\u{200B}', '.'] {
            assert!(!is_whitespace(c), "{c:?}");
        }
    }

    #[test]
    fn empty_span_overlaps_only_what_surrounds_it() {
        let comment = Span::new(10, 20);
        assert!(Span::empty(15).overlaps(comment));
        assert!(!Span::empty(10).overlaps(comment));
        assert!(!Span::empty(20).overlaps(comment));
        assert!(Span::new(0, 11).overlaps(comment));
        assert!(!Span::new(0, 10).overlaps(comment));
    }

    #[test]
    fn element_name_falls_back_to_end_tag() {
        let src = "x</para>";
        let element = Element {
            start_tag: Tag::missing(0),
            content: Vec::new(),
            end_tag: Tag {
                span: Span::new(1, 8),
                open: Span::new(1, 3),
                name: Span::new(3, 7),
                attributes: Vec::new(),
                close: Span::new(7, 8),
                missing: false,
                skipped: false,
            },
        };
        assert_eq!(element.name(src), "para");
        assert_eq!(format!("{:?}", element.end_tag.name), "3..7");
    }
}
