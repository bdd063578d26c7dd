// src/parse.rs
//
// Forgiving reader for documentation comments in source text.
//
// - A run of consecutive lines whose first non-blank characters are `///`
//   (but not `////`) is one comment. Its span runs from the first marker
//   through the last line terminator.
// - `/** ... */` starting a line is reported as a multi-line comment with no
//   content; those are never reformatted.
// - Comment content is XML-ish: text, start/end/empty tags with quoted
//   attributes, `<!-- -->`, `<![CDATA[ ]]>` and `<? ?>`. Whitespace between tag
//   parts may cross lines (and the markers of the following lines).
// - Nothing here fails. Broken markup becomes `Skipped` nodes, skipped tags
//   or missing end tags, and nothing ever reaches into the final line
//   terminator.

use memchr::{memchr, memmem};

use crate::syntax::{
    is_whitespace, Attribute, AttributeKind, CommentKind, Delimited, DocComment, Element, Span,
    Tag, TextToken, XmlNode,
};

const MARKER: &[u8] = b"///";

/* ============================== Document scan ============================ */

#[derive(Clone, Copy, Debug)]
struct DocLine {
    /// Start of the line, indentation included.
    start: usize,
    /// Position of the `///` marker.
    marker: usize,
    /// Position of the line feed (or end of text).
    end: usize,
    /// Start of the following line.
    next: usize,
}

impl DocLine {
    fn content_start(&self) -> usize {
        self.marker + MARKER.len()
    }
}

#[inline]
fn is_space_tab(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

/// Every documentation comment of `src`, in document order.
pub fn parse_document(src: &str) -> Vec<DocComment> {
    let s = src.as_bytes();
    let n = s.len();
    let mut comments = Vec::new();
    let mut group: Vec<DocLine> = Vec::new();
    let mut i = 0usize;

    while i < n {
        let end = memchr(b'\n', &s[i..]).map_or(n, |off| i + off);
        let next = (end + 1).min(n);
        let mut marker = i;
        while marker < end && is_space_tab(s[marker]) {
            marker += 1;
        }
        let rest = &s[marker..end];

        if rest.starts_with(MARKER) && !rest.starts_with(b"////") {
            group.push(DocLine {
                start: i,
                marker,
                end,
                next,
            });
            i = next;
            continue;
        }

        if let Some(comment) = single_line_comment(src, &group) {
            comments.push(comment);
        }
        group.clear();

        if rest.starts_with(b"/**") && !rest.starts_with(b"/**/") {
            let from = marker + 3;
            let close = memmem::find(&s[from..], b"*/").map_or(n, |off| from + off + 2);
            comments.push(DocComment {
                kind: CommentKind::MultiLine,
                span: Span::new(marker, close),
                content: Vec::new(),
                line_starts: Vec::new(),
            });
            i = memchr(b'\n', &s[close..]).map_or(n, |off| close + off + 1);
            continue;
        }

        i = next;
    }

    if let Some(comment) = single_line_comment(src, &group) {
        comments.push(comment);
    }
    comments
}

fn single_line_comment(src: &str, lines: &[DocLine]) -> Option<DocComment> {
    let (first, last) = (lines.first()?, lines.last()?);
    let s = src.as_bytes();

    // The final terminator (`\n` or `\r\n`) is never content.
    let mut limit = last.end;
    if last.next > last.end && limit > last.content_start() && s[limit - 1] == b'\r' {
        limit -= 1;
    }

    let exteriors = lines[1..]
        .iter()
        .map(|line| Span::new(line.start, line.content_start()))
        .collect();
    let content = ContentParser {
        src,
        s,
        pos: first.content_start(),
        limit,
        exteriors,
    }
    .parse();

    Some(DocComment {
        kind: CommentKind::SingleLine,
        span: Span::new(first.marker, last.next),
        content,
        line_starts: lines.iter().map(DocLine::content_start).collect(),
    })
}

/* ============================== Content parse ============================ */

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == ':'
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | ':' | '-' | '.')
}

fn attribute_kind(element: &str, attribute: &str) -> AttributeKind {
    match attribute {
        "cref" => AttributeKind::Cref,
        "name" if matches!(element, "param" | "paramref" | "typeparam" | "typeparamref") => {
            AttributeKind::Name
        }
        _ => AttributeKind::Text,
    }
}

/// An element whose end tag has not been seen yet.
struct Open {
    start_tag: Tag,
    content: Vec<XmlNode>,
}

impl Open {
    fn close(self, end_tag: Tag) -> XmlNode {
        XmlNode::Element(Element {
            start_tag: self.start_tag,
            content: self.content,
            end_tag,
        })
    }
}

enum Markup {
    Node(XmlNode),
    Start(Tag),
    End(Tag),
}

struct ContentParser<'a> {
    src: &'a str,
    s: &'a [u8],
    pos: usize,
    limit: usize,
    /// Indentation plus marker of each continuation line, in order.
    exteriors: Vec<Span>,
}

impl<'a> ContentParser<'a> {
    fn parse(mut self) -> Vec<XmlNode> {
        let mut root = Vec::new();
        let mut stack: Vec<Open> = Vec::new();

        while self.pos < self.limit {
            if self.s[self.pos] != b'<' {
                let node = self.text();
                push(&mut root, &mut stack, node);
                continue;
            }
            match self.markup() {
                Markup::Node(node) => push(&mut root, &mut stack, node),
                Markup::Start(tag) => stack.push(Open {
                    start_tag: tag,
                    content: Vec::new(),
                }),
                Markup::End(tag) => {
                    let name = tag.name.text(self.src);
                    let matching = stack
                        .iter()
                        .rposition(|open| open.start_tag.name.text(self.src) == name);
                    match matching {
                        Some(index) => {
                            while stack.len() > index + 1 {
                                if let Some(open) = stack.pop() {
                                    let node = open.close(Tag::missing(tag.span.start));
                                    push(&mut root, &mut stack, node);
                                }
                            }
                            if let Some(open) = stack.pop() {
                                let node = open.close(tag);
                                push(&mut root, &mut stack, node);
                            }
                        }
                        None => push(&mut root, &mut stack, XmlNode::Skipped(tag.span)),
                    }
                }
            }
        }

        while let Some(open) = stack.pop() {
            let node = open.close(Tag::missing(self.limit));
            push(&mut root, &mut stack, node);
        }
        root
    }

    fn text(&mut self) -> XmlNode {
        let end = memchr(b'<', &self.s[self.pos..self.limit]).map_or(self.limit, |off| self.pos + off);
        XmlNode::Text(self.tokens_until(end))
    }

    fn markup(&mut self) -> Markup {
        let start = self.pos;
        if self.starts_with("<!--") {
            return Markup::Node(match self.delimited(4, b"-->") {
                Some(d) => XmlNode::Comment(d),
                None => XmlNode::Skipped(Span::new(start, self.limit)),
            });
        }
        if self.starts_with("<![CDATA[") {
            return Markup::Node(match self.delimited(9, b"]]>") {
                Some(d) => XmlNode::CData(d),
                None => XmlNode::Skipped(Span::new(start, self.limit)),
            });
        }
        if self.starts_with("<?") {
            self.pos = start + 2;
            let span = match self.find(b"?>") {
                Some(at) => Span::new(start, at + 2),
                None => Span::new(start, self.limit),
            };
            self.pos = span.end;
            return Markup::Node(XmlNode::ProcessingInstruction(span));
        }
        if self.starts_with("</") {
            return self.end_tag(start);
        }
        self.start_tag(start)
    }

    fn delimited(&mut self, open_len: usize, close: &[u8]) -> Option<Delimited> {
        let open = Span::new(self.pos, self.pos + open_len);
        self.pos = open.end;
        let Some(at) = self.find(close) else {
            self.pos = self.limit;
            return None;
        };
        let tokens = self.tokens_until(at);
        self.pos = at + close.len();
        Some(Delimited {
            open,
            tokens,
            close: Span::new(at, self.pos),
        })
    }

    fn end_tag(&mut self, start: usize) -> Markup {
        let open = Span::new(start, start + 2);
        self.pos = open.end;
        self.skip_ws();
        let Some(name) = self.name() else {
            self.pos = open.end;
            return Markup::Node(XmlNode::Skipped(open));
        };
        self.skip_ws();
        if !self.starts_with(">") {
            self.pos = name.end;
            return Markup::Node(XmlNode::Skipped(Span::new(start, name.end)));
        }
        let close = Span::new(self.pos, self.pos + 1);
        self.pos = close.end;
        Markup::End(Tag {
            span: Span::new(start, close.end),
            open,
            name,
            attributes: Vec::new(),
            close,
            missing: false,
            skipped: false,
        })
    }

    fn start_tag(&mut self, start: usize) -> Markup {
        let open = Span::new(start, start + 1);
        self.pos = open.end;
        self.skip_ws();
        let Some(name) = self.name() else {
            self.pos = open.end;
            return Markup::Node(XmlNode::Skipped(open));
        };
        let element = name.text(self.src);

        let mut attributes = Vec::new();
        loop {
            let before = self.pos;
            self.skip_ws();
            for (close, empty) in [(">", false), ("/>", true)] {
                if self.starts_with(close) {
                    let close = Span::new(self.pos, self.pos + close.len());
                    self.pos = close.end;
                    let tag = Tag {
                        span: Span::new(start, close.end),
                        open,
                        name,
                        attributes,
                        close,
                        missing: false,
                        skipped: false,
                    };
                    return if empty {
                        Markup::Node(XmlNode::EmptyElement(tag))
                    } else {
                        Markup::Start(tag)
                    };
                }
            }
            if self.pos == before {
                break;
            }
            match self.attribute(element) {
                Some(attribute) => attributes.push(attribute),
                None => break,
            }
        }
        self.recover(start, name)
    }

    fn attribute(&mut self, element: &str) -> Option<Attribute> {
        let name = self.name()?;
        self.skip_ws();
        if !self.starts_with("=") {
            return None;
        }
        let equals = Span::new(self.pos, self.pos + 1);
        self.pos = equals.end;
        self.skip_ws();

        let quote = *self.s.get(self.pos).filter(|&&b| b == b'"' || b == b'\'')?;
        if self.pos >= self.limit {
            return None;
        }
        let open_quote = Span::new(self.pos, self.pos + 1);
        self.pos = open_quote.end;
        let at = memchr(quote, &self.s[self.pos..self.limit])? + self.pos;
        if memchr(b'<', &self.s[self.pos..at]).is_some() {
            return None;
        }
        let value = self.tokens_until(at);
        let close_quote = Span::new(at, at + 1);
        self.pos = close_quote.end;

        Some(Attribute {
            span: Span::new(name.start, close_quote.end),
            name,
            equals,
            open_quote,
            value,
            close_quote,
            kind: attribute_kind(element, name.text(self.src)),
        })
    }

    /// A start tag that went wrong after its name. If a `>` follows on the
    /// same line the whole tag is kept as a skipped tag; otherwise only `<name`
    /// is skipped and reading resumes after it.
    fn recover(&mut self, start: usize, name: Span) -> Markup {
        let from = self.pos.max(name.end);
        let line_end = memchr(b'\n', &self.s[from..self.limit]).map_or(self.limit, |off| from + off);
        match memchr(b'>', &self.s[from..line_end]) {
            Some(off) => {
                let end = from + off + 1;
                self.pos = end;
                let tag = Tag::skipped(Span::new(start, end), name);
                if self.s[end - 2] == b'/' {
                    Markup::Node(XmlNode::EmptyElement(tag))
                } else {
                    Markup::Start(tag)
                }
            }
            None => {
                self.pos = name.end;
                Markup::Node(XmlNode::Skipped(Span::new(start, name.end)))
            }
        }
    }

    /* ------------------------------ Cursor ------------------------------- */

    fn starts_with(&self, needle: &str) -> bool {
        self.s[self.pos..self.limit].starts_with(needle.as_bytes())
    }

    fn find(&self, needle: &[u8]) -> Option<usize> {
        memmem::find(&self.s[self.pos..self.limit], needle).map(|off| self.pos + off)
    }

    fn peek_char(&self) -> Option<char> {
        self.src[self.pos..self.limit].chars().next()
    }

    /// End of the line terminator at `pos`, if there is one before the limit.
    fn new_line_at(&self, pos: usize) -> Option<usize> {
        if pos >= self.limit {
            return None;
        }
        match self.s[pos] {
            b'\n' => Some(pos + 1),
            b'\r' if self.s.get(pos + 1) == Some(&b'\n') => Some(pos + 2),
            _ => None,
        }
    }

    /// Skips the indentation and marker of the line starting at `pos`.
    fn skip_exterior(&self, pos: usize) -> usize {
        match self.exteriors.binary_search_by_key(&pos, |span| span.start) {
            Ok(index) => self.exteriors[index].end,
            Err(_) => pos,
        }
    }

    fn skip_ws(&mut self) {
        loop {
            if let Some(end) = self.new_line_at(self.pos) {
                self.pos = self.skip_exterior(end);
                continue;
            }
            match self.peek_char() {
                Some(c) if is_whitespace(c) => self.pos += c.len_utf8(),
                _ => break,
            }
        }
    }

    fn name(&mut self) -> Option<Span> {
        let start = self.pos;
        let first = self.peek_char().filter(|&c| is_name_start(c))?;
        self.pos += first.len_utf8();
        while let Some(c) = self.peek_char().filter(|&c| is_name_char(c)) {
            self.pos += c.len_utf8();
        }
        Some(Span::new(start, self.pos))
    }

    /// Text tokens from the cursor up to `end`: literals split at line
    /// terminators, with the exterior of each following line left out.
    fn tokens_until(&mut self, end: usize) -> Vec<TextToken> {
        let mut tokens = Vec::new();
        let mut start = self.pos;
        while self.pos < end {
            match self.new_line_at(self.pos) {
                Some(line_end) => {
                    if start < self.pos {
                        tokens.push(TextToken::literal(Span::new(start, self.pos)));
                    }
                    tokens.push(TextToken::new_line(Span::new(self.pos, line_end)));
                    self.pos = self.skip_exterior(line_end);
                    start = self.pos;
                }
                None => self.pos += 1,
            }
        }
        if start < end {
            tokens.push(TextToken::literal(Span::new(start, end)));
        }
        self.pos = self.pos.max(end);
        tokens
    }
}

fn push(root: &mut Vec<XmlNode>, stack: &mut [Open], node: XmlNode) {
    match stack.last_mut() {
        Some(open) => open.content.push(node),
        None => root.push(node),
    }
}
