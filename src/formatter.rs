// src/formatter.rs
//
// Per-comment driver plus the document-level entry points.

use tracing::debug;

use crate::breaker::Breaker;
use crate::column::initial_column;
use crate::config::FormatConfig;
use crate::edit::TextEdit;
use crate::error::{FormatError, FormatResult};
use crate::parse::parse_document;
use crate::syntax::{is_whitespace, CommentKind, DocComment, Span};
use crate::walker::Walker;

/// Edits that lay out one documentation comment of `src`.
///
/// Multi-line (`/** */`) comments are left alone and yield no edits.
#[tracing::instrument(level = "debug", skip_all, fields(start = comment.span.start))]
pub fn format_comment(
    src: &str,
    comment: &DocComment,
    config: &FormatConfig,
) -> FormatResult<Vec<TextEdit>> {
    config.validate()?;
    if comment.kind != CommentKind::SingleLine {
        return Ok(Vec::new());
    }
    check_span(src, comment.span)?;

    let exterior_indent = initial_column(src, comment.span.start, config.tab_size)?;
    let prefix = interior_prefix(src, comment);

    let breaker = Breaker::new(src, config, comment.span.start, exterior_indent, prefix);
    let mut walker = Walker::new(breaker);
    walker.nodes(&comment.content);
    let edits = walker.finish(comment.span.end);

    debug!(exterior_indent, prefix = ?prefix, edits = edits.len(), "formatted comment");
    Ok(edits)
}

/// Edits for every documentation comment in `src`.
pub fn format_document(src: &str, config: &FormatConfig) -> FormatResult<Vec<TextEdit>> {
    format_comments(src, parse_document(src).iter(), config)
}

/// Edits for the documentation comments of `src` that overlap `span`.
///
/// A comment is included when any part of it overlaps the span; an empty span
/// selects the comment strictly surrounding it.
pub fn format_span(src: &str, span: Span, config: &FormatConfig) -> FormatResult<Vec<TextEdit>> {
    check_span(src, span)?;
    let comments = parse_document(src);
    let selected = comments.iter().filter(|c| c.span.overlaps(span));
    format_comments(src, selected, config)
}

fn format_comments<'c>(
    src: &str,
    comments: impl Iterator<Item = &'c DocComment>,
    config: &FormatConfig,
) -> FormatResult<Vec<TextEdit>> {
    config.validate()?;
    let mut edits = Vec::new();
    let mut count = 0usize;
    for comment in comments {
        edits.extend(format_comment(src, comment, config)?);
        count += 1;
    }
    debug!(comments = count, edits = edits.len(), "formatted document");
    Ok(edits)
}

fn check_span(src: &str, span: Span) -> FormatResult<()> {
    for position in [span.start, span.end] {
        if position > src.len() {
            return Err(FormatError::PositionOutOfRange {
                position,
                len: src.len(),
            });
        }
        if !src.is_char_boundary(position) {
            return Err(FormatError::NotCharBoundary(position));
        }
    }
    Ok(())
}

/// The whitespace character right after the first marker, if every other
/// line starts with it too; otherwise empty. A blank line is a mismatch.
fn interior_prefix<'a>(src: &'a str, comment: &DocComment) -> &'a str {
    let Some((&first, rest)) = comment.line_starts.split_first() else {
        return "";
    };
    let Some(c) = src.get(first..).and_then(|s| s.chars().next()) else {
        return "";
    };
    if !is_whitespace(c) {
        return "";
    }

    let consistent = rest
        .iter()
        .all(|&start| src.get(start..).is_some_and(|line| line.starts_with(c)));
    if consistent {
        &src[first..first + c.len_utf8()]
    } else {
        ""
    }
}
