#![allow(dead_code)]

use pretty_assertions::assert_eq;
use reformadoc::{apply_edits, format_document, format_span, is_ordered, FormatConfig, Span};

pub fn wrap(column: usize) -> FormatConfig {
    FormatConfig::default().with_wrap_column(column)
}

pub fn format(input: &str, config: &FormatConfig) -> String {
    let edits = format_document(input, config).expect("format");
    assert!(is_ordered(&edits), "edits out of order: {edits:?}");
    apply_edits(input, &edits)
}

#[track_caller]
pub fn assert_format(expected: &str, input: &str) {
    assert_format_with(expected, input, &FormatConfig::default());
}

#[track_caller]
pub fn assert_format_with(expected: &str, input: &str, config: &FormatConfig) {
    assert_eq!(format(input, config), expected);
}

/// Removes the `/*[*/` and `/*]*/` markers from `input` and returns the text
/// with the span between them.
pub fn take_span(input: &str) -> (String, Span) {
    let start = input.find("/*[*/").expect("start marker");
    let text = input.replacen("/*[*/", "", 1);
    let end = text.find("/*]*/").expect("end marker");
    let text = text.replacen("/*]*/", "", 1);
    (text, Span::new(start, end))
}

#[track_caller]
pub fn assert_format_span(expected: &str, input_with_markers: &str) {
    let (input, span) = take_span(input_with_markers);
    let edits = format_span(&input, span, &FormatConfig::default()).expect("format");
    assert!(is_ordered(&edits));
    assert_eq!(apply_edits(&input, &edits), expected);
}
