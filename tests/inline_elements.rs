mod common;

use common::{assert_format, assert_format_with, wrap};
use rstest::rstest;

#[test]
fn inline_elements_flow_with_text() {
    assert_format(
        "public class C {
    /// Words and <see cref=\"M1\"/> and <c>words</c>.
    public void M1() { }

    /// Words and <see cref=\"M2\"/> and <c>words</c>.
    public void M2() { }
}",
        "public class C {
    /// Words and <see cref=\"M1\"/> and <c>words</c>.
    public void M1() { }

    /// Words and
    /// <see cref=\"M2\"/>
    /// and
    /// <c>words</c>.
    public void M2() { }
}",
    );
}

#[rstest]
#[case("/// Words <c>and</c> words.\n")]
#[case("/// Words<c> and</c> words.\n")]
#[case("/// Words <c>and </c>words.\n")]
#[case("/// Words<c> and </c>words.\n")]
fn spaces_around_inline_tags_are_kept(#[case] input: &str) {
    assert_format_with(input, input, &wrap(40));
}

#[rstest]
#[case(
    "    /// Words and words and words <c>and</c> words.\n",
    "    /// Words and words and words\n    /// <c>and</c> words.\n"
)]
#[case(
    "    /// Words and words and words<c> and</c> words.\n",
    "    /// Words and words and words<c>\n    /// and</c> words.\n"
)]
#[case(
    "    /// Words and words and <c>words </c>and words.\n",
    "    /// Words and words and <c>words\n    /// </c>and words.\n"
)]
#[case(
    "    /// Words and words and <c>words</c> and words.\n",
    "    /// Words and words and <c>words</c>\n    /// and words.\n"
)]
fn inline_tags_wrap_with_adjacent_words(#[case] input: &str, #[case] expected: &str) {
    assert_format_with(expected, input, &wrap(40));
}

#[test]
fn inline_element_content_wraps() {
    assert_format_with(
        "public class C {
    /// Words and words and <c>words and
    /// words and</c> words.
    public void M() { }
}",
        "public class C {
    /// Words and words and <c>words and words and</c> words.
    public void M() { }
}",
        &wrap(40),
    );
}

#[test]
fn inline_element_sticks_with_surrounding_word() {
    assert_format_with(
        "public class C {
    /// __________<c>__________
    /// __________</c>__________
    public void M() { }
}",
        "public class C {
    /// __________<c>__________ __________</c>__________
    public void M() { }
}",
        &wrap(20),
    );
}

#[test]
fn inline_empty_element_wraps() {
    assert_format_with(
        "public class C {
    /// Words and words and
    /// <see cref=\"M1\"/> and words.
    public void M1() { }

    /// Words and <see cref=\"M2(C)\"/>
    /// and words.
    public void M2(C x) { }
}",
        "public class C {
    /// Words and words and <see cref=\"M1\"/> and words.
    public void M1() { }

    /// Words and <see cref=\"M2(C)\"/> and words.
    public void M2(C x) { }
}",
        &wrap(40),
    );
}

#[test]
fn inline_empty_element_sticks_with_surrounding_word() {
    let input = "public class C {
    /// __________<see cref=\"C\"/>__________
    public void M() { }
}";
    assert_format_with(input, input, &wrap(20));
}

#[test]
fn reference_values_are_trimmed() {
    assert_format(
        "/// See <see cref=\"M\"/> and <paramref name=\"x\"/>.\n",
        "/// See <see cref=\" M \"/> and <paramref name=\"x  \"/>.\n",
    );
}

#[test]
fn other_attribute_values_keep_their_spaces() {
    let input = "/// <list type=\" bullet \">\n/// </list>\n";
    assert_format(input, input);
}
