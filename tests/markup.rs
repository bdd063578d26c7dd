mod common;

use common::{assert_format, assert_format_with, wrap};
use rstest::rstest;

/* ======================== Comments and CDATA sections ===================== */

#[rstest]
#[case("<!--", "-->")]
#[case("<![CDATA[", "]]>")]
fn delimited_content_flows_with_text(#[case] open: &str, #[case] close: &str) {
    let input = format!(
        "public class C {{
    /// Words and {open}words and{close} words.
    public void M1() {{ }}

    /// Words and
    /// {open}words
    /// and{close}
    /// words.
    public void M2() {{ }}
}}"
    );
    let expected = format!(
        "public class C {{
    /// Words and {open}words and{close} words.
    public void M1() {{ }}

    /// Words and {open}words and{close} words.
    public void M2() {{ }}
}}"
    );
    assert_format(&expected, &input);
}

#[rstest]
#[case("<!--", "-->")]
#[case("<![CDATA[", "]]>")]
fn delimiters_keep_adjacent_spaces(#[case] open: &str, #[case] close: &str) {
    for body in [
        format!("Words {open}and{close} words."),
        format!("Words{open} and{close} words."),
        format!("Words {open}and {close}words."),
        format!("Words{open} and {close}words."),
    ] {
        let input = format!("    /// {body}\n");
        assert_format_with(&input, &input, &wrap(40));
    }
}

#[test]
fn comment_wraps() {
    assert_format_with(
        "public class C {
    /// Words and words and words
    /// <!--and--> words.
    public void M1() { }

    /// Words and words and words<!--
    /// and--> words.
    public void M2() { }

    /// Words and words and <!--words
    /// -->and words.
    public void M3() { }

    /// Words and words and <!--words-->
    /// and words.
    public void M4() { }
}",
        "public class C {
    /// Words and words and words <!--and--> words.
    public void M1() { }

    /// Words and words and words<!-- and--> words.
    public void M2() { }

    /// Words and words and <!--words -->and words.
    public void M3() { }

    /// Words and words and <!--words--> and words.
    public void M4() { }
}",
        &wrap(40),
    );
}

#[test]
fn cdata_wraps() {
    assert_format_with(
        "public class C {
    /// Words and words and
    /// <![CDATA[words]]>.
    public void M1() { }

    /// Words and words and<![CDATA[
    /// words]]> and words.
    public void M2() { }

    /// Words and words <![CDATA[and
    /// ]]>words.
    public void M3() { }

    /// Words and words <![CDATA[and]]>
    /// words.
    public void M4() { }
}",
        "public class C {
    /// Words and words and <![CDATA[words]]>.
    public void M1() { }

    /// Words and words and<![CDATA[ words]]> and words.
    public void M2() { }

    /// Words and words <![CDATA[and ]]>words.
    public void M3() { }

    /// Words and words <![CDATA[and]]> words.
    public void M4() { }
}",
        &wrap(40),
    );
}

#[test]
fn delimited_content_wraps() {
    assert_format_with(
        "public class C {
    /// Words and words and <!--words
    /// and words and--> words.
    public void M() { }
}",
        "public class C {
    /// Words and words and <!--words and words and--> words.
    public void M() { }
}",
        &wrap(40),
    );
    assert_format_with(
        "public class C {
    /// Words and <![CDATA[words and
    /// words and]]> words.
    public void M() { }
}",
        "public class C {
    /// Words and <![CDATA[words and words and]]> words.
    public void M() { }
}",
        &wrap(40),
    );
}

#[rstest]
#[case("<!--", "-->")]
#[case("<![CDATA[", "]]>")]
fn delimiters_stick_with_surrounding_word(#[case] open: &str, #[case] close: &str) {
    assert_format_with(
        &format!("    /// __________{open}__________\n    /// __________{close}__________\n"),
        &format!("    /// __________{open}__________ __________{close}__________\n"),
        &wrap(20),
    );
}

/* ========================= Processing instructions ======================= */

#[test]
fn processing_instruction_is_kept_verbatim() {
    let input = "public class C {
    /// <?target and words  and words
    /// and words?>
    public void M() { }
}";
    assert_format(input, input);
}

#[test]
fn processing_instruction_gets_its_own_line() {
    assert_format(
        "/// Words\n/// <?pi x?>\n/// words.\n",
        "/// Words <?pi x?> words.\n",
    );
}

/* ================================ Elements =============================== */

#[test]
fn element_inner_breaks_are_removed() {
    assert_format(
        "public class C {
    /// <exception cref=\"Exception\">Words and words.</exception>
    public void M() { }
}",
        "public class C {
    /// < exception
    /// cref = \"Exception\" >Words and words.</ exception >
    public void M() { }
}",
    );
}

#[test]
fn empty_element_inner_breaks_are_removed() {
    assert_format(
        "public class C {
    /// Words and <see cref=\"M\"/>.
    public void M() { }
}",
        "public class C {
    /// Words and < see
    /// cref = \"M\" />.
    public void M() { }
}",
    );
}

#[test]
fn attributes_are_separated_by_one_space() {
    assert_format(
        "/// <list type=\"table\" start=\"1\">\n/// </list>\n",
        "/// <list   type=\"table\"\n///    start=\"1\"  >\n/// </list>\n",
    );
}

#[test]
fn namespaced_element_is_inline() {
    let input = "public class C {
    /// <ns:summary>Words and words.</ns:summary>
    public void M() { }
}";
    assert_format(input, input);
}

#[test]
fn attribute_line_break_is_preserved() {
    assert_format(
        "public class C {
    /// <ns:tag attribute=\"
    /// \"/>
    public void M() { }
}",
        "public class C {
    /// <ns:tag attribute=\"
/// \"/>
    public void M() { }
}",
    );
}

/* ============================= Missing tokens ============================ */

#[test]
fn block_element_missing_end_tag_still_breaks() {
    assert_format(
        "public class C {
    /// <summary>
    /// Words and words.
    public void M() { }
}",
        "public class C {
    /// <summary>Words and words.
    public void M() { }
}",
    );
}

#[rstest]
#[case("/// Words and words.</summary>\n")]
#[case("/// <include file=\"file.xml\" path=\"*\">\n")]
#[case("/// Words and <c>words.\n")]
#[case("/// Words and words</c>.\n")]
#[case("/// Words and <see cref=\"M\">.\n")]
#[case("/// 1 < 2 and 3 > 2.\n")]
#[case("/// a < b\n")]
fn malformed_markup_is_unchanged(#[case] input: &str) {
    assert_format(input, input);
}
