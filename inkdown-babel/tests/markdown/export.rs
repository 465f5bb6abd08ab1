//! Export tests for Markdown format (rich HTML → Markdown)

use inkdown_babel::format::{Format, RichHtml};
use inkdown_babel::formats::markdown::{MarkdownFormat, MarkdownOptions, UnsupportedTagPolicy};
use inkdown_babel::{to_markdown, to_markdown_raw, to_markdown_with_options, FormatError};
use insta::assert_snapshot;

#[test]
fn test_bold_round_trip() {
    assert_eq!(to_markdown("<p><strong>x</strong></p>").unwrap().trim(), "**x**");
    assert_eq!(to_markdown("<p><em>x</em></p>").unwrap().trim(), "*x*");
}

#[test]
fn test_absent_input_is_rejected() {
    assert!(matches!(to_markdown_raw(None), Err(FormatError::InvalidInput(_))));
    assert_eq!(
        to_markdown_raw(Some("<h2>Hi</h2>".as_bytes())).unwrap(),
        "## Hi"
    );
}

#[test]
fn test_editor_document() {
    let html = concat!(
        "<h1>Release notes</h1>",
        "<p>Version <strong>2.0</strong> ships <em>today</em>.<br>Read the ",
        "<a href=\"https://example.com/notes (v2)\">full notes</a>.</p>",
        "<h2>Changes</h2>",
        "<ol><li><p>Faster <code>save</code></p></li><li>New <s>beta</s> toolbar",
        "<ul><li>bold</li><li>italic</li></ul></li></ol>",
        "<blockquote><p>Thanks to everyone who tested.</p></blockquote>",
        "<hr>",
        "<pre><code>inkdown convert notes.md --to html</code></pre>",
    );
    let markdown = to_markdown(html).unwrap();
    assert_snapshot!(markdown, @r###"
    # Release notes

    Version **2.0** ships *today*.
    Read the [full notes](https://example.com/notes%20%28v2%29).

    ## Changes

    1. Faster `save`
    2. New ~~beta~~ toolbar
       - bold
       - italic

    > Thanks to everyone who tested.

    ---

    ```
    inkdown convert notes.md --to html
    ```
    "###);
}

#[test]
fn test_list_items_come_from_own_children() {
    let html = "<ul><li>outer<ol><li>inner one</li><li>inner two</li></ol></li></ul>";
    assert_eq!(
        to_markdown(html).unwrap(),
        "- outer\n  1. inner one\n  2. inner two"
    );
}

#[test]
fn test_ordered_list_renumbers_from_one() {
    let html = "<ol start=\"5\"><li>five</li><li>six</li></ol>";
    assert_eq!(to_markdown(html).unwrap(), "1. five\n2. six");
}

#[test]
fn test_entities_are_decoded() {
    assert_eq!(
        to_markdown("<p>Fish &amp; Chips &lt;3 &copy;</p>").unwrap(),
        "Fish & Chips <3 ©"
    );
}

#[test]
fn test_literal_syntax_is_escaped() {
    assert_eq!(
        to_markdown("<p>a * b _ c [d] `e` ~f~</p>").unwrap(),
        "a \\* b _ c \\[d\\] \\`e\\` \\~f\\~"
    );
    assert_eq!(to_markdown("<p>---</p>").unwrap(), "\\---");
    assert_eq!(to_markdown("<p>&gt; not quoted</p>").unwrap(), "\\> not quoted");
}

#[test]
fn test_unsupported_markup_keeps_text() {
    let html = "<div class=\"note\"><p>Keep <span style=\"color:red\">this</span></p></div>\
                <table><tr><td>cell</td></tr></table>";
    assert_eq!(to_markdown(html).unwrap(), "Keep this\n\ncell");
}

#[test]
fn test_reject_policy_names_the_tag() {
    let options = MarkdownOptions {
        unsupported_tags: UnsupportedTagPolicy::Reject,
        ..MarkdownOptions::default()
    };
    let err = to_markdown_with_options("<p>ok</p><u>underlined</u>", &options).unwrap_err();
    assert_eq!(err, FormatError::UnsupportedMarkup("u".to_string()));
    assert_eq!(
        err.to_string(),
        "Unsupported markup: <u> is outside the editor subset"
    );
}

#[test]
fn test_format_trait_serialize_with_options() {
    let format = MarkdownFormat::default();
    let doc = RichHtml::new("<pre><code class=\"language-toml\">a = 1</code></pre>");
    let mut params = std::collections::HashMap::new();
    params.insert("code-language".to_string(), "true".to_string());
    assert_eq!(
        format.serialize_with_options(&doc, &params).unwrap(),
        "```toml\na = 1\n```"
    );
    assert_eq!(format.serialize(&doc).unwrap(), "```\na = 1\n```");
}

#[test]
fn test_malformed_html_is_tolerated() {
    assert_eq!(
        to_markdown("<p>open <strong>bold<p>next").unwrap(),
        "open **bold**\n\n**next**"
    );
}
